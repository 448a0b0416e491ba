//! Error types for slot-engine operations.

use thiserror::Error;

/// Boxed error returned by a [`ScheduleSource`](crate::source::ScheduleSource)
/// implementation when a fetch fails.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A window boundary is unparsable, or end is not strictly after start.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Duration is not positive or exceeds the configured maximum.
    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(i64),

    /// Team id is not positive, or the team has no accepted members.
    #[error("Invalid team: {0}")]
    InvalidTeam(i64),

    /// A policy field is outside the range the pipeline supports.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Team not found: {0}")]
    TeamNotFound(i64),

    /// A collaborator fetch failed. Never masked as "no busy data".
    #[error("Data unavailable: {what}")]
    DataUnavailable {
        what: String,
        #[source]
        source: SourceError,
    },
}

impl SlotError {
    pub(crate) fn data_unavailable(what: impl Into<String>, source: SourceError) -> Self {
        SlotError::DataUnavailable {
            what: what.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
