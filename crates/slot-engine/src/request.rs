//! Validation of raw slot-search input.
//!
//! The pipeline below this point assumes a positive team id, a parsable
//! window with `end > start` and a duration inside the policy limit. Nothing
//! here repairs bad input: windows are never swapped or clamped and durations
//! are never truncated to the maximum.

use chrono::NaiveDateTime;

use crate::error::{Result, SlotError};
use crate::policy::SlotPolicy;
use crate::source::TeamId;
use crate::time;

/// A validated slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub team_id: TeamId,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl SlotRequest {
    /// Validate against the default [`SlotPolicy`].
    pub fn new(team_id: TeamId, start: &str, end: &str, duration_minutes: i64) -> Result<Self> {
        Self::with_policy(team_id, start, end, duration_minutes, &SlotPolicy::default())
    }

    /// # Errors
    /// - `SlotError::InvalidPolicy` if `policy` fails [`SlotPolicy::validate`].
    /// - `SlotError::InvalidTeam` if `team_id` is not positive.
    /// - `SlotError::InvalidWindow` if a boundary does not parse or `end <= start`.
    /// - `SlotError::InvalidDuration` if the duration is not in `1..=max_duration_minutes`.
    pub fn with_policy(
        team_id: TeamId,
        start: &str,
        end: &str,
        duration_minutes: i64,
        policy: &SlotPolicy,
    ) -> Result<Self> {
        policy.validate()?;

        if team_id <= 0 {
            return Err(SlotError::InvalidTeam(team_id));
        }

        let window_start = time::parse_local(start)
            .ok_or_else(|| SlotError::InvalidWindow(format!("unparsable start '{}'", start)))?;
        let window_end = time::parse_local(end)
            .ok_or_else(|| SlotError::InvalidWindow(format!("unparsable end '{}'", end)))?;

        if window_end <= window_start {
            return Err(SlotError::InvalidWindow(format!(
                "end '{}' is not after start '{}'",
                end, start
            )));
        }

        if duration_minutes <= 0 || duration_minutes > policy.max_duration_minutes {
            return Err(SlotError::InvalidDuration(duration_minutes));
        }

        Ok(Self {
            team_id,
            window_start,
            window_end,
            duration_minutes,
        })
    }

    /// Window start in the canonical `YYYY-MM-DDTHH:MM` form.
    pub fn start_string(&self) -> String {
        time::format_local(self.window_start)
    }

    /// Window end in the canonical `YYYY-MM-DDTHH:MM` form.
    pub fn end_string(&self) -> String {
        time::format_local(self.window_end)
    }
}
