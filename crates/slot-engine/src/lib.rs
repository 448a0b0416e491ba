//! # slot-engine
//!
//! Deterministic meeting-slot discovery for teams.
//!
//! Given a team, a window and a meeting duration, the engine lays a 30-minute
//! grid over the window, checks every member's busy intervals against every
//! candidate slot, and reports the slots where everyone is free together with
//! the single best slot when no such slot exists.
//!
//! All timestamps are floating local time (see [`time`]).
//!
//! ## Modules
//!
//! - [`time`] — local-time strings ↔ millisecond instants
//! - [`interval`] — raw calendar rows → clipped busy intervals per member
//! - [`slots`] — candidate slot grid for a window and duration
//! - [`scoring`] — per-slot available member counts
//! - [`selector`] — perfect slots, best slot, serialized suggestion
//! - [`request`] — validation of raw search input
//! - [`source`] — the data collaborator trait and an in-memory implementation
//! - [`planner`] — the end-to-end pipeline
//! - [`policy`] — tunable constants
//! - [`error`] — Error types

pub mod error;
pub mod interval;
pub mod planner;
pub mod policy;
pub mod request;
pub mod scoring;
pub mod selector;
pub mod slots;
pub mod source;
pub mod time;

pub use error::{SlotError, SourceError};
pub use interval::{build_busy_intervals, busy_intervals_for_member, BusyInterval, BusySource};
pub use planner::find_meeting_slots;
pub use policy::SlotPolicy;
pub use request::SlotRequest;
pub use scoring::{compute_availability_matrix, AvailabilityScore};
pub use selector::{best_slot, perfect_slots, SlotScore, SlotSuggestion};
pub use slots::generate_slots;
pub use source::{InMemorySource, ScheduleSource, Snapshot, TeamMember};
