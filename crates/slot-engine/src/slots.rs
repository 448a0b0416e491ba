//! Candidate meeting starts on a fixed grid.
//!
//! The first candidate is the first grid point at or after the window start
//! (grid points are counted from local midnight). Candidates step forward by
//! the grid until a meeting of the requested duration would overrun the
//! window end. Degenerate input yields an empty list, never an error.

use chrono::NaiveDateTime;

use crate::time::{self, ceil_to_step, MINUTE_MS};

/// Default grid step in minutes.
pub const GRID_MINUTES: i64 = 30;

/// Generate slot strings for a window given as local-time strings.
///
/// Returns an empty list if either boundary is unparsable, `duration_minutes`
/// is not positive, or the window is empty or inverted.
pub fn generate_slots(window_start: &str, window_end: &str, duration_minutes: i64) -> Vec<String> {
    generate_slots_on_grid(window_start, window_end, duration_minutes, GRID_MINUTES)
}

/// Like [`generate_slots`] with an explicit grid step.
pub fn generate_slots_on_grid(
    window_start: &str,
    window_end: &str,
    duration_minutes: i64,
    grid_minutes: i64,
) -> Vec<String> {
    match (time::parse_local(window_start), time::parse_local(window_end)) {
        (Some(start), Some(end)) => generate_slot_times(start, end, duration_minutes, grid_minutes)
            .into_iter()
            .map(time::format_local)
            .collect(),
        _ => Vec::new(),
    }
}

/// Typed core of the generator.
pub fn generate_slot_times(
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    duration_minutes: i64,
    grid_minutes: i64,
) -> Vec<NaiveDateTime> {
    if duration_minutes <= 0 || grid_minutes <= 0 || window_start >= window_end {
        return Vec::new();
    }

    let start_ms = time::to_millis(window_start);
    let end_ms = time::to_millis(window_end);
    let Some(duration_ms) = duration_minutes.checked_mul(MINUTE_MS) else {
        return Vec::new();
    };
    let Some(step_ms) = grid_minutes.checked_mul(MINUTE_MS) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut cursor = ceil_to_step(start_ms, step_ms);
    while cursor.checked_add(duration_ms).is_some_and(|slot_end| slot_end <= end_ms) {
        match time::from_millis(cursor) {
            Some(slot) => slots.push(slot),
            None => break,
        }
        match cursor.checked_add(step_ms) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    slots
}
