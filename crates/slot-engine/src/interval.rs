//! Build a member's busy intervals from raw calendar rows.
//!
//! Rows are selected (organizer, or a participant who has not declined),
//! filtered against the window, given a fallback end when theirs is missing,
//! widened to whole minutes and clipped to the window. The result is a list
//! of half-open millisecond intervals sorted by start.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::policy::SlotPolicy;
use crate::source::{BusyRows, EventRole, EventRow, InviteStatus, MemberId, ScheduleSource, TaskRow};
use crate::time::{self, ceil_to_minute, floor_to_minute, DAY_MS, MINUTE_MS};

/// What produced a busy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusySource {
    Event,
    Task,
}

/// A half-open `[start, end)` range in milliseconds. Always `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: i64,
    pub end: i64,
    pub source: BusySource,
}

impl BusyInterval {
    /// Strict half-open overlap: touching ranges do not overlap.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start < self.end && end > self.start
    }
}

/// Fetch one member's rows from `source` and normalize them.
///
/// # Errors
/// Returns `SlotError::InvalidWindow` if either boundary is unparsable and
/// `SlotError::DataUnavailable` if the fetch fails. A failed fetch is never
/// reported as an empty (fully free) list.
pub async fn busy_intervals_for_member<S>(
    source: &S,
    member_id: MemberId,
    window_start: &str,
    window_end: &str,
    policy: &SlotPolicy,
) -> Result<Vec<BusyInterval>>
where
    S: ScheduleSource + ?Sized,
{
    let start = time::parse_local(window_start)
        .ok_or_else(|| SlotError::InvalidWindow(format!("unparsable start '{}'", window_start)))?;
    let end = time::parse_local(window_end)
        .ok_or_else(|| SlotError::InvalidWindow(format!("unparsable end '{}'", window_end)))?;

    busy_intervals_in_window(source, member_id, start, end, policy).await
}

/// Typed variant of [`busy_intervals_for_member`].
pub async fn busy_intervals_in_window<S>(
    source: &S,
    member_id: MemberId,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    policy: &SlotPolicy,
) -> Result<Vec<BusyInterval>>
where
    S: ScheduleSource + ?Sized,
{
    let rows = source
        .busy_rows(
            member_id,
            &time::format_local(window_start),
            &time::format_local(window_end),
        )
        .await
        .map_err(|e| SlotError::data_unavailable(format!("busy rows for member {}", member_id), e))?;

    let intervals = build_busy_intervals(
        &rows,
        time::to_millis(window_start),
        time::to_millis(window_end),
        policy,
    );
    debug!(
        member_id,
        rows = rows.events.len() + rows.tasks.len(),
        intervals = intervals.len(),
        "built busy intervals"
    );

    Ok(intervals)
}

/// Normalize raw rows into sorted busy intervals inside `[window_start, window_end)`.
pub fn build_busy_intervals(
    rows: &BusyRows,
    window_start: i64,
    window_end: i64,
    policy: &SlotPolicy,
) -> Vec<BusyInterval> {
    let mut intervals: Vec<BusyInterval> = rows
        .events
        .iter()
        .filter_map(|row| event_interval(row, window_start, window_end, policy))
        .collect();

    if policy.tasks_block_day {
        intervals.extend(
            rows.tasks
                .iter()
                .filter_map(|row| task_interval(row, window_start, window_end)),
        );
    }

    intervals.sort_by_key(|i| (i.start, i.end));
    intervals
}

fn blocks_time(role: EventRole) -> bool {
    match role {
        EventRole::Organizer => true,
        EventRole::Participant(status) => status != InviteStatus::Declined,
    }
}

fn event_interval(
    row: &EventRow,
    window_start: i64,
    window_end: i64,
    policy: &SlotPolicy,
) -> Option<BusyInterval> {
    if !blocks_time(row.role) {
        return None;
    }

    let Some(start) = time::parse_local_millis(&row.start) else {
        warn!(start = %row.start, "skipping event with unparsable start");
        return None;
    };
    let raw_end = row.end.as_deref().and_then(time::parse_local_millis);

    // Only genuine overlaps with the window count; touching does not.
    if !(start < window_end && raw_end.unwrap_or(start) > window_start) {
        return None;
    }

    let end = match raw_end {
        Some(end) if end > start => end,
        _ => policy
            .fallback_event_minutes
            .max(1)
            .checked_mul(MINUTE_MS)
            .and_then(|fallback| start.checked_add(fallback))
            .unwrap_or(window_end),
    };

    clip(floor_to_minute(start), ceil_to_minute(end), window_start, window_end, BusySource::Event)
}

fn task_interval(row: &TaskRow, window_start: i64, window_end: i64) -> Option<BusyInterval> {
    let date = row.date.as_deref().and_then(time::parse_local)?.date();
    let first_day = time::from_millis(window_start)?.date();
    let last_day = time::from_millis(window_end)?.date();

    if date < first_day || date > last_day {
        return None;
    }

    let start = time::to_millis(date.and_hms_opt(0, 0, 0)?);
    clip(start, start + DAY_MS, window_start, window_end, BusySource::Task)
}

fn clip(
    start: i64,
    end: i64,
    window_start: i64,
    window_end: i64,
    source: BusySource,
) -> Option<BusyInterval> {
    let start = start.max(window_start);
    let end = end.min(window_end);
    (end > start).then_some(BusyInterval { start, end, source })
}
