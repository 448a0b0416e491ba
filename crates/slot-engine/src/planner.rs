//! The request-scoped slot-search pipeline.
//!
//! members → slot grid → busy intervals per member (concurrent) → scores →
//! suggestion. The planner holds no state between calls; identical inputs and
//! identical source data give identical output.

use std::collections::HashMap;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::busy_intervals_in_window;
use crate::policy::SlotPolicy;
use crate::request::SlotRequest;
use crate::scoring::compute_availability_matrix;
use crate::selector::SlotSuggestion;
use crate::slots::generate_slot_times;
use crate::source::ScheduleSource;
use crate::time;

/// Find the slots where the whole team can meet, and the best fallback.
///
/// A window too short for the duration is not an error: the returned
/// suggestion is empty and [`SlotSuggestion::no_slots_possible`] is true. No
/// interval fetches are made in that case.
///
/// # Errors
/// - `SlotError::InvalidPolicy` if `policy` fails [`SlotPolicy::validate`].
/// - `SlotError::TeamNotFound` if the team does not exist.
/// - `SlotError::InvalidTeam` if the team exists but has no accepted members.
/// - `SlotError::DataUnavailable` if any collaborator fetch fails. The first
///   failure aborts the whole search; the other in-flight fetches are dropped.
pub async fn find_meeting_slots<S>(
    source: &S,
    request: &SlotRequest,
    policy: &SlotPolicy,
) -> Result<SlotSuggestion>
where
    S: ScheduleSource + ?Sized,
{
    policy.validate()?;
    let team_id = request.team_id;

    let members = source
        .team_members(team_id)
        .await
        .map_err(|e| SlotError::data_unavailable(format!("members of team {}", team_id), e))?;

    if members.is_empty() {
        let exists = source
            .team_exists(team_id)
            .await
            .map_err(|e| SlotError::data_unavailable(format!("team {}", team_id), e))?;
        return Err(if exists {
            SlotError::InvalidTeam(team_id)
        } else {
            SlotError::TeamNotFound(team_id)
        });
    }

    let slots: Vec<String> = generate_slot_times(
        request.window_start,
        request.window_end,
        request.duration_minutes,
        policy.grid_minutes,
    )
    .into_iter()
    .map(time::format_local)
    .collect();

    if slots.is_empty() {
        debug!(team_id, "window too short for requested duration");
        return Ok(SlotSuggestion::default());
    }

    let fetches = members.iter().map(|member| async move {
        busy_intervals_in_window(
            source,
            member.id,
            request.window_start,
            request.window_end,
            policy,
        )
        .await
        .map(|intervals| (member.id, intervals))
    });
    let intervals_by_member: HashMap<_, _> = try_join_all(fetches).await?.into_iter().collect();

    let scores = compute_availability_matrix(
        &members,
        &intervals_by_member,
        &slots,
        request.duration_minutes,
    );
    let suggestion = SlotSuggestion::from_scores(scores);

    debug!(
        team_id,
        members = members.len(),
        candidates = suggestion.score.len(),
        perfect = suggestion.slots.len(),
        best = ?suggestion.best,
        "slot search complete"
    );

    Ok(suggestion)
}
