//! Per-slot attendance counts.
//!
//! For every candidate slot and every member, a member is busy when any of
//! their intervals overlaps `[slot, slot + duration)`. The scorer is a pure
//! function of its inputs and preserves slot order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::interval::BusyInterval;
use crate::source::{MemberId, TeamMember};
use crate::time::{self, MINUTE_MS};

/// Attendance for one candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityScore {
    pub slot: String,
    /// Members free for the whole slot. Always `<= total`.
    pub available: usize,
    /// Team size.
    pub total: usize,
    /// Busy members, in team order.
    pub busy_member_ids: Vec<MemberId>,
}

impl AvailabilityScore {
    pub fn is_perfect(&self) -> bool {
        self.available == self.total
    }
}

/// Score every slot against every member's busy intervals.
///
/// A member absent from `intervals_by_member` has no busy time. A slot that
/// does not parse marks the whole team busy.
pub fn compute_availability_matrix(
    members: &[TeamMember],
    intervals_by_member: &HashMap<MemberId, Vec<BusyInterval>>,
    slots: &[String],
    duration_minutes: i64,
) -> Vec<AvailabilityScore> {
    let total = members.len();
    let duration_ms = duration_minutes.saturating_mul(MINUTE_MS);

    slots
        .iter()
        .map(|slot| {
            let Some(slot_start) = time::parse_local_millis(slot) else {
                return AvailabilityScore {
                    slot: slot.clone(),
                    available: 0,
                    total,
                    busy_member_ids: members.iter().map(|m| m.id).collect(),
                };
            };
            let slot_end = slot_start.saturating_add(duration_ms);

            let busy_member_ids: Vec<MemberId> = members
                .iter()
                .filter(|member| {
                    intervals_by_member
                        .get(&member.id)
                        .is_some_and(|intervals| {
                            intervals.iter().any(|i| i.overlaps(slot_start, slot_end))
                        })
                })
                .map(|member| member.id)
                .collect();

            AvailabilityScore {
                slot: slot.clone(),
                available: total - busy_member_ids.len(),
                total,
                busy_member_ids,
            }
        })
        .collect()
}
