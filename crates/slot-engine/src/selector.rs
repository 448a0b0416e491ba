//! Reduce a score table to the caller-facing suggestion.
//!
//! `slots` is a filter (every perfect slot, chronological), `best` is a reduce
//! (highest `available`, earliest slot on ties). Both read the same score
//! list, so a non-empty `slots` always starts with `best`.

use serde::{Deserialize, Serialize};

use crate::scoring::AvailabilityScore;

/// Every slot where the whole team is free, in input order.
pub fn perfect_slots(scores: &[AvailabilityScore]) -> Vec<String> {
    scores
        .iter()
        .filter(|s| s.is_perfect())
        .map(|s| s.slot.clone())
        .collect()
}

/// The slot with the most available members.
///
/// Ties go to the slot whose string sorts first, which is the earliest slot
/// given the fixed zero-padded format. `None` for an empty list.
pub fn best_slot(scores: &[AvailabilityScore]) -> Option<&AvailabilityScore> {
    scores.iter().fold(None, |best: Option<&AvailabilityScore>, candidate| match best {
        None => Some(candidate),
        Some(current) if candidate.available > current.available => Some(candidate),
        Some(current)
            if candidate.available == current.available && candidate.slot < current.slot =>
        {
            Some(candidate)
        }
        keep => keep,
    })
}

/// One row of the serialized score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotScore {
    pub slot: String,
    pub available: usize,
    pub total: usize,
}

/// Result of a slot search.
///
/// Serializes as `{ "slots": [...], "best": "..." | null, "score": [...] }`.
/// The per-slot busy member ids stay on [`details`](SlotSuggestion::details)
/// and are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub slots: Vec<String>,
    pub best: Option<String>,
    pub score: Vec<SlotScore>,
    #[serde(skip)]
    pub details: Vec<AvailabilityScore>,
}

impl SlotSuggestion {
    pub fn from_scores(scores: Vec<AvailabilityScore>) -> Self {
        let slots = perfect_slots(&scores);
        let best = best_slot(&scores).map(|s| s.slot.clone());
        let score = scores
            .iter()
            .map(|s| SlotScore {
                slot: s.slot.clone(),
                available: s.available,
                total: s.total,
            })
            .collect();

        Self {
            slots,
            best,
            score,
            details: scores,
        }
    }

    /// The window cannot hold a single meeting of the requested duration.
    ///
    /// This is a normal outcome, distinct from every error.
    pub fn no_slots_possible(&self) -> bool {
        self.score.is_empty()
    }
}
