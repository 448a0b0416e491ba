//! Tunable constants for slot discovery.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Knobs for the slot-discovery pipeline.
///
/// The defaults are what the request handler uses. A snapshot file may carry
/// a `policy` object overriding any subset of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotPolicy {
    /// Grid step for candidate slots, measured from local midnight.
    pub grid_minutes: i64,
    /// Length given to events whose end is missing or not after their start.
    pub fallback_event_minutes: i64,
    /// Longest meeting a request may ask for.
    pub max_duration_minutes: i64,
    /// Dated tasks block their whole calendar day.
    pub tasks_block_day: bool,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            grid_minutes: 30,
            fallback_event_minutes: 30,
            max_duration_minutes: MINUTES_PER_DAY,
            tasks_block_day: true,
        }
    }
}

impl SlotPolicy {
    /// Check that every field is one the pipeline can honor.
    ///
    /// The grid must divide a day so grid points stay aligned to local
    /// midnight on every date. Durations and fallback lengths are capped at
    /// one day.
    ///
    /// # Errors
    /// `SlotError::InvalidPolicy` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.grid_minutes <= 0 || MINUTES_PER_DAY % self.grid_minutes != 0 {
            return Err(SlotError::InvalidPolicy(format!(
                "grid_minutes {} does not divide a day",
                self.grid_minutes
            )));
        }
        if !(1..=MINUTES_PER_DAY).contains(&self.max_duration_minutes) {
            return Err(SlotError::InvalidPolicy(format!(
                "max_duration_minutes {} is outside 1..={}",
                self.max_duration_minutes, MINUTES_PER_DAY
            )));
        }
        if !(1..=MINUTES_PER_DAY).contains(&self.fallback_event_minutes) {
            return Err(SlotError::InvalidPolicy(format!(
                "fallback_event_minutes {} is outside 1..={}",
                self.fallback_event_minutes, MINUTES_PER_DAY
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut SlotPolicy)) -> SlotPolicy {
        let mut policy = SlotPolicy::default();
        f(&mut policy);
        policy
    }

    #[test]
    fn default_policy_is_valid() {
        assert!(SlotPolicy::default().validate().is_ok());
    }

    #[test]
    fn grid_must_divide_a_day() {
        for grid in [15, 20, 60, 90, 1440] {
            assert!(with(|p| p.grid_minutes = grid).validate().is_ok(), "grid {}", grid);
        }
        for grid in [0, -30, 7, 25, 1000, 200_000_000_000_000_000] {
            assert!(
                matches!(
                    with(|p| p.grid_minutes = grid).validate(),
                    Err(SlotError::InvalidPolicy(_))
                ),
                "grid {}",
                grid
            );
        }
    }

    #[test]
    fn max_duration_is_capped_at_one_day() {
        assert!(with(|p| p.max_duration_minutes = 60).validate().is_ok());
        for max in [0, 1441, 5000] {
            assert!(matches!(
                with(|p| p.max_duration_minutes = max).validate(),
                Err(SlotError::InvalidPolicy(_))
            ));
        }
    }

    #[test]
    fn fallback_length_is_bounded() {
        for fallback in [0, -1, 1441, i64::MAX] {
            assert!(matches!(
                with(|p| p.fallback_event_minutes = fallback).validate(),
                Err(SlotError::InvalidPolicy(_))
            ));
        }
    }

    #[test]
    fn snapshot_overrides_are_checked_after_parsing() {
        let policy: SlotPolicy =
            serde_json::from_str(r#"{"grid_minutes": 7, "max_duration_minutes": 5000}"#).unwrap();
        assert_eq!(policy.fallback_event_minutes, 30);
        assert!(policy.validate().is_err());
    }
}
