//! Property-based tests for slot generation, scoring and selection.
//!
//! These check invariants that must hold for any window, duration and busy
//! data, not just the hand-picked scenarios in the other test files.

use std::collections::HashMap;

use proptest::prelude::*;
use slot_engine::interval::{BusyInterval, BusySource};
use slot_engine::time::{parse_local_millis, MINUTE_MS};
use slot_engine::{
    best_slot, compute_availability_matrix, generate_slots, perfect_slots, SlotSuggestion,
    TeamMember,
};

// ── Strategies ──────────────────────────────────────────────────────────────

const DAY_START: &str = "2026-03-16T00:00";

/// Window as (start minute, end minute) offsets from midnight, any alignment.
fn arb_window() -> impl Strategy<Value = (i64, i64)> {
    (0i64..=1200, 1i64..=600).prop_map(|(start, len)| (start, start + len))
}

fn arb_duration() -> impl Strategy<Value = i64> {
    prop_oneof![Just(15i64), Just(30), Just(45), Just(60), Just(90), 1i64..=240]
}

/// Busy intervals for up to five members, each at most eight intervals.
fn arb_busy() -> impl Strategy<Value = Vec<Vec<(i64, i64)>>> {
    prop::collection::vec(
        prop::collection::vec((0i64..=1400, 1i64..=180), 0..8),
        0..5,
    )
    .prop_map(|members| {
        members
            .into_iter()
            .map(|intervals| {
                intervals
                    .into_iter()
                    .map(|(start, len)| (start, start + len))
                    .collect()
            })
            .collect()
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn base() -> i64 {
    parse_local_millis(DAY_START).unwrap()
}

fn at_minute(minute: i64) -> String {
    let dt = slot_engine::time::from_millis(base() + minute * MINUTE_MS).unwrap();
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

fn team(busy: &[Vec<(i64, i64)>]) -> (Vec<TeamMember>, HashMap<i64, Vec<BusyInterval>>) {
    let members = (0..busy.len() as i64)
        .map(|id| TeamMember {
            id,
            name: format!("m{}", id),
            timezone: None,
        })
        .collect();
    let intervals = busy
        .iter()
        .enumerate()
        .map(|(id, list)| {
            let list = list
                .iter()
                .map(|&(s, e)| BusyInterval {
                    start: base() + s * MINUTE_MS,
                    end: base() + e * MINUTE_MS,
                    source: BusySource::Event,
                })
                .collect();
            (id as i64, list)
        })
        .collect();
    (members, intervals)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ── Property 1: every slot is on the grid and fits inside the window ────────
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_aligned_and_contained(
        (start, end) in arb_window(),
        duration in arb_duration(),
    ) {
        let window_start = base() + start * MINUTE_MS;
        let window_end = base() + end * MINUTE_MS;
        let slots = generate_slots(&at_minute(start), &at_minute(end), duration);

        for slot in &slots {
            let ms = parse_local_millis(slot).unwrap();
            prop_assert_eq!((ms - base()) % (30 * MINUTE_MS), 0, "off grid: {}", slot);
            prop_assert!(ms >= window_start);
            prop_assert!(ms + duration * MINUTE_MS <= window_end);
        }
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}

// ── Property 2: the generator never misses a grid point that fits ───────────
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_cover_every_fitting_grid_point(
        (start, end) in arb_window(),
        duration in arb_duration(),
    ) {
        let expected: Vec<String> = (0..=(1800 / 30))
            .map(|i| i * 30)
            .filter(|&m| m >= start && m + duration <= end)
            .map(at_minute)
            .collect();

        prop_assert_eq!(generate_slots(&at_minute(start), &at_minute(end), duration), expected);
    }
}

// ── Property 3: available is bounded and total is the team size ─────────────
proptest! {
    #![proptest_config(config())]

    #[test]
    fn available_is_bounded_by_team_size(
        busy in arb_busy(),
        (start, end) in arb_window(),
        duration in arb_duration(),
    ) {
        let (members, intervals) = team(&busy);
        let slots = generate_slots(&at_minute(start), &at_minute(end), duration);
        let scores = compute_availability_matrix(&members, &intervals, &slots, duration);

        prop_assert_eq!(scores.len(), slots.len());
        for score in &scores {
            prop_assert_eq!(score.total, members.len());
            prop_assert!(score.available <= score.total);
            prop_assert_eq!(score.available + score.busy_member_ids.len(), score.total);
        }
    }
}

// ── Property 4: a perfect slot, when any exists, is the best slot ───────────
proptest! {
    #![proptest_config(config())]

    #[test]
    fn first_perfect_slot_is_best(
        busy in arb_busy(),
        (start, end) in arb_window(),
        duration in arb_duration(),
    ) {
        let (members, intervals) = team(&busy);
        let slots = generate_slots(&at_minute(start), &at_minute(end), duration);
        let scores = compute_availability_matrix(&members, &intervals, &slots, duration);

        let perfect = perfect_slots(&scores);
        let best = best_slot(&scores);

        for slot in &perfect {
            let score = scores.iter().find(|s| &s.slot == slot).unwrap();
            prop_assert_eq!(score.available, score.total);
        }
        if let Some(first) = perfect.first() {
            prop_assert_eq!(&best.unwrap().slot, first);
        }
        if let Some(best) = best {
            prop_assert!(scores.iter().all(|s| s.available <= best.available));
        }
        prop_assert_eq!(best.is_none(), scores.is_empty());
    }
}

// ── Property 5: the pipeline is deterministic ───────────────────────────────
proptest! {
    #![proptest_config(config())]

    #[test]
    fn suggestion_is_deterministic(
        busy in arb_busy(),
        (start, end) in arb_window(),
        duration in arb_duration(),
    ) {
        let (members, intervals) = team(&busy);
        let slots = generate_slots(&at_minute(start), &at_minute(end), duration);

        let a = SlotSuggestion::from_scores(
            compute_availability_matrix(&members, &intervals, &slots, duration),
        );
        let b = SlotSuggestion::from_scores(
            compute_availability_matrix(&members, &intervals, &slots, duration),
        );

        prop_assert_eq!(a, b);
    }
}
