//! Property-based tests over the public API.
//!
//! Invariants covered:
//! - update and confidence outputs stay in [0, 100] for all valid inputs
//! - the recency factor is non-increasing with floor 0.2 and ceiling 1.0
//! - every sub-threshold snapshot is classified, sorted ascending, stable
//! - analysis of an immutable sample list is idempotent

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use mastery_engine::config::MasteryParams;
use mastery_engine::mastery::recency_factor;
use mastery_engine::{
    InteractionKind, InteractionOutcome, MasteryEngine, PerformanceSample, TopicMasterySnapshot,
};

fn arb_kind() -> impl Strategy<Value = InteractionKind> {
    prop_oneof![
        Just(InteractionKind::Quiz),
        Just(InteractionKind::Assignment),
        Just(InteractionKind::BossBattle),
        Just(InteractionKind::Flashcard),
        Just(InteractionKind::Doubt),
        Just(InteractionKind::Other),
    ]
}

fn arb_outcome() -> impl Strategy<Value = InteractionOutcome> {
    (any::<bool>(), 0.0f64..=7200.0, 0u32..=10_000, arb_kind()).prop_map(
        |(is_correct, time_spent_seconds, attempt_index, interaction_type)| InteractionOutcome {
            is_correct,
            time_spent_seconds,
            attempt_index,
            interaction_type,
        },
    )
}

fn arb_snapshot() -> impl Strategy<Value = TopicMasterySnapshot> {
    ("t[a-z]{1,6}", 0.0f64..=100.0, 0u32..=50, 0.0f64..=1.0).prop_map(
        |(topic_id, score, attempts, recent_accuracy)| {
            let correct_count = attempts / 2;
            TopicMasterySnapshot {
                topic_id,
                score,
                attempts,
                correct_count,
                recent_accuracy,
                last_updated_ts: 0,
            }
        },
    )
}

fn arb_sample() -> impl Strategy<Value = PerformanceSample> {
    (
        0.0f64..=100.0,
        0u32..=23,
        prop_oneof![Just("math"), Just("reading"), Just("science")],
    )
        .prop_map(|(score, hour, activity)| PerformanceSample {
            score,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            activity_type: activity.to_string(),
        })
}

proptest! {
    #[test]
    fn update_output_stays_in_bounds(
        previous in 0.0f64..=100.0,
        outcome in arb_outcome(),
    ) {
        let engine = MasteryEngine::default();
        let new_score = engine.update_mastery(previous, &outcome).unwrap();
        prop_assert!((0.0..=100.0).contains(&new_score), "got {new_score}");
    }

    #[test]
    fn confidence_stays_in_bounds(attempts in 0u32..=5000, correct in 0u32..=5000) {
        let engine = MasteryEngine::default();
        let confidence = engine.compute_confidence(attempts, correct);
        prop_assert!(confidence <= 100);
        if attempts == 0 {
            prop_assert_eq!(confidence, 0);
        }
    }

    #[test]
    fn recency_factor_never_increases(earlier in 1u32..=5000, gap in 0u32..=5000) {
        let params = MasteryParams::default();
        let later = earlier.saturating_add(gap);
        let r_earlier = recency_factor(&params, earlier);
        let r_later = recency_factor(&params, later);
        prop_assert!(r_later <= r_earlier);
        prop_assert!((0.2..=1.0).contains(&r_earlier));
        prop_assert!((0.2..=1.0).contains(&r_later));
    }

    #[test]
    fn detector_classifies_every_weak_topic_in_stable_order(
        snapshots in prop::collection::vec(arb_snapshot(), 0..40),
    ) {
        let engine = MasteryEngine::default();
        let results = engine.detect_weaknesses(&snapshots);

        let weak_inputs = snapshots.iter().filter(|s| s.score < 40.0).count();
        prop_assert_eq!(results.len(), weak_inputs);

        for pair in results.windows(2) {
            prop_assert!(pair[0].weakness_score <= pair[1].weakness_score);
        }
        for result in &results {
            prop_assert!(result.weakness_score < 40.0);
            prop_assert!(!result.recommendation.is_empty());
        }
    }

    #[test]
    fn analysis_is_idempotent(samples in prop::collection::vec(arb_sample(), 0..60)) {
        let engine = MasteryEngine::default();
        let first = engine.analyze_performance(&samples);
        let second = engine.analyze_performance(&samples);
        prop_assert_eq!(first, second);
    }
}
