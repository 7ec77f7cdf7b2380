//! Weakness detector.
//!
//! Filters topic snapshots below the weak threshold and classifies each
//! one with a root cause via an ordered decision tree. Branches are not
//! mutually exclusive by construction; evaluation order is part of the
//! contract and the first match wins.

use crate::config::WeaknessParams;
use crate::types::{TopicMasterySnapshot, WeaknessReason, WeaknessResult};

/// Ranks weak topics ascending by mastery score, weakest first. Topics at
/// or above the threshold are silently excluded. The sort is stable, so
/// equal-score topics keep their input order.
pub fn detect(
    params: &WeaknessParams,
    snapshots: &[TopicMasterySnapshot],
) -> Vec<WeaknessResult> {
    let mut results: Vec<WeaknessResult> = snapshots
        .iter()
        .filter(|snapshot| snapshot.score < params.weak_threshold)
        .map(|snapshot| {
            let reason = classify(params, snapshot);
            WeaknessResult {
                topic_id: snapshot.topic_id.clone(),
                weakness_score: snapshot.score,
                reason,
                recommendation: reason.recommendation().to_string(),
            }
        })
        .collect();

    results.sort_by(|a, b| a.weakness_score.total_cmp(&b.weakness_score));

    tracing::debug!(
        candidates = snapshots.len(),
        weak = results.len(),
        "weakness detection complete"
    );

    results
}

/// Root-cause decision tree, evaluated top to bottom.
pub fn classify(params: &WeaknessParams, snapshot: &TopicMasterySnapshot) -> WeaknessReason {
    if snapshot.attempts < params.min_attempts_for_diagnosis {
        return WeaknessReason::InsufficientPractice;
    }

    let accuracy = snapshot.correct_count as f64 / snapshot.attempts as f64;
    if accuracy < params.fundamental_accuracy_max {
        WeaknessReason::FundamentalMisunderstanding
    } else if accuracy < params.conceptual_accuracy_max {
        WeaknessReason::ConceptualGap
    } else if snapshot.recent_accuracy < params.declining_recent_accuracy_max {
        // Historical accuracy is acceptable but the recent window dropped:
        // "getting worse" rather than "never understood it".
        WeaknessReason::DecliningPerformance
    } else {
        WeaknessReason::NeedsReinforcement
    }
}
