//! Mastery update engine.
//!
//! Exponentially-weighted blend of the previous running score with one new
//! observation. Recent behavior dominates while attempts are few; the blend
//! weight decays toward a floor so the estimate stiffens instead of
//! oscillating indefinitely.

use crate::config::MasteryParams;
use crate::types::InteractionOutcome;

/// Blend weight given to the newest observation.
///
/// Starts at 1.0 on the first attempt and decays toward `recency_floor`
/// as attempts accumulate. An attempt index below 1 is clamped to 1.
pub fn recency_factor(params: &MasteryParams, attempt_index: u32) -> f64 {
    let index = attempt_index.max(1) as f64;
    (params.recency_floor + params.recency_gain / index).min(1.0)
}

/// Speed credit for a correct answer: faster answers count more, flooring
/// at `time_factor_floor` once the full time window is used up. Speed is
/// irrelevant to an incorrect answer, which always gets 1.0.
pub fn time_factor(params: &MasteryParams, is_correct: bool, time_spent_seconds: f64) -> f64 {
    if !is_correct {
        return 1.0;
    }
    let spent = time_spent_seconds.max(0.0);
    (1.0 - spent / params.time_window_seconds).max(params.time_factor_floor)
}

/// Blends `previous_score` with one interaction outcome and returns the new
/// running mastery score, clamped to the configured range.
///
/// Callers are expected to have validated numeric inputs as finite; this
/// function clamps out-of-range values defensively rather than erroring.
pub fn update_score(
    params: &MasteryParams,
    previous_score: f64,
    outcome: &InteractionOutcome,
) -> f64 {
    let previous = if previous_score < params.min_score || previous_score > params.max_score {
        tracing::warn!(previous_score, "previous mastery score out of range, clamping");
        previous_score.clamp(params.min_score, params.max_score)
    } else {
        previous_score
    };

    let type_weight = params.weight_for(outcome.interaction_type);
    let recency = recency_factor(params, outcome.attempt_index);
    let raw_performance = if outcome.is_correct {
        params.max_score
    } else {
        params.min_score
    };
    let time = time_factor(params, outcome.is_correct, outcome.time_spent_seconds);

    let update = raw_performance * type_weight * time;
    let blended = previous * (1.0 - recency) + update * recency;
    blended.clamp(params.min_score, params.max_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InteractionKind;

    fn params() -> MasteryParams {
        MasteryParams::default()
    }

    fn correct_quiz(time_spent_seconds: f64, attempt_index: u32) -> InteractionOutcome {
        InteractionOutcome {
            is_correct: true,
            time_spent_seconds,
            attempt_index,
            interaction_type: InteractionKind::Quiz,
        }
    }

    #[test]
    fn first_fast_correct_quiz_dominates_previous_score() {
        let outcome = correct_quiz(10.0, 1);
        let new_score = update_score(&params(), 50.0, &outcome);
        // r = 1.0, t = 1 - 10/120, u = 100 * t
        let expected = 100.0 * (1.0 - 10.0 / 120.0);
        assert!((new_score - expected).abs() < 1e-9, "got {new_score}");
    }

    #[test]
    fn incorrect_flashcard_late_in_history_decays_gently() {
        let outcome = InteractionOutcome {
            is_correct: false,
            time_spent_seconds: 5.0,
            attempt_index: 5,
            interaction_type: InteractionKind::Flashcard,
        };
        let new_score = update_score(&params(), 70.0, &outcome);
        // r = 0.2 + 0.8/5 = 0.36, u = 0, so 70 * 0.64
        assert!((new_score - 44.8).abs() < 1e-9, "got {new_score}");
    }

    #[test]
    fn recency_factor_is_non_increasing_with_floor() {
        let params = params();
        let mut prev = recency_factor(&params, 1);
        assert!((prev - 1.0).abs() < 1e-12);
        for index in 2..200u32 {
            let current = recency_factor(&params, index);
            assert!(current <= prev, "recency rose at attempt {index}");
            assert!(current >= params.recency_floor);
            prev = current;
        }
    }

    #[test]
    fn attempt_index_zero_is_treated_as_first_attempt() {
        let params = params();
        assert_eq!(recency_factor(&params, 0), recency_factor(&params, 1));
    }

    #[test]
    fn slow_correct_answer_hits_time_floor() {
        let params = params();
        assert_eq!(time_factor(&params, true, 120.0), 0.5);
        assert_eq!(time_factor(&params, true, 3600.0), 0.5);
        assert_eq!(time_factor(&params, false, 3600.0), 1.0);
    }

    #[test]
    fn out_of_range_previous_score_is_clamped_on_input() {
        let outcome = InteractionOutcome {
            is_correct: false,
            attempt_index: 10,
            ..Default::default()
        };
        // r = 0.28; a previous score of 250 must blend from 100, not 250.
        let new_score = update_score(&params(), 250.0, &outcome);
        assert!((new_score - 72.0).abs() < 1e-9, "got {new_score}");

        let from_below = update_score(&params(), -40.0, &outcome);
        assert_eq!(from_below, 0.0);
    }

    #[test]
    fn output_stays_in_bounds_across_kinds() {
        let params = params();
        for kind in [
            InteractionKind::Quiz,
            InteractionKind::Assignment,
            InteractionKind::BossBattle,
            InteractionKind::Flashcard,
            InteractionKind::Doubt,
            InteractionKind::Other,
        ] {
            let outcome = InteractionOutcome {
                is_correct: true,
                time_spent_seconds: 0.0,
                attempt_index: 1,
                interaction_type: kind,
            };
            let score = update_score(&params, 100.0, &outcome);
            assert!((0.0..=100.0).contains(&score), "{kind:?} gave {score}");
        }
    }

    #[test]
    fn doubt_session_is_a_weak_signal() {
        let quiz = correct_quiz(10.0, 1);
        let doubt = InteractionOutcome {
            interaction_type: InteractionKind::Doubt,
            ..quiz.clone()
        };
        let from_quiz = update_score(&params(), 20.0, &quiz);
        let from_doubt = update_score(&params(), 20.0, &doubt);
        assert!(from_doubt < from_quiz);
    }
}
