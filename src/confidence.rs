//! Confidence scorer.
//!
//! Measures how much data backs a mastery score, independently of the
//! score itself. Two lucky attempts can produce a high score; confidence
//! stays low until enough attempts accumulate, so callers should surface
//! both numbers.

use crate::config::ConfidenceParams;

/// Confidence in the mastery estimate, as an integer percentage.
///
/// Zero attempts yield zero confidence. Accuracy is clamped to [0, 1] in
/// case the caller violated `correct_count <= attempts`.
pub fn confidence_score(params: &ConfidenceParams, attempts: u32, correct_count: u32) -> u8 {
    if attempts == 0 {
        return 0;
    }
    let accuracy = (correct_count as f64 / attempts as f64).clamp(0.0, 1.0);
    let data_sufficiency =
        (attempts as f64 / params.full_confidence_attempts.max(1) as f64).min(1.0);
    (accuracy * data_sufficiency * 100.0).round() as u8
}
