//! Engine facade.
//!
//! Bundles the four analytics operations behind one configured entry point
//! and owns the per-(learner, topic) serialization required by the update
//! path. A naive read-then-write of a shared snapshot can lose an update
//! when the same learner/topic pair is processed twice concurrently (a
//! duplicate submission or a retried request); `apply_interaction` holds a
//! keyed lock across the whole read-modify-write instead. Updates to
//! different keys proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::types::{
    InteractionOutcome, MasteryUpdate, PerformanceAnalysis, PerformanceSample,
    TopicMasterySnapshot, WeaknessResult,
};
use crate::{analyzer, confidence, mastery, weakness};

/// Malformed-but-structurally-valid input degrades to documented defaults
/// and is never an error. The one hard failure is a non-finite number,
/// which would silently poison every future blended update for the topic.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("non-finite {field}: {value}")]
    NonFiniteInput { field: &'static str, value: f64 },
}

type TopicKey = (String, String);

pub struct MasteryEngine {
    config: EngineConfig,
    update_locks: Mutex<HashMap<TopicKey, Arc<Mutex<()>>>>,
}

impl MasteryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            update_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Blends one interaction outcome into a previous mastery score.
    /// Pure; see [`crate::mastery::update_score`] for the algorithm.
    pub fn update_mastery(
        &self,
        previous_score: f64,
        outcome: &InteractionOutcome,
    ) -> Result<f64, EngineError> {
        ensure_finite("previousScore", previous_score)?;
        ensure_finite("timeSpentSeconds", outcome.time_spent_seconds)?;
        Ok(mastery::update_score(&self.config.mastery, previous_score, outcome))
    }

    /// How much data backs the mastery score, as an integer percentage.
    pub fn compute_confidence(&self, attempts: u32, correct_count: u32) -> u8 {
        confidence::confidence_score(&self.config.confidence, attempts, correct_count)
    }

    /// Longitudinal summary of a time-ordered sample series.
    pub fn analyze_performance(&self, samples: &[PerformanceSample]) -> PerformanceAnalysis {
        analyzer::analyze(&self.config.analyzer, samples)
    }

    /// Ranked weak topics with classified root causes, weakest first.
    pub fn detect_weaknesses(&self, snapshots: &[TopicMasterySnapshot]) -> Vec<WeaknessResult> {
        weakness::detect(&self.config.weakness, snapshots)
    }

    /// The serialized read-modify-write for one interaction: updates the
    /// score, bumps the counters, stamps the snapshot, and reports the new
    /// confidence, all under the `(learner_id, topic_id)` lock.
    pub fn apply_interaction(
        &self,
        learner_id: &str,
        topic_id: &str,
        snapshot: &mut TopicMasterySnapshot,
        outcome: &InteractionOutcome,
    ) -> Result<MasteryUpdate, EngineError> {
        let lock = self.topic_lock(learner_id, topic_id);
        let _guard = lock.lock();

        let previous_score = snapshot.score;
        let new_score = self.update_mastery(previous_score, outcome)?;

        snapshot.score = new_score;
        snapshot.attempts = snapshot.attempts.saturating_add(1);
        if outcome.is_correct {
            snapshot.correct_count = snapshot.correct_count.saturating_add(1);
        }
        snapshot.last_updated_ts = Utc::now().timestamp_millis();

        let confidence = self.compute_confidence(snapshot.attempts, snapshot.correct_count);

        Ok(MasteryUpdate {
            topic_id: snapshot.topic_id.clone(),
            previous_score,
            new_score,
            confidence,
            attempts: snapshot.attempts,
            correct_count: snapshot.correct_count,
        })
    }

    /// Runs `f` under the `(learner_id, topic_id)` lock. For callers that
    /// need to wrap their own load-update-store cycle in the same critical
    /// section `apply_interaction` uses.
    pub fn with_topic_lock<R>(&self, learner_id: &str, topic_id: &str, f: impl FnOnce() -> R) -> R {
        let lock = self.topic_lock(learner_id, topic_id);
        let _guard = lock.lock();
        f()
    }

    fn topic_lock(&self, learner_id: &str, topic_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.update_locks.lock();
        locks
            .entry((learner_id.to_string(), topic_id.to_string()))
            .or_default()
            .clone()
    }
}

impl Default for MasteryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteInput { field, value })
    }
}
