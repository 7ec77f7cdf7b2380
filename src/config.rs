use serde::{Deserialize, Serialize};

use crate::types::InteractionKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryParams {
    pub quiz_weight: f64,
    pub assignment_weight: f64,
    pub boss_battle_weight: f64,
    pub flashcard_weight: f64,
    pub doubt_weight: f64,
    /// Weight for unrecognized interaction labels. A weak signal, never an error.
    pub default_weight: f64,
    /// Floor of the blend weight given to the newest observation.
    pub recency_floor: f64,
    pub recency_gain: f64,
    /// A correct answer at or beyond this many seconds earns the floor factor.
    pub time_window_seconds: f64,
    pub time_factor_floor: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for MasteryParams {
    fn default() -> Self {
        Self {
            quiz_weight: 1.0,
            assignment_weight: 1.0,
            boss_battle_weight: 0.9,
            flashcard_weight: 0.6,
            doubt_weight: 0.3,
            default_weight: 0.5,
            recency_floor: 0.2,
            recency_gain: 0.8,
            time_window_seconds: 120.0,
            time_factor_floor: 0.5,
            min_score: 0.0,
            max_score: 100.0,
        }
    }
}

impl MasteryParams {
    pub fn weight_for(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::Quiz => self.quiz_weight,
            InteractionKind::Assignment => self.assignment_weight,
            InteractionKind::BossBattle => self.boss_battle_weight,
            InteractionKind::Flashcard => self.flashcard_weight,
            InteractionKind::Doubt => self.doubt_weight,
            InteractionKind::Other => self.default_weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceParams {
    /// Attempts needed before data sufficiency saturates at 1.0.
    pub full_confidence_attempts: u32,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        Self {
            full_confidence_attempts: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerParams {
    /// Trailing window for the recent average.
    pub recent_window: usize,
    /// Half-mean gap beyond which the trend counts as improving/declining.
    pub trend_delta: f64,
    pub strong_area_min: f64,
    pub weak_area_max: f64,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            recent_window: 10,
            trend_delta: 5.0,
            strong_area_min: 70.0,
            weak_area_max: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaknessParams {
    /// Topics at or above this score are not weak and are silently excluded.
    pub weak_threshold: f64,
    /// Below this many attempts the only diagnosis is insufficient practice.
    pub min_attempts_for_diagnosis: u32,
    pub fundamental_accuracy_max: f64,
    pub conceptual_accuracy_max: f64,
    pub declining_recent_accuracy_max: f64,
}

impl Default for WeaknessParams {
    fn default() -> Self {
        Self {
            weak_threshold: 40.0,
            min_attempts_for_diagnosis: 3,
            fundamental_accuracy_max: 0.3,
            conceptual_accuracy_max: 0.5,
            declining_recent_accuracy_max: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub mastery: MasteryParams,
    pub confidence: ConfidenceParams,
    pub analyzer: AnalyzerParams,
    pub weakness: WeaknessParams,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MASTERY_WEAK_THRESHOLD") {
            config.weakness.weak_threshold = val.parse().unwrap_or(config.weakness.weak_threshold);
        }
        if let Ok(val) = std::env::var("MASTERY_FULL_CONFIDENCE_ATTEMPTS") {
            config.confidence.full_confidence_attempts = val
                .parse()
                .unwrap_or(config.confidence.full_confidence_attempts);
        }
        if let Ok(val) = std::env::var("MASTERY_RECENT_WINDOW") {
            config.analyzer.recent_window = val.parse().unwrap_or(config.analyzer.recent_window);
        }
        if let Ok(val) = std::env::var("MASTERY_TREND_DELTA") {
            config.analyzer.trend_delta = val.parse().unwrap_or(config.analyzer.trend_delta);
        }

        config
    }
}
