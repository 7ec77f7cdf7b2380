use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum InteractionKind {
    Quiz,
    Assignment,
    BossBattle,
    Flashcard,
    Doubt,
    #[default]
    Other,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::BossBattle => "boss_battle",
            Self::Flashcard => "flashcard",
            Self::Doubt => "doubt",
            Self::Other => "other",
        }
    }

    /// Unknown labels degrade to `Other`; they never fail.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "quiz" => Self::Quiz,
            "assignment" => Self::Assignment,
            "boss_battle" => Self::BossBattle,
            "flashcard" => Self::Flashcard,
            "doubt" => Self::Doubt,
            _ => Self::Other,
        }
    }
}

/// One scored learner interaction. Ephemeral input, not persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOutcome {
    pub is_correct: bool,
    pub time_spent_seconds: f64,
    /// How many attempts at this topic have occurred, including this one.
    pub attempt_index: u32,
    pub interaction_type: InteractionKind,
}

impl Default for InteractionOutcome {
    fn default() -> Self {
        Self {
            is_correct: false,
            time_spent_seconds: 0.0,
            attempt_index: 1,
            interaction_type: InteractionKind::Other,
        }
    }
}

/// Per-topic running mastery state. Owned by the caller's storage layer;
/// the engine only reads and rewrites its numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMasterySnapshot {
    pub topic_id: String,
    pub score: f64,
    pub attempts: u32,
    pub correct_count: u32,
    /// Accuracy over a recent sliding window, maintained by the caller.
    pub recent_accuracy: f64,
    pub last_updated_ts: i64,
}

impl TopicMasterySnapshot {
    pub fn new(topic_id: impl Into<String>) -> Self {
        Self {
            topic_id: topic_id.into(),
            score: 0.0,
            attempts: 0,
            correct_count: 0,
            recent_accuracy: 0.0,
            last_updated_ts: 0,
        }
    }
}

/// One scored event in a learner's history. Append-only, immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
    pub activity_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "improving" => Self::Improving,
            "declining" => Self::Declining,
            _ => Self::Stable,
        }
    }
}

/// Longitudinal summary over a time-ordered sample series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub average_score: f64,
    pub recent_average_score: f64,
    pub trend: Trend,
    pub consistency: u32,
    pub strong_areas: Vec<String>,
    pub weak_areas: Vec<String>,
    pub most_active_time: String,
    /// Requires session-boundary data the analyzer does not receive.
    /// Always 0 here; callers must not read meaning into it.
    pub average_session_length: f64,
}

impl Default for PerformanceAnalysis {
    fn default() -> Self {
        Self {
            average_score: 0.0,
            recent_average_score: 0.0,
            trend: Trend::Stable,
            consistency: 0,
            strong_areas: Vec::new(),
            weak_areas: Vec::new(),
            most_active_time: "N/A".to_string(),
            average_session_length: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessReason {
    InsufficientPractice,
    FundamentalMisunderstanding,
    ConceptualGap,
    DecliningPerformance,
    NeedsReinforcement,
}

impl WeaknessReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientPractice => "insufficient_practice",
            Self::FundamentalMisunderstanding => "fundamental_misunderstanding",
            Self::ConceptualGap => "conceptual_gap",
            Self::DecliningPerformance => "declining_performance",
            Self::NeedsReinforcement => "needs_reinforcement",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::InsufficientPractice => {
                "Attempt more exercises on this topic to build a reliable picture of your mastery."
            }
            Self::FundamentalMisunderstanding => {
                "Revisit the fundamentals of this topic before attempting more questions."
            }
            Self::ConceptualGap => {
                "Review the core concepts and work through guided examples to close the gap."
            }
            Self::DecliningPerformance => {
                "Your recent attempts have slipped; schedule a refresher session soon."
            }
            Self::NeedsReinforcement => {
                "Keep practicing this topic regularly to push your score above the weak threshold."
            }
        }
    }
}

/// Derived, read-only output of the weakness detector. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessResult {
    pub topic_id: String,
    pub weakness_score: f64,
    pub reason: WeaknessReason,
    pub recommendation: String,
}

/// Outcome of one serialized read-modify-write on a topic snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryUpdate {
    pub topic_id: String,
    pub previous_score: f64,
    pub new_score: f64,
    pub confidence: u8,
    pub attempts: u32,
    pub correct_count: u32,
}
