//! Adaptive mastery and weakness analytics engine.
//!
//! Converts a learner's raw interaction history into per-topic mastery
//! scores, a confidence measure for each score, longitudinal performance
//! trends, and a ranked list of weak topics with classified root causes.
//!
//! All four operations are pure, CPU-bound, and synchronous. Persistence,
//! event sourcing, and presentation are the caller's concern; the only
//! shared-state contract is the per-(learner, topic) serialization of the
//! update path, which [`engine::MasteryEngine`] owns.

pub mod analyzer;
pub mod config;
pub mod confidence;
pub mod engine;
pub mod mastery;
pub mod types;
pub mod weakness;

pub use config::EngineConfig;
pub use engine::{EngineError, MasteryEngine};
pub use types::*;
