//! Posture scoring engine.
//!
//! Everything in this module is synchronous and free of I/O so it can run on
//! any thread and be tested without a server.

pub mod angles;
pub mod classify;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod landmarks;
pub mod score;

pub use angles::{AngleSet, Metric};
pub use classify::{Tier, TierSet};
pub use engine::{EngineConfig, PostureEngine};
pub use error::AnalysisError;
pub use landmarks::{BodyPart, Detection, Landmark, LandmarkSet, NamedLandmark};
pub use score::{PostureStatus, ScoreResult};

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
