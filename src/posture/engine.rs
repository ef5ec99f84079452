use super::angles::{extract_angles, AngleSet, REQUIRED_LANDMARKS};
use super::classify::TierSet;
use super::confidence;
use super::error::AnalysisError;
use super::feedback;
use super::landmarks::{Detection, LandmarkSet};
use super::score::{aggregate, PostureStatus, ScoreResult};

pub const DEFAULT_MIN_VISIBILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Landmarks below this visibility are treated as missing.
    pub min_visibility: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}

/// Pure scoring pipeline: landmarks → angles → tiers → score, status and feedback.
///
/// Holds no mutable state, so one instance is shared across every request.
#[derive(Debug, Clone, Default)]
pub struct PostureEngine {
    config: EngineConfig,
}

impl PostureEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Only `Detection::NotDetected` means nobody is in frame. A set missing
    /// required landmarks, even an empty one, is `LandmarksUnusable`.
    pub fn analyze(&self, landmarks: &LandmarkSet) -> Result<ScoreResult, AnalysisError> {
        let angles = extract_angles(landmarks, self.config.min_visibility)?;
        let confidence = confidence::estimate(landmarks, &REQUIRED_LANDMARKS);
        Ok(self.score(angles, confidence))
    }

    pub fn analyze_detection(&self, detection: &Detection) -> Result<ScoreResult, AnalysisError> {
        match detection {
            Detection::NotDetected => Err(AnalysisError::NoPersonDetected),
            Detection::Landmarks(set) => self.analyze(set),
        }
    }

    /// Scores a precomputed angle set. Confidence is carried through and does
    /// not affect the score.
    pub fn score(&self, angles: AngleSet, confidence: f64) -> ScoreResult {
        let tiers = TierSet::from_angles(&angles);
        let posture_score = aggregate(&tiers);

        ScoreResult {
            angles,
            posture_score,
            posture_status: PostureStatus::from_score(posture_score),
            confidence,
            feedback: feedback::generate(&tiers),
        }
    }
}
