use thiserror::Error;

/// Reasons an analysis produced no score. None of them are retryable for
/// the same frame; callers capture a new frame instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no person detected")]
    NoPersonDetected,
    #[error("landmarks unusable: {reason}")]
    LandmarksUnusable { reason: String },
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl AnalysisError {
    pub fn unusable(reason: impl Into<String>) -> Self {
        AnalysisError::LandmarksUnusable {
            reason: reason.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AnalysisError::MalformedInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::NoPersonDetected => "NO_PERSON_DETECTED",
            AnalysisError::LandmarksUnusable { .. } => "LANDMARKS_UNUSABLE",
            AnalysisError::MalformedInput(_) => "MALFORMED_INPUT",
        }
    }

    /// Message safe to show to the person in front of the camera.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::NoPersonDetected => "No person detected. Please ensure your full upper \
                 body is visible and the room is well lit."
                .to_string(),
            AnalysisError::LandmarksUnusable { .. } => "Your shoulders, ears and hips must be \
                 clearly visible. Move fully into frame or improve the lighting."
                .to_string(),
            AnalysisError::MalformedInput(message) => message.clone(),
        }
    }
}
