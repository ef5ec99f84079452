//! Landmark providers.
//!
//! Pose estimation itself happens outside this service. A provider turns an
//! encoded frame into a [`Detection`]; the scoring engine never sees pixels.

pub mod frame;
pub mod http;

use std::sync::Arc;

pub use frame::ImageFrame;
pub use http::HttpLandmarkDetector;

use crate::config::PoseDetectorConfig;
use crate::posture::Detection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectorError {
    #[error("pose detector is disabled")]
    Disabled,
    #[error("pose detector timed out")]
    Timeout,
    #[error("pose detector network error: {0}")]
    Network(String),
    #[error("pose detector returned an invalid response: {0}")]
    BadResponse(String),
}

impl DetectorError {
    pub fn code(&self) -> &'static str {
        match self {
            DetectorError::Disabled => "POSE_DETECTOR_UNAVAILABLE",
            _ => "POSE_DETECTOR_FAILED",
        }
    }
}

#[axum::async_trait]
pub trait LandmarkDetector: Send + Sync {
    fn name(&self) -> &'static str;

    async fn detect(&self, frame: &ImageFrame) -> Result<Detection, DetectorError>;
}

/// Used when no pose service is configured. Scoring of client-supplied
/// landmarks keeps working.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledDetector;

#[axum::async_trait]
impl LandmarkDetector for DisabledDetector {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn detect(&self, _frame: &ImageFrame) -> Result<Detection, DetectorError> {
        Err(DetectorError::Disabled)
    }
}

pub fn from_config(config: &PoseDetectorConfig) -> Arc<dyn LandmarkDetector> {
    if config.enabled && !config.service_url.trim().is_empty() {
        tracing::info!(url = %config.service_url, "Pose detector enabled");
        Arc::new(HttpLandmarkDetector::new(config))
    } else {
        if config.enabled {
            tracing::warn!("POSE_DETECTOR_ENABLED is set but POSE_SERVICE_URL is empty");
        }
        tracing::info!("Pose detector disabled, image analysis unavailable");
        Arc::new(DisabledDetector)
    }
}
