use serde::Deserialize;

use super::{DetectorError, ImageFrame, LandmarkDetector};
use crate::config::PoseDetectorConfig;
use crate::posture::{BodyPart, Detection, NamedLandmark};

/// Reply of the external pose service. `landmarks` is null or empty when
/// nobody is in the picture.
#[derive(Debug, Deserialize)]
struct PoseServiceResponse {
    #[serde(default)]
    landmarks: Option<Vec<WireLandmark>>,
}

/// Services either name their keypoints or key them by MediaPipe Pose index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireLandmark {
    Named(NamedLandmark),
    Indexed {
        index: usize,
        x: f64,
        y: f64,
        #[serde(default = "full_visibility")]
        visibility: f64,
    },
}

fn full_visibility() -> f64 {
    1.0
}

impl From<WireLandmark> for NamedLandmark {
    fn from(wire: WireLandmark) -> Self {
        match wire {
            WireLandmark::Named(named) => named,
            WireLandmark::Indexed {
                index,
                x,
                y,
                visibility,
            } => NamedLandmark {
                // Indices outside the COCO subset keep a name that no body
                // part parses, so they are dropped like unknown names.
                name: BodyPart::from_mediapipe_index(index)
                    .map(|part| part.as_str().to_string())
                    .unwrap_or_else(|| format!("mediapipe_{index}")),
                x,
                y,
                visibility,
            },
        }
    }
}

/// Sends encoded frames to a pose-estimation service over HTTP.
///
/// The service answers with normalized coordinates, which are scaled to the
/// frame's pixel size so that angles are measured in an undistorted space.
#[derive(Debug, Clone)]
pub struct HttpLandmarkDetector {
    client: reqwest::Client,
    url: String,
}

impl HttpLandmarkDetector {
    pub fn new(config: &PoseDetectorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            url: config.service_url.clone(),
        }
    }
}

fn map_request_error(err: reqwest::Error) -> DetectorError {
    if err.is_timeout() {
        DetectorError::Timeout
    } else if err.is_decode() {
        DetectorError::BadResponse(err.to_string())
    } else {
        DetectorError::Network(err.to_string())
    }
}

#[axum::async_trait]
impl LandmarkDetector for HttpLandmarkDetector {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn detect(&self, frame: &ImageFrame) -> Result<Detection, DetectorError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, frame.mime_type())
            .body(frame.bytes().to_vec())
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetectorError::BadResponse(format!(
                "pose service returned {status}"
            )));
        }

        let body: PoseServiceResponse = response.json().await.map_err(map_request_error)?;
        let landmarks = body
            .landmarks
            .map(|list| list.into_iter().map(NamedLandmark::from).collect());
        let detection = match Detection::from_wire(landmarks) {
            Detection::Landmarks(set) => {
                Detection::Landmarks(set.scaled(f64::from(frame.width()), f64::from(frame.height())))
            }
            Detection::NotDetected => Detection::NotDetected,
        };

        if let Detection::Landmarks(set) = &detection {
            tracing::debug!(landmarks = set.len(), "Pose service returned landmarks");
        }
        Ok(detection)
    }
}
