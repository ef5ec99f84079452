use crate::detector::{ImageFrame, LandmarkDetector};
use crate::posture::{AnalysisError, Detection, NamedLandmark, PostureEngine, ScoreResult};
use crate::response::AppError;
use crate::validation::validate_frame_dimension;

/// What a client may send for one frame.
#[derive(Debug, Clone)]
pub enum FrameInput {
    /// Base64 image, optionally as a data URL.
    Image(String),
    /// Landmarks computed on the client. With a frame size, coordinates are
    /// taken as normalized and scaled to pixels before measuring angles.
    Landmarks {
        landmarks: Vec<NamedLandmark>,
        frame_size: Option<(f64, f64)>,
    },
}

impl FrameInput {
    pub fn from_parts(
        image: Option<String>,
        landmarks: Option<Vec<NamedLandmark>>,
        frame_width: Option<f64>,
        frame_height: Option<f64>,
    ) -> Result<Self, AnalysisError> {
        match (image, landmarks) {
            (Some(_), Some(_)) => Err(AnalysisError::malformed(
                "Send either an image or landmarks, not both",
            )),
            (Some(image), None) => Ok(FrameInput::Image(image)),
            (None, Some(landmarks)) => Ok(FrameInput::Landmarks {
                landmarks,
                frame_size: frame_size(frame_width, frame_height)?,
            }),
            (None, None) => Err(AnalysisError::malformed(
                "Either an image or landmarks is required",
            )),
        }
    }
}

pub fn frame_size(
    width: Option<f64>,
    height: Option<f64>,
) -> Result<Option<(f64, f64)>, AnalysisError> {
    match (width, height) {
        (None, None) => Ok(None),
        (Some(w), Some(h)) => {
            validate_frame_dimension("frameWidth", w).map_err(AnalysisError::malformed)?;
            validate_frame_dimension("frameHeight", h).map_err(AnalysisError::malformed)?;
            Ok(Some((w, h)))
        }
        _ => Err(AnalysisError::malformed(
            "frameWidth and frameHeight must be sent together",
        )),
    }
}

pub fn landmark_detection(
    landmarks: Vec<NamedLandmark>,
    frame_size: Option<(f64, f64)>,
) -> Detection {
    match (Detection::from_wire(Some(landmarks)), frame_size) {
        (Detection::Landmarks(set), Some((w, h))) => Detection::Landmarks(set.scaled(w, h)),
        (detection, _) => detection,
    }
}

/// Turns client input into landmarks. Image decoding runs on the blocking
/// pool; the detector call is the only network I/O.
pub async fn detect(
    detector: &dyn LandmarkDetector,
    input: FrameInput,
) -> Result<Detection, AppError> {
    match input {
        FrameInput::Landmarks {
            landmarks,
            frame_size,
        } => Ok(landmark_detection(landmarks, frame_size)),
        FrameInput::Image(encoded) => {
            let frame = tokio::task::spawn_blocking(move || ImageFrame::from_base64(&encoded))
                .await
                .map_err(|e| AppError::internal(&format!("image decode task failed: {e}")))??;
            tracing::debug!(
                detector = detector.name(),
                width = frame.width(),
                height = frame.height(),
                "Sending frame to pose detector"
            );
            Ok(detector.detect(&frame).await?)
        }
    }
}

pub async fn score_frame(
    engine: &PostureEngine,
    detector: &dyn LandmarkDetector,
    input: FrameInput,
) -> Result<ScoreResult, AppError> {
    let detection = detect(detector, input).await?;
    Ok(engine.analyze_detection(&detection)?)
}

pub fn is_low_confidence(result: &ScoreResult, threshold: f64) -> bool {
    result.confidence < threshold
}
