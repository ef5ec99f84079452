use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::identity::CallerIdentity;
use crate::posture::{NamedLandmark, PostureStatus, ScoreResult};
use crate::response::{created, ok, AppError};
use crate::services::analysis::{self, FrameInput};
use crate::state::AppState;
use crate::store::operations::posture_records::PostureRecord;
use crate::validation::validate_mock_scores;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/score", post(score_landmarks))
        .route("/analyze", post(analyze_frame))
        .route("/mock-sessions", post(create_mock_session))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequest {
    landmarks: Vec<NamedLandmark>,
    frame_width: Option<f64>,
    frame_height: Option<f64>,
}

async fn score_landmarks(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let frame_size = analysis::frame_size(req.frame_width, req.frame_height)?;
    let detection = analysis::landmark_detection(req.landmarks, frame_size);
    let result = state.engine().analyze_detection(&detection)?;
    Ok(ok(result))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    image: Option<String>,
    landmarks: Option<Vec<NamedLandmark>>,
    frame_width: Option<f64>,
    frame_height: Option<f64>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    result: ScoreResult,
    record_id: String,
    low_confidence: bool,
}

async fn analyze_frame(
    identity: CallerIdentity,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = FrameInput::from_parts(req.image, req.landmarks, req.frame_width, req.frame_height)?;
    let result = analysis::score_frame(state.engine(), state.detector(), input).await?;

    let record = PostureRecord::from_score(&identity.user_id, &result, Utc::now());
    state.store().create_posture_record(&record)?;

    let low_confidence = analysis::is_low_confidence(
        &result,
        state.config().engine.low_confidence_threshold,
    );
    tracing::info!(
        user_id = %identity.user_id,
        record_id = %record.id,
        score = result.posture_score,
        confidence = result.confidence,
        low_confidence,
        "Posture analyzed"
    );

    Ok(created(AnalyzeResponse {
        result,
        record_id: record.id,
        low_confidence,
    }))
}

#[derive(Debug, Deserialize)]
struct MockSessionRequest {
    scores: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct MockSessionResponse {
    avg_score: u8,
    status: PostureStatus,
    record_id: String,
}

/// Average of validated `0..=100` scores, rounded half away from zero.
fn average_score(scores: &[i64]) -> u8 {
    let sum: i64 = scores.iter().sum();
    let avg = (sum as f64 / scores.len() as f64).round();
    avg.clamp(0.0, 100.0) as u8
}

async fn create_mock_session(
    identity: CallerIdentity,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<MockSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_mock_scores(&req.scores).map_err(|e| AppError::bad_request("VALIDATION_ERROR", &e))?;

    let avg_score = average_score(&req.scores);
    let record = PostureRecord::mock_session(
        &identity.user_id,
        avg_score,
        req.scores.len() as u32,
        Utc::now(),
    );
    state.store().create_posture_record(&record)?;

    tracing::info!(
        user_id = %identity.user_id,
        record_id = %record.id,
        samples = req.scores.len(),
        avg_score,
        "Mock session saved"
    );

    Ok(created(MockSessionResponse {
        avg_score,
        status: record.posture_status,
        record_id: record.id,
    }))
}
