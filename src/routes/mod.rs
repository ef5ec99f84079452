pub mod health;
pub mod history;
pub mod posture;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};

use crate::middleware::request_id;
use crate::response::ErrorBody;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    let posture_routes = Router::new()
        .merge(posture::router())
        .merge(history::router());

    let api_routes = Router::new()
        .nest("/posture", posture_routes)
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .fallback(fallback_404)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

async fn fallback_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found".to_string(),
        )),
    )
}
