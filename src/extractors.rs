use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::response::AppError;

/// `axum::Json<T>` that rejects with the API error envelope.
///
/// Field errors keep serde's path (`landmarks[2].x: invalid type ...`) so a
/// client can find the offending landmark. Oversized frames map to 413.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| JsonBody(value))
            .map_err(rejection_to_app_error)
    }
}

fn rejection_to_app_error(rejection: JsonRejection) -> AppError {
    tracing::warn!(status = %rejection.status(), error = %rejection, "Rejected request body");
    match rejection {
        JsonRejection::JsonDataError(e) => {
            AppError::bad_request("INVALID_REQUEST_BODY", &field_error(&e.body_text()))
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::bad_request("INVALID_REQUEST_BODY", "Request body is not valid JSON")
        }
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(
            "INVALID_REQUEST_BODY",
            "Expected Content-Type: application/json",
        ),
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            AppError::payload_too_large("Request body exceeds the configured size limit")
        }
        _ => AppError::bad_request("INVALID_REQUEST_BODY", "Request body could not be read"),
    }
}

fn field_error(body_text: &str) -> String {
    // axum prefixes serde's message with a fixed sentence.
    let detail = body_text
        .split_once(": ")
        .map(|(_, rest)| rest)
        .unwrap_or(body_text);
    format!("Invalid request body: {detail}")
}
