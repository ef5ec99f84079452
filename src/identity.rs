use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::response::AppError;
use crate::validation::validate_user_id;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller, as asserted by the gateway in front of this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized("Missing x-user-id header"))?
            .to_str()
            .map_err(|_| AppError::unauthorized("Invalid x-user-id header"))?
            .trim();

        validate_user_id(raw).map_err(AppError::unauthorized)?;

        Ok(Self {
            user_id: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};

    use super::*;

    async fn extract(header: Option<&str>) -> Result<CallerIdentity, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CallerIdentity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_valid_id() {
        let identity = extract(Some("candidate-7")).await.unwrap();
        assert_eq!(identity.user_id, "candidate-7");
    }

    #[tokio::test]
    async fn rejects_missing_or_invalid_id() {
        for header in [None, Some(""), Some("a:b"), Some("two words")] {
            let err = extract(header).await.unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED, "{header:?}");
            assert_eq!(err.code, "UNAUTHORIZED");
        }
    }
}
