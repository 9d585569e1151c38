//! Error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::validation::ValidationError;

/// Message sent instead of storage details.
const STORAGE_FAILURE: &str = "Internal storage error";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Stats(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "storage failure");
                STORAGE_FAILURE.to_string()
            }
            Self::Stats(e) => {
                tracing::error!(error = %e, "inconsistent records");
                self.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// A body that failed to deserialize is a validation failure, not a 422.
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::message(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    async fn body(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::not_found("Game", "x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Conflict("taken".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_storage_failure_body_is_generic() {
        let id = uuid::Uuid::new_v4();
        let response = Error::from(StoreError::UnknownPlayer(id)).into_response();

        let (status, text) = body(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let parsed: ErrorBody = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.error, STORAGE_FAILURE);
        assert_eq!(parsed.error, "Internal storage error");
        assert!(!text.contains(&id.to_string()), "{text}");
    }
}
