use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// The error taxonomy surfaced by the API.
///
/// Translation and cache failures never appear here: both adapters are
/// fail-open and degrade silently (original text, origin-store read).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("FAQ not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Central result-to-response mapping: every failure becomes a
/// `{success: false, error}` envelope. Internal errors are logged with
/// their full cause chain and reported with a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(err) => {
                error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
