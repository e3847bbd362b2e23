//! Error responses of the HTTP API

use crate::search::{SearchError, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to API callers as `{"detail": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API key")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("internal error while searching: {0}")]
    Search(#[from] SearchError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Search(ref err) = self {
            tracing::error!(error = ?err, "Search request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
