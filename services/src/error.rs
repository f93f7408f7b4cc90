//! JSON error responses for the stats API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mtgstats_grid::GridError;
use serde::{Deserialize, Serialize};

/// Error response body for API endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] GridError),

    #[error("Stats storage unavailable: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn storage(err: impl std::error::Error) -> Self {
        Self::Storage(err.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(GridError::UnknownEntityKind(_)) => "unknown_table",
            Self::BadRequest(GridError::UnknownLayoutVariant(_)) => "unknown_variant",
            Self::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Stats API request failed");
        }

        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
