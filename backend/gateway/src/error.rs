//! Error-to-response mapping for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use doclens_core::ExtractError;

use crate::server::Environment;

/// Wraps an [`ExtractError`] together with the running environment so the
/// response mapping can gate 500 detail outside development mode.
#[derive(Debug)]
pub struct ApiError {
    error: ExtractError,
    environment: Environment,
}

impl ApiError {
    pub fn new(error: ExtractError, environment: Environment) -> Self {
        Self { error, environment }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.error {
            ExtractError::MissingImage
            | ExtractError::InvalidPage(_)
            | ExtractError::UnsupportedPage { .. } => {
                (StatusCode::BAD_REQUEST, self.error.to_string())
            }
            ExtractError::RecordNotFound(_) => (StatusCode::NOT_FOUND, self.error.to_string()),
            ExtractError::Agent(_) | ExtractError::Storage(_) | ExtractError::Other(_) => {
                error!(error = %self.error, "request failed");
                let message = match self.environment {
                    Environment::Production => "internal server error".to_string(),
                    Environment::Development => self.error.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (
            status,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}
