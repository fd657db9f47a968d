//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use plughub_domain::error::{PlugHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Maps [`PlugHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PlugHubError);

impl From<PlugHubError> for ApiError {
    fn from(err: PlugHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(PlugHubError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlugHubError::Validation(err) => {
                tracing::debug!(error = %err, "rejected request");
                StatusCode::BAD_REQUEST
            }
            PlugHubError::Gateway(err) => {
                tracing::error!(error = %err, host = err.host(), "device call failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
