//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use workmate_domain::error::WorkmateError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`WorkmateError`] to an HTTP response with appropriate status code.
pub struct ApiError(WorkmateError);

impl From<WorkmateError> for ApiError {
    fn from(err: WorkmateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WorkmateError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            WorkmateError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            WorkmateError::RunInProgress => (StatusCode::CONFLICT, self.0.to_string()),
            WorkmateError::Execution(err) => {
                tracing::error!(error = %err, "step execution error escaped the runner");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to process request".to_string(),
                )
            }
            WorkmateError::Upstream(err) => {
                // Detail goes to the log, not to the caller.
                tracing::error!(error = %err, "text-generation upstream error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to process request".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
