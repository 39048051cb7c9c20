use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// Service failure carried across the HTTP boundary.
///
/// Store failures are logged here with their cause and leave the process as
/// a generic 500; everything else maps to a client-facing message.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::Db(cause) => {
                error!(error = %cause, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}
