//! # Error Handling Middleware
//!
//! Maps booking errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chairtime_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use chairtime_api::middleware::error_handling::AppError;
/// use chairtime_core::models::appointment::ProposedService;
///
/// async fn handler(raw: String) -> Result<Json<i64>, AppError> {
///     let service = ProposedService::from_estimated_time(&raw)?;
///     Ok(Json(service.duration_minutes))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::InvalidDuration(_) => StatusCode::BAD_REQUEST,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::MalformedAppointment { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // The grid comes from configuration, never from the request
            BookingError::InvalidGrid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `BookingResult`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}
