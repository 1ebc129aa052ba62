use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::core::TraceError;

use super::types::ErrorResponse;

/// Wraps `TraceError` with an HTTP status code mapping.
pub struct ApiError(pub TraceError);

impl From<TraceError> for ApiError {
    fn from(err: TraceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            TraceError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE")
            }
            TraceError::CsvParseError(_)
            | TraceError::TimestampParseError(_)
            | TraceError::ChartError(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_SOURCE_DATA"),
            TraceError::ConfigParsingError(_)
            | TraceError::IoError(_)
            | TraceError::WriteError(_)
            | TraceError::QueryError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
