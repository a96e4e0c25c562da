pub mod latency;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// ─── Unified error type ──────────────────────────────────────────

/// Everything the HTTP boundary can reject a request with.
/// None of these ever reach the aggregator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON")]
    MalformedJson,

    #[error("Invalid request body")]
    InvalidQuery,

    /// Store failed to load; carries the message naming the file
    #[error("{0}")]
    DataUnavailable(String),

    #[error("Only POST allowed")]
    MethodNotAllowed,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedJson | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, Self::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(AppError::MalformedJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::DataUnavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn method_not_allowed_lists_post() {
        let resp = AppError::MethodNotAllowed.into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[header::ALLOW], "POST");

        let resp = AppError::MalformedJson.into_response();
        assert!(!resp.headers().contains_key(header::ALLOW));
    }

    #[test]
    fn data_unavailable_passes_message_through() {
        let err = AppError::DataUnavailable("Telemetry file not found at /tmp/t.json".into());
        assert_eq!(err.to_string(), "Telemetry file not found at /tmp/t.json");
    }
}
