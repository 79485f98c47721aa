//! API error types and JSON response formatting.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::popularity::ParsePeriodError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details in the response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Item not found error.
    pub fn item_not_found(id: u32) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "ITEM_NOT_FOUND",
            format!("Item with ID {} not found", id),
        )
        .with_details(serde_json::json!({ "item_id": id }))
    }

    /// Monster not found error.
    pub fn monster_not_found(id: u32) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "MONSTER_NOT_FOUND",
            format!("Monster with ID {} not found", id),
        )
        .with_details(serde_json::json!({ "monster_id": id }))
    }

    /// Empty search or filter result on an endpoint that reports it.
    pub fn no_match(what: &str, query: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NO_MATCH",
            format!("No {} found matching '{}'", what, query),
        )
        .with_details(serde_json::json!({ "query": query }))
    }

    /// Invalid popularity period error.
    pub fn invalid_period(err: &ParsePeriodError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_PERIOD", err.to_string())
    }

    /// Cached image (and its placeholder) missing.
    pub fn image_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "IMAGE_NOT_FOUND",
            "Image not found and fallback image is missing",
        )
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
