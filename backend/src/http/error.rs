//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Request body was not valid JSON for the endpoint
    Rejected(JsonRejection),
    /// Query string did not match the endpoint's parameters
    InvalidQuery(QueryRejection),
    /// Dispatch engine rejected the request
    Dispatch(DispatchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Rejected(rejection) => (
                rejection.status(),
                ApiError::new("BAD_REQUEST", "Request body could not be read")
                    .with_details(rejection.body_text()),
            ),
            AppError::InvalidQuery(rejection) => (
                rejection.status(),
                ApiError::new("BAD_REQUEST", "Query string could not be read")
                    .with_details(rejection.body_text()),
            ),
            AppError::Dispatch(e) => {
                let status = if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                let code = match &e {
                    DispatchError::InvalidDate { .. } => "INVALID_DATE",
                    DispatchError::StopNotFound(_) => "STOP_NOT_FOUND",
                    DispatchError::InvalidPosition { .. } => "INVALID_POSITION",
                    DispatchError::DuplicateStop(_) => "DUPLICATE_STOP",
                    DispatchError::InvalidOrderLine { .. } => "INVALID_ORDER_LINE",
                    DispatchError::InvalidPricingTable(_) => "INVALID_PRICING_TABLE",
                };
                (status, ApiError::new(code, e.to_string()))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::Dispatch(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection)
    }
}
