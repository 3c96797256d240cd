//! API error type and its JSON shape

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Error body returned by every endpoint: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
            },
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        &self.response.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message),
            DomainError::Internal { message } | DomainError::Storage { message } => {
                error!(error = %err, "Request failed");
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid age");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid age");
    }

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::not_found("User 1 not found"), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("Invalid user ID: 'x'"), StatusCode::BAD_REQUEST),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::storage("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err = ApiError::from(domain_err);
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_message_has_no_category_prefix() {
        let api_err = ApiError::from(DomainError::not_found("User 7 not found"));
        assert_eq!(api_err.message(), "User 7 not found");
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::not_found("Team 3 not found");
        let json = serde_json::to_string(&err.response).unwrap();

        assert_eq!(json, r#"{"error":"Team 3 not found"}"#);
    }
}
