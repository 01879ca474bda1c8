//! Error types for the TicketsMaster server.
//!
//! [`ApiError`] is the single error type handlers return. Each variant maps
//! to one HTTP status, and every response body is `{ "message": ... }` with
//! a human-readable message, matching the published contract:
//!
//! - `Conflict` and `InvalidCredentials` surface as 400, matching the
//!   published contract
//! - `Unauthorized` (missing or invalid token) surfaces as 401
//! - `Forbidden` (valid token, insufficient role) surfaces as 403
//! - `NotFound` surfaces as 404
//! - `Internal` surfaces as 500 with a generic message; the underlying
//!   cause is logged, never sent to the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Errors surfaced by the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A unique field (email or username) is already taken.
    #[error("{0}")]
    Conflict(String),

    /// Login failed: unknown username or password mismatch.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Missing, malformed, or expired bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid token, but the subject lacks the required role.
    #[error("{0}")]
    Forbidden(String),

    /// No record exists for the requested identifier.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; the message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Conflict(_) | Self::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` if this error indicates a client-side problem.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(cause) => {
                error!(cause = %cause, "Request failed with internal error");
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// A specialized Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_bad_request() {
        assert_eq!(
            ApiError::conflict("User already exists").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_credentials_maps_to_bad_request() {
        assert_eq!(
            ApiError::invalid_credentials("Invalid credentials").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(
            ApiError::unauthorized("Access denied. No token provided.").status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(
            ApiError::forbidden("Access denied. Admin only.").status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ApiError::not_found("Event not found").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_maps_to_500() {
        assert_eq!(
            ApiError::internal("storage down").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_converts_to_internal() {
        let err: ApiError = StoreError::backend("connection reset").into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn client_error_predicate() {
        assert!(ApiError::conflict("dup").is_client_error());
        assert!(ApiError::invalid_credentials("bad").is_client_error());
        assert!(ApiError::unauthorized("none").is_client_error());
        assert!(ApiError::forbidden("role").is_client_error());
        assert!(ApiError::not_found("gone").is_client_error());
        assert!(!ApiError::internal("boom").is_client_error());
    }

    #[test]
    fn display_uses_message_verbatim() {
        assert_eq!(
            ApiError::not_found("Event not found").to_string(),
            "Event not found"
        );
    }

    #[tokio::test]
    async fn into_response_hides_internal_cause() {
        let response = ApiError::internal("secret detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Server error");
    }

    #[tokio::test]
    async fn into_response_carries_client_message() {
        let response = ApiError::not_found("User not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "User not found");
    }
}
