use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics;

/// Generic label used for failures that carry no client-safe kind.
pub const SERVER_ERROR_KIND: &str = "ServerError";

/// Message returned for every 500 response.
pub const SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-wide error types with appropriate HTTP status codes.
///
/// Every stage of the request pipeline returns these instead of building
/// its own response; [`IntoResponse`] below is the only place where a
/// status code or error body is chosen.
///
/// | Variant         | Status | `error` field        |
/// |-----------------|--------|----------------------|
/// | `NotFound`      | 404    | `NotFoundError`      |
/// | `Validation`    | 400    | `ValidationError`    |
/// | `Unauthorized`  | 401    | `Error`              |
/// | `RouteNotFound` | 404    | `RouteNotFoundError` |
/// | everything else | 500    | `ServerError`        |
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Serialized under the plain `Error` kind, which is what existing
    /// clients of this API match on.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Cannot {method} {path}")]
    RouteNotFound { method: String, path: String },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Name reported in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFoundError",
            AppError::Validation(_) => "ValidationError",
            AppError::Unauthorized(_) => "Error",
            AppError::RouteNotFound { .. } => "RouteNotFoundError",
            AppError::Internal(_) | AppError::ConfigError(_) => SERVER_ERROR_KIND,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server errors never leak their details.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Error response body shared by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.public_message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        // Full detail stays server-side
        if status.is_server_error() {
            tracing::error!(kind, error = %self, "Request failed");
        } else {
            tracing::warn!(kind, status = status.as_u16(), message = %self, "Request rejected");
        }
        metrics::record_error(kind, status.as_u16());

        let body = ErrorResponse::from(&self);
        let mut response = (status, axum::Json(body)).into_response();

        if matches!(self, AppError::Unauthorized(_)) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("API-Key"));
        }

        response
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, ErrorResponse, Response) {
        let response = err.into_response();
        let status = response.status();
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, parsed, Response::from_parts(parts, axum::body::Body::empty()))
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body, _) = body_of(AppError::NotFound("Product not found".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "NotFoundError");
        assert_eq!(body.message, "Product not found");
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body, _) = body_of(AppError::Validation("bad page".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "ValidationError");
        assert_eq!(body.message, "bad page");
    }

    #[tokio::test]
    async fn test_unauthorized_uses_generic_kind_and_challenge_header() {
        let (status, body, response) =
            body_of(AppError::Unauthorized("Invalid or missing API key".into())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "Error");
        assert_eq!(body.message, "Invalid or missing API key");
        assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "API-Key");
    }

    #[tokio::test]
    async fn test_route_not_found_message() {
        let err = AppError::RouteNotFound {
            method: "GET".into(),
            path: "/api/unknown".into(),
        };
        let (status, body, _) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "RouteNotFoundError");
        assert_eq!(body.message, "Cannot GET /api/unknown");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body, _) = body_of(AppError::Internal("lock poisoned at 0xdead".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, SERVER_ERROR_KIND);
        assert_eq!(body.message, SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_body_has_exactly_two_fields() {
        let body = ErrorResponse::from(&AppError::Validation("x".into()));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
