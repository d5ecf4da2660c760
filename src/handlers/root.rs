//! Greeting and fallback handlers.

use axum::http::{Method, Uri};
use tracing::instrument;

use crate::error::AppError;

/// Plain-text greeting served at `/`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// `GET /`
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Answer for any request no route matched, including a known path called
/// with an unsupported method.
#[instrument]
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
