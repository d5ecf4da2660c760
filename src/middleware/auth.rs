//! API key authentication stage.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Prefix scoping**: Only paths under the protected prefix (`/api/` by
//!   default) are checked; `/` and `/health` stay public
//! - **Fail closed**: With no `API_KEY` configured, protected paths always
//!   answer 401
//!
//! # Usage
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! curl -H "x-api-key: your-secret-key" http://localhost:3000/api/products
//! ```

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::pipeline::RequestStage;
use crate::config::DEFAULT_API_PREFIX;
use crate::error::{AppError, AppResult};
use crate::metrics;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Message for every rejected request, whether the key was missing or wrong.
pub const AUTH_FAILURE_MESSAGE: &str = "Invalid or missing API key";

/// API key authentication stage.
///
/// The expected key is fixed at construction and never rotates.
#[derive(Clone)]
pub struct ApiKeyAuth {
    /// Expected API key (None = nothing can authenticate)
    expected_key: Option<Arc<String>>,
    /// Paths starting with this prefix require the key
    protected_prefix: Arc<String>,
}

impl ApiKeyAuth {
    /// Create a new API key auth stage.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Expected API key, or `None` to reject every protected request
    /// * `protected_prefix` - Path prefix that requires the key
    pub fn new(api_key: Option<String>, protected_prefix: impl Into<String>) -> Self {
        Self {
            expected_key: api_key.map(Arc::new),
            protected_prefix: Arc::new(protected_prefix.into()),
        }
    }

    /// Create with the default "/api/" prefix.
    pub fn with_defaults(api_key: Option<String>) -> Self {
        Self::new(api_key, DEFAULT_API_PREFIX)
    }

    /// Check whether `path` falls under the protected prefix.
    pub fn protects(&self, path: &str) -> bool {
        path.starts_with(self.protected_prefix.as_str())
    }
}

impl RequestStage for ApiKeyAuth {
    fn name(&self) -> &'static str {
        "authentication"
    }

    fn check(&self, req: &Request<Body>) -> AppResult<()> {
        let path = req.uri().path();
        if !self.protects(path) {
            debug!(path, "Public path, skipping API key check");
            return Ok(());
        }

        match (extract_api_key(req), self.expected_key.as_deref()) {
            (Some(provided), Some(expected)) if constant_time_eq(provided, expected) => {
                debug!(path, "API key authentication successful");
                Ok(())
            }
            (Some(_), _) => {
                warn!(path, "Invalid API key provided");
                metrics::record_auth_failure("invalid");
                Err(unauthorized())
            }
            (None, _) => {
                warn!(path, "Missing API key");
                metrics::record_auth_failure("missing");
                Err(unauthorized())
            }
        }
    }
}

/// Extract the API key from the `x-api-key` header.
///
/// Values that are not visible ASCII count as missing.
fn extract_api_key<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Perform constant-time comparison of two strings.
///
/// This prevents timing attacks where an attacker could determine
/// the correct API key by measuring response times.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn unauthorized() -> AppError {
    AppError::Unauthorized(AUTH_FAILURE_MESSAGE.to_string())
}
