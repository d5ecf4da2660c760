//! Per-request access logging.
//!
//! Emits one `info` event per request with an ISO-8601 UTC timestamp
//! (millisecond precision), the HTTP method and the path. Never rejects.

use axum::body::Body;
use axum::http::Request;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use super::pipeline::RequestStage;
use crate::error::AppResult;
use crate::metrics;

/// First pipeline stage: log and count the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

impl RequestStage for RequestLogger {
    fn name(&self) -> &'static str {
        "request_log"
    }

    fn check(&self, req: &Request<Body>) -> AppResult<()> {
        let timestamp = iso_timestamp(Utc::now());
        info!(
            %timestamp,
            method = %req.method(),
            path = %req.uri().path(),
            "Incoming request"
        );
        metrics::record_request(req.method().as_str());
        Ok(())
    }
}

/// Format `at` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
