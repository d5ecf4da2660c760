//! Prometheus metrics for application observability.
//!
//! Metrics are exposed on a dedicated listener when `METRICS_PORT` is set.
//! Recording functions are cheap no-ops until [`init_metrics`] installs the
//! exporter, so handlers and tests call them unconditionally.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `catalog_requests_total` - Requests seen by the pipeline (labels: method)
//! - `catalog_errors_total` - Error responses (labels: kind, status)
//! - `catalog_auth_failures_total` - Rejected API keys (labels: reason)
//! - `catalog_mutations_total` - Successful writes (labels: operation)
//!
//! ## Gauges
//! - `catalog_products` - Number of products currently held

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "catalog_requests_total";
    pub const ERRORS_TOTAL: &str = "catalog_errors_total";
    pub const AUTH_FAILURES_TOTAL: &str = "catalog_auth_failures_total";
    pub const MUTATIONS_TOTAL: &str = "catalog_mutations_total";
    pub const PRODUCTS: &str = "catalog_products";
}

/// Initialize the Prometheus metrics exporter.
///
/// Starts the Prometheus HTTP listener on `metrics_addr` and registers the
/// metric descriptions.
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        names::REQUESTS_TOTAL,
        "Total number of HTTP requests entering the pipeline"
    );
    describe_counter!(
        names::ERRORS_TOTAL,
        "Total number of error responses by kind and status"
    );
    describe_counter!(
        names::AUTH_FAILURES_TOTAL,
        "Total number of requests rejected by the API key gate"
    );
    describe_counter!(
        names::MUTATIONS_TOTAL,
        "Total number of successful catalog writes"
    );
    describe_gauge!(names::PRODUCTS, "Number of products in the catalog");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

/// Record a request entering the pipeline.
pub fn record_request(method: &str) {
    counter!(names::REQUESTS_TOTAL, "method" => method.to_string()).increment(1);
}

/// Record an error response.
pub fn record_error(kind: &'static str, status: u16) {
    counter!(names::ERRORS_TOTAL, "kind" => kind, "status" => status.to_string()).increment(1);
}

/// Record a rejected API key. `reason` is `missing` or `invalid`.
pub fn record_auth_failure(reason: &'static str) {
    counter!(names::AUTH_FAILURES_TOTAL, "reason" => reason).increment(1);
}

/// Record a successful write and the resulting catalog size.
pub fn record_mutation(operation: &'static str, catalog_size: usize) {
    counter!(names::MUTATIONS_TOTAL, "operation" => operation).increment(1);
    set_catalog_size(catalog_size);
}

/// Update the catalog size gauge.
pub fn set_catalog_size(size: usize) {
    gauge!(names::PRODUCTS).set(size as f64);
}
