//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Answers preflights, adds cross-origin headers
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │    Pipeline      │ ← request_log, then authentication (401 under /api/)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Catch Panic    │ ← 500 ServerError instead of a dropped connection
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Body Limit     │ ← Oversized bodies fail product validation
//! └────────┬─────────┘
//!          │
//!          ▼
//!   Handler / Fallback (404 RouteNotFoundError)
//! ```
//!
//! # Route Groups
//!
//! - `/`, `/health` - Greeting and health (public)
//! - `/api/products` - Catalog operations (API key required)

use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tracing::{info, warn};

use crate::error::AppError;
use crate::handlers;
use crate::middleware::Pipeline;
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// # Middleware Configuration
///
/// - **Pipeline**: Request logging and API key authentication, in that order
/// - **CORS**: Configured from `cors_allowed_origins`
/// - **Body limit**: `max_request_body_size`
///
/// # Arguments
///
/// * `state` - Application state containing config and the catalog
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let cors = build_cors_layer(&config.cors_allowed_origins);
    let pipeline = Pipeline::from_config(config);

    if config.auth_configured() {
        info!(prefix = %config.api_prefix, "API key authentication enabled");
    } else {
        warn!(
            prefix = %config.api_prefix,
            "No API_KEY set, every request under the protected prefix will be rejected"
        );
    }
    info!(stages = ?pipeline.stage_names(), "Request pipeline configured");

    // =========================================================================
    // Build Router with Routes
    // =========================================================================
    let router = Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        // Static segments win over `{id}`, so these never reach get_product
        .route("/api/products/search", get(handlers::search_products))
        .route("/api/products/stats", get(handlers::product_stats))
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        // Fallbacks must be registered before layers so the layers cover them
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found);

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================
    info!(
        max_size_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );

    router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(pipeline)
        .layer(cors)
        .with_state(state)
}

/// Convert a handler panic into the generic 500 response.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Build CORS layer from configuration.
///
/// # Arguments
///
/// * `allowed_origins` - List of allowed origins, or `["*"]` for any origin
///
/// # Security Note
///
/// Using `*` (any origin) is convenient for development but should be
/// avoided in production. Specify explicit origins instead.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    let layer = if allow_any {
        CorsLayer::new().allow_origin(cors::Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer.allow_methods(cors::Any).allow_headers(cors::Any)
}
