//! # Product Catalog Service
//!
//! An in-memory product catalog served over a JSON HTTP API with Axum,
//! featuring:
//!
//! - **Catalog**: Create, read, replace and delete products, with category
//!   filtering, pagination, name search and per-category counts
//! - **Security**: API key authentication on `/api/`, strict payload validation
//! - **Observability**: Structured request logging, health endpoint,
//!   optional Prometheus metrics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Pipeline (Request Log → Auth)                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Router → Extractors (validation) → Handlers                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Catalog (Vec<Product> behind a RwLock)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure anywhere in that stack is an [`AppError`], rendered into
//! `{"error": ..., "message": ...}` in exactly one place.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_catalog::{AppState, Catalog, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!
//!     let state = AppState::new(Catalog::seeded(), config);
//!     axum::serve(listener, build_router(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! ```
//!
//! Without `API_KEY` every `/api/` request is rejected with 401.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use catalog::{Catalog, Pagination};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use routes::build_router;
pub use state::AppState;
