//! Shared application state for Axum handlers.
//!
//! The product catalog is created once at startup and handed to the router
//! here; handlers only ever reach it through [`AppState::catalog`].
//!
//! # Thread Safety
//!
//! The catalog sits behind a single `RwLock`. Read-only operations (list,
//! get, search, stats) take the read lock; create, replace and delete hold
//! the write lock for the whole operation, so no two mutations interleave
//! and no reader observes a half-applied one.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::config::Config;

/// Catalog handle shared by all handlers.
pub type SharedCatalog = Arc<RwLock<Catalog>>;

/// Shared application state for Axum handlers.
///
/// Cloned for each request; all data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Product collection
    pub catalog: SharedCatalog,
    /// Application configuration
    pub config: Arc<Config>,
    /// Timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    /// Create application state owning `catalog`.
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_catalog() {
        let state = AppState::new(Catalog::seeded(), Config::default());
        let clone = state.clone();

        clone.catalog.write().await.remove("1").unwrap();

        assert_eq!(state.catalog.read().await.len(), 2);
    }

    #[test]
    fn test_uptime_starts_near_zero() {
        let state = AppState::new(Catalog::new(), Config::default());
        assert!(state.uptime_seconds() < 5);
    }
}
