use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use product_catalog::{AppState, Catalog, Config, build_router, metrics, utils};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!(
        "Starting Product Catalog Service v{}",
        env!("CARGO_PKG_VERSION")
    );

    match run().await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Initialize logging. `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

/// Run the application, returning an exit code on error.
async fn run() -> Result<(), exitcode::ExitCode> {
    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {e}");
        exitcode::CONFIG
    })?;
    info!(
        host = %config.host,
        port = %config.port,
        api_prefix = %config.api_prefix,
        auth_configured = config.auth_configured(),
        "Configuration loaded"
    );

    if let Some(metrics_addr) = config.metrics_addr() {
        metrics::try_init_metrics(metrics_addr);
    }

    // Seed the catalog; it lives only as long as this process
    let catalog = Catalog::seeded();
    metrics::set_catalog_size(catalog.len());
    info!(products = catalog.len(), "Catalog seeded");

    let state = AppState::new(catalog, config.clone());
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET    /                     - Welcome message");
    info!("  GET    /health               - Health check");
    info!("  GET    /api/products         - List products (?category, page, limit)");
    info!("  POST   /api/products         - Create product");
    info!("  GET    /api/products/search  - Search by name (?q)");
    info!("  GET    /api/products/stats   - Count per category");
    info!("  GET    /api/products/{{id}}    - Get product");
    info!("  PUT    /api/products/{{id}}    - Replace product");
    info!("  DELETE /api/products/{{id}}    - Delete product");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!("Server shutdown complete");
    Ok(())
}
