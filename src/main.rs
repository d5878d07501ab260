//! Tickdown - a persistent countdown-timer service
//!
//! This is the main entry point for the tickdown server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use tickdown::{
    api::create_router,
    config::Config,
    state::AppState,
    store::SqliteSessionStore,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tickdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tickdown server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, db={}, default duration={}s",
        config.host, config.port, config.db_path, config.default_duration
    );

    // Open the session store
    let store = match SqliteSessionStore::open(&config.db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open session store at {}: {}", config.db_path, e);
            std::process::exit(1);
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(store, config.default_duration));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST  /sessions           - Create a timer session");
    info!("  GET   /sessions/:id       - Fetch a timer session");
    info!("  PATCH /sessions/:id       - Partial update of a session");
    info!("  POST  /sessions/:id/start - Start the countdown");
    info!("  POST  /sessions/:id/stop  - Pause the countdown");
    info!("  POST  /sessions/:id/reset - Reset to the full duration");
    info!("  GET   /sessions/:id/state - State with formatted time");
    info!("  GET   /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
