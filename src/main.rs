//! Countdown Widget - a persisted single-countdown engine
//!
//! This is the main entry point for the countdown-widget server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_widget::{
    api::create_router,
    clock::SystemClock,
    config::Config,
    state::AppState,
    storage::FileStorage,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_widget={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-widget server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, data_dir={}, tick={}ms",
          config.host, config.port, config.data_dir.display(), config.tick_ms);

    let backend = Arc::new(FileStorage::new(&config.data_dir));
    let state = Arc::new(AppState::new(
        backend,
        Arc::new(SystemClock),
        config.engine_settings(),
        config.port,
        config.host.clone(),
    ));

    // Pick up a countdown left running by a previous process
    if state.restore()? {
        info!("Resumed persisted countdown");
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /countdown - Start a countdown {{name, date}}");
    info!("  POST /reset     - Clear the countdown");
    info!("  GET  /status    - Countdown and widget state");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to install signal handler: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
