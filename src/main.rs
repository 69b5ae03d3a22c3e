//! Countdown Timer - A timer catalog and a single observable countdown session
//! 
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::info;

use countdown_timer::{
    config::Config,
    display::humanize,
    state::{AppState, Catalog, SessionController},
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}, clock_face={}h, hold_on_finish={}",
          config.host, config.port, humanize(config.tick_interval()),
          config.clock_face.hours(), config.hold_on_finish);

    let catalog = Catalog::seeded();
    info!("Loaded {} timers", catalog.len());

    let controller = SessionController::new(catalog, config.session_settings(), Handle::current());
    let state = Arc::new(AppState::new(
        controller.clone(),
        config.clock_face,
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /state             - Current session and display breakdown");
    info!("  GET  /state/stream      - Session updates as server-sent events");
    info!("  GET  /timers            - Timer catalog");
    info!("  POST /timers            - Add and start a timer");
    info!("  POST /timers/:id/start  - Start a catalog timer");
    info!("  POST /stop | /reset | /pause | /resume | /restart");
    info!("  GET|PUT /tick-interval  - Tick interval in milliseconds");
    info!("  GET  /health            - Health check");

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

    controller.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
