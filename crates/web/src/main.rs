use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickdeck_events::EventLog;
use quickdeck_web::config::ServerConfig;
use quickdeck_web::router::build_app_router;
use quickdeck_web::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quickdeck_web=debug,quickdeck_backend=debug,quickdeck_events=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend_url = %config.backend_url,
        public_url = ?config.public_url,
        "Loaded server configuration"
    );

    // --- App state ---
    let state = AppState::from_config(config.clone());
    if !state.sessions.is_enabled() {
        tracing::warn!("Sign-in will fail until SESSION_SECRET is configured");
    }

    // --- Event bus ---
    let event_bus = state.event_bus.clone();
    let event_log_handle = tokio::spawn(EventLog::run(event_bus.subscribe()));
    tracing::info!("Event log started");

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and every state clone it held) is gone by now; dropping
    // the last bus handle closes the channel and ends the event log.
    drop(event_bus);
    match tokio::time::timeout(Duration::from_secs(5), event_log_handle).await {
        Ok(Ok(count)) => tracing::info!(count, "Event log stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Event log task failed"),
        Err(_) => tracing::warn!("Event log did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
