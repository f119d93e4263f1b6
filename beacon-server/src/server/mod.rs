//! Relay server assembly: routing, startup and the periodic stats log.

mod config;
mod state;

pub use config::RelayConfig;
pub use state::RelayState;

use crate::error::RelayError;
use crate::room::RoomRegistry;
use crate::signaling::ws_handler;
use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info};

/// Create the relay router. The upgrade endpoint is the whole HTTP
/// surface; clients connect straight to the server root.
pub fn create_router() -> Router<RelayState> {
    Router::new().route("/", get(ws_handler))
}

/// Build the complete application.
pub fn create_app(state: RelayState) -> Router {
    create_router().with_state(state)
}

/// Run the relay until ctrl-c or SIGTERM.
pub async fn run(config: RelayConfig) -> Result<(), RelayError> {
    let state = RelayState::new();
    let app = create_app(state.clone());

    spawn_stats_logger(state.registry().clone(), config.stats_interval);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("Signaling server running on ws://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Signaling server stopped");
    Ok(())
}

/// Log an occupancy snapshot every `interval`. The per-room breakdown
/// only shows at debug level.
fn spawn_stats_logger(registry: Arc<RoomRegistry>, interval: Duration) {
    if interval.is_zero() {
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately, skip it
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let stats = registry.stats();
            info!(
                "Server stats: {} rooms, {} clients",
                stats.total_rooms, stats.total_clients
            );
            for room in &stats.rooms {
                debug!("Room {}: {} clients", room.room_id, room.client_count);
            }
        }
    });
}

/// Wait for ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
