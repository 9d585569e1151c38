//! REST JSON API.
//!
//! ```text
//! GET    /health            liveness check
//! GET    /wonders           wonder catalog
//! GET    /players           list players
//! POST   /players           register a player
//! DELETE /players/{id}      delete a player without games
//! GET    /games             list games
//! POST   /games             record a game
//! GET    /games/history     ranked history, newest first
//! DELETE /games/{id}        delete a game
//! GET    /stats/players     leaderboard
//! GET    /stats/wonders     per-wonder stats
//! ```

mod response;
mod routes;

use axum::Router;
use axum::routing::{delete, get};
use std::io;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::ledger::Ledger;

pub use response::ErrorBody;

/// Build the application router over `ledger`.
#[must_use]
pub fn router(ledger: Ledger) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/wonders", get(routes::wonders))
        .route(
            "/players",
            get(routes::list_players).post(routes::create_player),
        )
        .route("/players/{id}", delete(routes::delete_player))
        .route("/games", get(routes::list_games).post(routes::create_game))
        .route("/games/history", get(routes::game_history))
        .route("/games/{id}", delete(routes::delete_game))
        .route("/stats/players", get(routes::player_stats))
        .route("/stats/wonders", get(routes::wonder_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(ledger)
}

/// Serve the API on `config.bind` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: ServerConfig, ledger: Ledger) -> io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(ledger))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
