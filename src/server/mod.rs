//! Keep-alive HTTP server.
//!
//! The hosting platform expects a bound HTTP port, so the bot's receive loop
//! runs as a background task next to a single liveness route.

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, warn};

/// Liveness payload for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub bot: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        bot: "running",
    })
}

/// Spawn `bot_loop` in the background and serve the liveness route on
/// `0.0.0.0:port` until Ctrl+C or SIGTERM.
pub async fn run<F>(port: u16, bot_loop: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("📡 Keep-alive server listening on {}", addr);

    tokio::spawn(bot_loop);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Keep-alive server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
