//! Roster check-in service.
//!
//! Staff search a student list by number and flip each student's `checkIn`
//! flag exactly once. The flag only ever moves from `false` to `true`, and the
//! transition is a single conditional `UPDATE` in SQLite, so concurrent
//! check-ins for the same student resolve to one `checked_in` and the rest
//! `already_checked_in` without any locking in this process.
//!
//! # Layout
//! - [`db`]: workspace database file and schema setup
//! - [`store`]: record store (conditional update, lookup, listing, upsert)
//! - [`service`]: `list_students` / `check_in`
//! - [`api`]: axum routes and the embedded roster page
//! - [`import`]: bulk roster import from JSON
//!
//! # Endpoints
//! - `GET /api/students`
//! - `PATCH /api/students/{studentNumber}/check-in`
//! - `GET /health`
//! - `GET /`

use tokio::{net::TcpListener, signal};
use tracing::info;

pub mod api;
pub mod config;
pub mod db;
pub mod import;
pub mod model;
pub mod service;
pub mod store;

use api::{build_router, AppState};
use config::Config;
use service::CheckInService;
use store::Store;

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Preparing workspace {}", config.workspace.to_string_lossy());
    let store = Store::open(&config.workspace, config.busy_timeout)?;
    let state = AppState::new(CheckInService::new(store));

    let app = build_router(state);

    info!("Binding to {}", config.listen);
    let listener = TcpListener::bind(&config.listen).await?;
    info!("Server running on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
