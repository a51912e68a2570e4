use std::{future::Future, sync::Arc, time::Duration};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::ServerState;
use service::{
    board::BoardService, file::reservations::FileReservationRepository, runtime,
    sheets::client::GvizClient,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire repositories and the sheet client from configuration.
pub fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let reservations = FileReservationRepository::new(&cfg.store.path);
    let sheets = GvizClient::new(
        cfg.sheets.spreadsheet_id.clone(),
        Duration::from_secs(cfg.sheets.request_timeout_secs),
    )?;
    let board = BoardService::new(Arc::new(sheets), reservations.clone(), cfg.sheets.clone());

    Ok(ServerState {
        reservations,
        board: Arc::new(board),
        auth: Arc::new(cfg.auth.clone()),
        page: Arc::new(cfg.page.clone()),
    })
}

pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg)?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

/// Resolves once `signal` fires. If the signal handler cannot be installed
/// the server keeps running instead of shutting down at once.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            error!(event = "signal_handler_failed", error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.server.static_dir, &cfg.store.path).await?;

    let app = build_app(&cfg)?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, store = %cfg.store.path, static_dir = %cfg.server.static_dir, "seat board listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}
