//! `serve` command handler.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use super::open_store;
use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::web::{AppState, router};

/// Runs the web server for one site until interrupted.
pub fn handle_serve(args: &ServeArgs, db: Option<&PathBuf>, config: &Config) -> Result<()> {
    let settings = config.settings()?;
    let db_path = config.db_path(args.site, db);
    let store = open_store(&db_path)?;
    let state = AppState::new(args.site, store, settings)
        .context("failed to load page templates")?;
    let addr = config.addr(args.addr.as_deref());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(site = %args.site, %addr, db = %db_path.display(), "server listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
