//! Command handlers for the CLI.

mod news;
mod serve;
mod users;


use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::store::SqliteStore;

pub use news::{handle_add_news, publish_news};
pub use serve::handle_serve;
pub use users::{create_account, handle_create_user};

// ===========================================
// Shared Utilities
// ===========================================

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the `-v` count raises the level:
/// crate logs start at `info`, dependencies at `warn`.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,yasite=info",
        1 => "info,yasite=debug,tower_http=debug",
        2 => "debug,yasite=trace,tower_http=trace",
        _ => "trace",
    }
}

/// Opens (creating if needed) the database at `path`.
pub(crate) fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path)
        .with_context(|| format!("failed to open database: {}", path.display()))
}
