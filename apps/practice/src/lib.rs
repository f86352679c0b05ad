//! Exam practice application shell.
//!
//! Wires the answer store to a SQLite-backed persistence surface, loads the
//! content catalog and exposes the commands the view layer calls.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod narration;
pub mod podcast;
pub mod preferences;
pub mod session;
pub mod state;

pub use catalog::{CatalogError, ContentCatalog, TestSummary};
pub use commands::CommandError;
pub use config::AppConfig;
pub use db::{DbError, SqliteStorage};
pub use narration::{narration_channel, NarrationCommand, NarrationReceiver, NarrationSender};
pub use preferences::{FontSize, Language, Preferences, Theme};
pub use session::Session;
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
