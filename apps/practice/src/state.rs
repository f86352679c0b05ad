//! Application state.

use crate::catalog::ContentCatalog;
use crate::config::AppConfig;
use crate::db::SqliteStorage;
use crate::narration::{narration_channel, NarrationReceiver, NarrationSender};
use crate::session::Session;
use anyhow::Context;
use exam_core::AnswerStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Global application state.
///
/// `sessions` keeps each opened test's answers in memory, keyed by test ID,
/// so a test keeps working when storage fails. Lock `store` before `sessions`.
pub struct AppState {
    pub store: Mutex<AnswerStore<SqliteStorage>>,
    pub sessions: Mutex<HashMap<String, Session>>,
    pub catalog: ContentCatalog,
    pub narration: NarrationSender,
}

impl AppState {
    /// Build state from an opened storage and a loaded catalog.
    ///
    /// Returns the receiver the narration engine should drive.
    pub fn new(storage: SqliteStorage, catalog: ContentCatalog) -> (Self, NarrationReceiver) {
        let (narration, receiver) = narration_channel();
        let state = Self {
            store: Mutex::new(AnswerStore::new(storage)),
            sessions: Mutex::new(HashMap::new()),
            catalog,
            narration,
        };
        (state, receiver)
    }

    /// Open the progress database and content catalog described by `config`.
    pub fn open(config: &AppConfig) -> anyhow::Result<(Self, NarrationReceiver)> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory {}", config.data_dir.display())
        })?;

        let db_path = config.database_path();
        tracing::info!(path = %db_path.display(), "opening progress database");
        let storage = SqliteStorage::open(&db_path)
            .with_context(|| format!("failed to open database {}", db_path.display()))?;

        let catalog = if config.content_dir.is_dir() {
            ContentCatalog::load_dir(&config.content_dir).with_context(|| {
                format!("failed to load content from {}", config.content_dir.display())
            })?
        } else {
            tracing::warn!(dir = %config.content_dir.display(), "content directory missing");
            ContentCatalog::new()
        };

        Ok(Self::new(storage, catalog))
    }
}
