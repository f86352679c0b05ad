//! Common test utilities and fixtures for integration tests.
//!
//! `TestContext` owns a temporary data directory with a file-backed progress
//! database, so tests can simulate a reload by reopening it.

pub mod fixtures;

use std::path::{Path, PathBuf};

use exam_practice::{AppState, ContentCatalog, NarrationReceiver, SqliteStorage};
use tempfile::TempDir;

pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.path().join("progress.db")
    }

    /// Open application state over the shared database, like a page load.
    pub fn open(&self) -> AppState {
        self.open_with_receiver().0
    }

    pub fn open_with_receiver(&self) -> (AppState, NarrationReceiver) {
        let storage = SqliteStorage::open(self.database_path()).expect("failed to open database");
        let catalog = ContentCatalog::from_definitions(vec![
            fixtures::scenario_definition(),
            fixtures::modellsatz_definition(),
        ])
        .expect("fixtures are valid");
        AppState::new(storage, catalog)
    }
}
