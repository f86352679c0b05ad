//! Application configuration.
//!
//! Values come from the process environment (a `.env` file is honoured) with
//! defaults under the platform's local data directory.

use std::path::PathBuf;

/// Directory holding the progress database.
pub const DATA_DIR_VAR: &str = "EXAM_PRACTICE_DATA_DIR";
/// Directory holding test definitions and answer keys.
pub const CONTENT_DIR_VAR: &str = "EXAM_PRACTICE_CONTENT_DIR";

const DATABASE_FILE: &str = "progress.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from `.env` and the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup(DATA_DIR_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            content_dir: lookup(CONTENT_DIR_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.content_dir),
        }
    }

    /// Path of the SQLite database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Relative to the working directory when the platform has no data dir.
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("exam-practice"),
            content_dir: PathBuf::from("content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_from_lookup() {
        let vars = HashMap::from([
            (DATA_DIR_VAR, "/tmp/exam-data"),
            (CONTENT_DIR_VAR, "/srv/content"),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/exam-data"));
        assert_eq!(config.content_dir, PathBuf::from("/srv/content"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/exam-data/progress.db"));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = AppConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_data_dir_is_namespaced() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(config.data_dir.ends_with("exam-practice"));
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }
}
