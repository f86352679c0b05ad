//! Commands exposed to the view layer.

pub mod exam;
pub mod narration;
pub mod podcast;
pub mod preferences;

pub use exam::{
    clear_answer, grade_test, list_tests, open_test, reset_progress, saved_progress, select_answer,
    ExamView, SavedProgress,
};
pub use narration::{narrate, stop_narration};
pub use podcast::{is_listened, list_listened, mark_listened, unmark_listened};
pub use preferences::{get_preferences, reset_preferences, save_preferences};

/// Error returned to the view layer.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(format!("{} not found", what))
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<exam_core::StoreError> for CommandError {
    fn from(e: exam_core::StoreError) -> Self {
        Self { message: e.to_string() }
    }
}
