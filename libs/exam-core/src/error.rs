//! Error types for exam-core.

use thiserror::Error;

/// Result type alias using ContentError.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while parsing or validating test content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid test definition: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("test {test_id} has no parts")]
    EmptyTest { test_id: String },

    #[error("duplicate part {part_id}")]
    DuplicatePart { part_id: String },

    #[error("duplicate task {task_id} in part {part_id}")]
    DuplicateTask { part_id: String, task_id: u32 },

    #[error("task {task_id} in part {part_id} has an empty answer")]
    EmptyAnswer { part_id: String, task_id: u32 },

    #[error("fuzzy threshold {0} is outside 0.0..=1.0")]
    InvalidThreshold(f64),

    #[error("task outside of a section at line {line}")]
    MissingSection { line: usize },

    #[error("invalid section header at line {line}: {value}")]
    InvalidSection { line: usize, value: String },

    #[error("unknown skill at line {line}: {value}")]
    UnknownSkill { line: usize, value: String },

    #[error("invalid task ID at line {line}: {value}")]
    InvalidTaskId { line: usize, value: String },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("duplicate task {task_id} at line {line}")]
    DuplicateKeyTask { task_id: u32, line: usize },
}

/// Failures reported by a persistence surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: need {needed} bytes, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// Why a snapshot could not be loaded or saved.
///
/// The answer store recovers from both variants locally; they only surface
/// through the `try_*` methods.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),
}
