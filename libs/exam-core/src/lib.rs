//! Core exam-practice library shared by the application shell.
//!
//! Provides:
//! - Test definitions and the learner's answer state
//! - JSON and plain-text answer key parsing
//! - Self-scoring with optional lenient matching
//! - A persistence surface trait and the answer store built on it

pub mod content;
pub mod error;
pub mod grading;
pub mod matching;
pub mod persistence;
pub mod store;
pub mod types;

pub use content::{parse_answer_key, parse_test_definition};
pub use error::{ContentError, Result, StorageError, StoreError};
pub use grading::{score, score_breakdown, PartScore, ScoreReport, TaskOutcome, Verdict};
pub use matching::{answers_match, levenshtein_distance, normalized_similarity};
pub use persistence::{MemoryStorage, PersistenceSurface, StorageResult};
pub use store::{set_answer, AnswerStore};
pub use types::{AnswerState, MatchingMode, Part, Score, Skill, Task, TestDefinition};
