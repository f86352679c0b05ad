//! Answer store: hydrates, records and persists a learner's answers.
//!
//! Every failure here is recoverable. A snapshot that cannot be read or
//! parsed yields an empty state, and a write that fails leaves the in-memory
//! state as the only copy for the session.

use crate::error::StoreError;
use crate::persistence::PersistenceSurface;
use crate::types::AnswerState;

/// Record one answer without touching the caller's state.
pub fn set_answer(
    state: &AnswerState,
    part_id: &str,
    task_id: u32,
    value: impl Into<String>,
) -> AnswerState {
    state.set_answer(part_id, task_id, value)
}

/// Answer store bound to a persistence surface.
#[derive(Debug)]
pub struct AnswerStore<S> {
    surface: S,
}

impl<S: PersistenceSurface> AnswerStore<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Underlying persistence surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Load the snapshot under `test_key`, reporting why it could not be read.
    pub fn try_load(&self, test_key: &str) -> Result<AnswerState, StoreError> {
        match self.surface.get(test_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(AnswerState::new()),
        }
    }

    /// Load the snapshot under `test_key`, or an empty state.
    pub fn load(&self, test_key: &str) -> AnswerState {
        self.try_load(test_key).unwrap_or_else(|e| {
            tracing::warn!(key = test_key, error = %e, "discarding saved answers");
            AnswerState::new()
        })
    }

    /// Write `state` under `test_key`, reporting failures.
    pub fn try_persist(&self, state: &AnswerState, test_key: &str) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        self.surface.set(test_key, &raw)?;
        Ok(())
    }

    /// Write `state` under `test_key`. Failures are logged and dropped.
    pub fn persist(&self, state: &AnswerState, test_key: &str) {
        if let Err(e) = self.try_persist(state, test_key) {
            tracing::warn!(key = test_key, error = %e, "answers not saved");
        }
    }

    /// Record an answer and persist the result, as done on every selection.
    pub fn record(
        &self,
        test_key: &str,
        state: &AnswerState,
        part_id: &str,
        task_id: u32,
        value: impl Into<String>,
    ) -> AnswerState {
        let next = state.set_answer(part_id, task_id, value);
        self.persist(&next, test_key);
        next
    }

    /// Remove one answer and persist the result.
    pub fn forget(&self, test_key: &str, state: &AnswerState, part_id: &str, task_id: u32) -> AnswerState {
        let next = state.clear_answer(part_id, task_id);
        self.persist(&next, test_key);
        next
    }

    /// Drop the snapshot under `test_key` and start over.
    pub fn reset(&self, test_key: &str) -> AnswerState {
        match self.surface.remove(test_key) {
            Ok(()) => tracing::debug!(key = test_key, "progress reset"),
            Err(e) => tracing::warn!(key = test_key, error = %e, "saved answers not removed"),
        }
        AnswerState::new()
    }
}
