//! In-memory answers for each opened test.

use exam_core::{AnswerState, AnswerStore, PersistenceSurface, StoreError};

/// Answers for one opened test.
///
/// A session whose snapshot could not be read is unsaved: answers live in
/// memory only and nothing is written until a later read succeeds. Writing
/// before that would replace the learner's stored snapshot with a partial one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    answers: AnswerState,
    saved: bool,
}

impl Session {
    /// Hydrate a session from the snapshot under `key`.
    pub fn hydrate<S: PersistenceSurface>(store: &AnswerStore<S>, key: &str) -> Self {
        let mut session = Self::default();
        session.sync(store, key);
        session
    }

    /// A fresh session after the snapshot was dropped.
    pub fn reset<S: PersistenceSurface>(store: &AnswerStore<S>, key: &str) -> Self {
        Self {
            answers: store.reset(key),
            saved: true,
        }
    }

    pub fn answers(&self) -> &AnswerState {
        &self.answers
    }

    /// Whether changes are being written to storage.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Retry reading storage while unsaved.
    ///
    /// Answers given while unsaved win over the stored ones.
    pub fn sync<S: PersistenceSurface>(&mut self, store: &AnswerStore<S>, key: &str) {
        if self.saved {
            return;
        }

        match store.try_load(key) {
            Ok(stored) => {
                self.answers = overlay(stored, &self.answers);
                self.saved = true;
            }
            Err(StoreError::MalformedSnapshot(e)) => {
                tracing::warn!(key, error = %e, "discarding malformed saved answers");
                self.saved = true;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "saved answers unreadable, not saving changes");
            }
        }
    }

    /// Record an answer, persisting it when the session is saved.
    ///
    /// Call [`Session::sync`] first to give an unsaved session a chance to recover.
    pub fn record<S: PersistenceSurface>(
        &mut self,
        store: &AnswerStore<S>,
        key: &str,
        part_id: &str,
        task_id: u32,
        value: &str,
    ) {
        self.answers = if self.saved {
            store.record(key, &self.answers, part_id, task_id, value)
        } else {
            self.answers.set_answer(part_id, task_id, value)
        };
    }

    /// Remove an answer, persisting the result when the session is saved.
    pub fn forget<S: PersistenceSurface>(
        &mut self,
        store: &AnswerStore<S>,
        key: &str,
        part_id: &str,
        task_id: u32,
    ) {
        self.answers = if self.saved {
            store.forget(key, &self.answers, part_id, task_id)
        } else {
            self.answers.clear_answer(part_id, task_id)
        };
    }
}

fn overlay(stored: AnswerState, pending: &AnswerState) -> AnswerState {
    let mut merged = stored;
    for (part_id, tasks) in pending.answers() {
        for (task_id, value) in tasks {
            merged = merged.set_answer(part_id, *task_id, value.as_str());
        }
    }
    merged
}
