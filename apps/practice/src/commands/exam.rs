//! Exam practice commands.

use crate::catalog::TestSummary;
use crate::db::SqliteStorage;
use crate::session::Session;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use exam_core::{
    score, score_breakdown, AnswerState, AnswerStore, Score, ScoreReport, TestDefinition,
};
use std::sync::Arc;

use super::CommandError;

/// What a test page renders: the content, the learner's answers and the
/// running score.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExamView {
    pub definition: TestDefinition,
    pub answers: AnswerState,
    pub score: Score,
    pub percentage: f64,
    pub answered: usize,
    /// False while saved answers could not be read; changes are not saved.
    pub saved: bool,
}

impl ExamView {
    fn new(definition: &TestDefinition, session: &Session) -> Self {
        let answers = session.answers().clone();
        let score = score(&answers, definition);
        Self {
            definition: definition.clone(),
            percentage: score.percentage(),
            score,
            answered: answers.answered_count(),
            answers,
            saved: session.is_saved(),
        }
    }
}

/// A test with answers saved in storage.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SavedProgress {
    pub test_id: String,
    pub answered: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

fn definition(state: &AppState, test_id: &str) -> Result<Arc<TestDefinition>, CommandError> {
    state
        .catalog
        .get(test_id)
        .ok_or_else(|| CommandError::not_found(format!("test {}", test_id)))
}

fn check_task(
    definition: &TestDefinition,
    part_id: &str,
    task_id: u32,
) -> Result<(), CommandError> {
    let part = definition
        .part(part_id)
        .ok_or_else(|| CommandError::not_found(format!("part {}", part_id)))?;
    if part.task(task_id).is_none() {
        return Err(CommandError::not_found(format!("task {} in part {}", task_id, part_id)));
    }
    Ok(())
}

/// Run `f` on the test's session, hydrating it on first access.
///
/// An unsaved session retries reading storage on every access.
fn with_session<T>(
    state: &AppState,
    definition: &TestDefinition,
    f: impl FnOnce(&AnswerStore<SqliteStorage>, &str, &mut Session) -> T,
) -> T {
    let guard = state.store.lock().expect("store lock");
    let store: &AnswerStore<SqliteStorage> = &guard;
    let mut sessions = state.sessions.lock().expect("sessions lock");
    let key = definition.storage_key();
    let session = sessions
        .entry(definition.id.clone())
        .and_modify(|session| session.sync(store, &key))
        .or_insert_with(|| Session::hydrate(store, &key));
    f(store, &key, session)
}

/// List all available tests.
pub fn list_tests(state: &AppState) -> Result<Vec<TestSummary>, CommandError> {
    Ok(state.catalog.list())
}

/// Open a test, restoring saved answers.
pub fn open_test(state: &AppState, test_id: &str) -> Result<ExamView, CommandError> {
    let definition = definition(state, test_id)?;
    Ok(with_session(state, &definition, |_, _, session| {
        ExamView::new(&definition, session)
    }))
}

/// Record the learner's answer for one task and save it.
pub fn select_answer(
    state: &AppState,
    test_id: &str,
    part_id: &str,
    task_id: u32,
    value: &str,
) -> Result<ExamView, CommandError> {
    let definition = definition(state, test_id)?;
    check_task(&definition, part_id, task_id)?;

    Ok(with_session(state, &definition, |store, key, session| {
        session.record(store, key, part_id, task_id, value);
        ExamView::new(&definition, session)
    }))
}

/// Remove the learner's answer for one task.
pub fn clear_answer(
    state: &AppState,
    test_id: &str,
    part_id: &str,
    task_id: u32,
) -> Result<ExamView, CommandError> {
    let definition = definition(state, test_id)?;
    check_task(&definition, part_id, task_id)?;

    Ok(with_session(state, &definition, |store, key, session| {
        session.forget(store, key, part_id, task_id);
        ExamView::new(&definition, session)
    }))
}

/// Grade a test and return the per-part and per-task breakdown.
pub fn grade_test(state: &AppState, test_id: &str) -> Result<ScoreReport, CommandError> {
    let definition = definition(state, test_id)?;
    Ok(with_session(state, &definition, |_, _, session| {
        score_breakdown(session.answers(), &definition)
    }))
}

/// Discard all answers for a test.
pub fn reset_progress(state: &AppState, test_id: &str) -> Result<ExamView, CommandError> {
    let definition = definition(state, test_id)?;

    let store = state.store.lock().expect("store lock");
    let mut sessions = state.sessions.lock().expect("sessions lock");
    let session = Session::reset(&*store, &definition.storage_key());
    let view = ExamView::new(&definition, &session);
    sessions.insert(definition.id.clone(), session);

    tracing::info!(test = test_id, "progress reset");
    Ok(view)
}

/// Tests that have answers saved in storage, sorted by test ID.
pub fn saved_progress(state: &AppState) -> Result<Vec<SavedProgress>, CommandError> {
    let store = state.store.lock().expect("store lock");
    let storage = store.surface();

    let mut saved = Vec::new();
    for summary in state.catalog.list() {
        let Some(definition) = state.catalog.get(&summary.id) else {
            continue;
        };
        let key = definition.storage_key();
        let answers = store.load(&key);
        if answers.is_empty() {
            continue;
        }
        saved.push(SavedProgress {
            test_id: summary.id,
            answered: answers.answered_count(),
            updated_at: storage.updated_at(&key)?,
        });
    }

    Ok(saved)
}
