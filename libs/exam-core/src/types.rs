//! Core types for exam practice.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill section a part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Reading,
    Listening,
    Writing,
}

impl Default for Skill {
    fn default() -> Self {
        Self::Reading
    }
}

impl Skill {
    /// German section title used on the exam sheet.
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Reading => "Leseverstehen",
            Self::Listening => "Hörverstehen",
            Self::Writing => "Schriftliche Kommunikation",
        }
    }

    /// Parse from either the English name or the German section title.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reading" | "leseverstehen" => Some(Self::Reading),
            "listening" | "hörverstehen" | "horverstehen" => Some(Self::Listening),
            "writing" | "schriftliche kommunikation" => Some(Self::Writing),
            _ => None,
        }
    }
}

/// Matching mode used when grading a stored token against the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Exact
    }
}

/// A single task (Aufgabe) and its correct answer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: u32,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_example: bool,
}

impl Task {
    pub fn new(task_id: u32, correct_answer: impl Into<String>) -> Self {
        Self {
            task_id,
            correct_answer: correct_answer.into(),
            is_example: false,
        }
    }

    /// Create a worked example that never counts toward the score.
    pub fn example(task_id: u32, correct_answer: impl Into<String>) -> Self {
        Self {
            is_example: true,
            ..Self::new(task_id, correct_answer)
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A named section (Teil) of a practice exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub part_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skill: Skill,
    pub tasks: Vec<Task>,
}

impl Part {
    /// Look up a task by ID.
    pub fn task(&self, task_id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Tasks that count toward the score.
    pub fn scored_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_example)
    }
}

/// Read-only structured definition of one practice test (Modellsatz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    pub parts: Vec<Part>,
    #[serde(default)]
    pub matching_mode: MatchingMode,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
}

fn default_fuzzy_threshold() -> f64 {
    0.8
}

impl TestDefinition {
    /// Create a definition with exact matching and the derived storage key.
    pub fn new(id: impl Into<String>, title: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            storage_key: None,
            parts,
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }

    /// Persistence key holding this test's answers.
    pub fn storage_key(&self) -> String {
        match &self.storage_key {
            Some(key) => key.clone(),
            None => format!("exam-answers:{}", self.id),
        }
    }

    /// Look up a part by ID.
    pub fn part(&self, part_id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.part_id == part_id)
    }

    /// Number of tasks that count toward the score.
    pub fn scored_task_count(&self) -> usize {
        self.parts.iter().map(|p| p.scored_tasks().count()).sum()
    }
}

/// A learner's in-progress answers for one test.
///
/// Serializes as `{ partId: { taskId: token } }`. A missing entry means the
/// task is unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerState {
    answers: BTreeMap<String, BTreeMap<u32, String>>,
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored token for a task, if any.
    pub fn get(&self, part_id: &str, task_id: u32) -> Option<&str> {
        self.answers
            .get(part_id)
            .and_then(|tasks| tasks.get(&task_id))
            .map(String::as_str)
    }

    /// Return a copy with one answer recorded. `self` is left untouched.
    pub fn set_answer(&self, part_id: &str, task_id: u32, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.answers
            .entry(part_id.to_string())
            .or_default()
            .insert(task_id, value.into());
        next
    }

    /// Return a copy with one answer removed. Empty parts are dropped.
    pub fn clear_answer(&self, part_id: &str, task_id: u32) -> Self {
        let mut next = self.clone();
        if let Some(tasks) = next.answers.get_mut(part_id) {
            tasks.remove(&task_id);
            if tasks.is_empty() {
                next.answers.remove(part_id);
            }
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        self.answers.values().all(BTreeMap::is_empty)
    }

    /// Total number of stored answers across all parts.
    pub fn answered_count(&self) -> usize {
        self.answers.values().map(BTreeMap::len).sum()
    }

    /// Raw `partId -> taskId -> token` mapping.
    pub fn answers(&self) -> &BTreeMap<String, BTreeMap<u32, String>> {
        &self.answers
    }
}

/// Correct answers out of scored tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Percentage of correct answers, 0.0 when nothing is scored.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) * 100.0 / f64::from(self.total)
    }
}
