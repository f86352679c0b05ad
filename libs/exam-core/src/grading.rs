//! Self-scoring against a test's answer key.

use crate::matching::answers_match;
use crate::types::{AnswerState, Part, Score, Task, TestDefinition};
use serde::{Deserialize, Serialize};

/// Verdict for a single scored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

/// Result of grading one task, for the results view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub part_id: String,
    pub task_id: u32,
    pub given: Option<String>,
    pub expected: String,
    pub verdict: Verdict,
}

/// Score of a single part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartScore {
    pub part_id: String,
    pub title: String,
    /// Exam sheet section the part belongs to.
    pub section: String,
    pub score: Score,
}

/// Full grading result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall: Score,
    pub parts: Vec<PartScore>,
    pub tasks: Vec<TaskOutcome>,
}

/// Count correct answers over every non-example task.
///
/// Unanswered tasks count toward `total` only. Answers stored for task IDs
/// the definition does not know are ignored.
pub fn score(state: &AnswerState, definition: &TestDefinition) -> Score {
    definition
        .parts
        .iter()
        .map(|part| score_part(state, definition, part))
        .fold(Score::default(), |acc, s| Score {
            correct: acc.correct + s.correct,
            total: acc.total + s.total,
        })
}

/// Grade every task and break the score down by part.
pub fn score_breakdown(state: &AnswerState, definition: &TestDefinition) -> ScoreReport {
    let mut parts = Vec::with_capacity(definition.parts.len());
    let mut tasks = Vec::new();

    for part in &definition.parts {
        for task in part.scored_tasks() {
            tasks.push(TaskOutcome {
                part_id: part.part_id.clone(),
                task_id: task.task_id,
                given: state.get(&part.part_id, task.task_id).map(str::to_string),
                expected: task.correct_answer.clone(),
                verdict: verdict(state, definition, part, task),
            });
        }
        parts.push(PartScore {
            part_id: part.part_id.clone(),
            title: part.title.clone(),
            section: part.skill.section_title().to_string(),
            score: score_part(state, definition, part),
        });
    }

    ScoreReport {
        overall: score(state, definition),
        parts,
        tasks,
    }
}

fn score_part(state: &AnswerState, definition: &TestDefinition, part: &Part) -> Score {
    let mut result = Score::default();
    for task in part.scored_tasks() {
        result.total += 1;
        if verdict(state, definition, part, task) == Verdict::Correct {
            result.correct += 1;
        }
    }
    result
}

fn verdict(state: &AnswerState, definition: &TestDefinition, part: &Part, task: &Task) -> Verdict {
    match state.get(&part.part_id, task.task_id) {
        None => Verdict::Unanswered,
        Some(given)
            if answers_match(
                given,
                &task.correct_answer,
                definition.matching_mode,
                definition.fuzzy_threshold,
            ) =>
        {
            Verdict::Correct
        }
        Some(_) => Verdict::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchingMode, Skill};
    use pretty_assertions::assert_eq;

    fn part(id: &str, tasks: Vec<Task>) -> Part {
        Part {
            part_id: id.to_string(),
            title: format!("Teil {}", id),
            skill: Skill::Reading,
            tasks,
        }
    }

    fn scenario_definition() -> TestDefinition {
        TestDefinition::new(
            "scenario",
            "Scenario",
            vec![part("p1", vec![Task::new(1, "B"), Task::new(2, "richtig")])],
        )
    }

    #[test]
    fn one_correct_of_two() {
        let state = AnswerState::new().set_answer("p1", 1, "B");
        assert_eq!(
            score(&state, &scenario_definition()),
            Score { correct: 1, total: 2 }
        );
    }

    #[test]
    fn wrong_and_right() {
        let state = AnswerState::new()
            .set_answer("p1", 1, "A")
            .set_answer("p1", 2, "richtig");
        assert_eq!(
            score(&state, &scenario_definition()),
            Score { correct: 1, total: 2 }
        );
    }

    #[test]
    fn examples_never_count() {
        let def = TestDefinition::new(
            "t",
            "",
            vec![part("p1", vec![Task::example(0, "C"), Task::new(1, "A")])],
        );
        let with_example = AnswerState::new().set_answer("p1", 0, "C");
        let wrong_example = AnswerState::new().set_answer("p1", 0, "Z");

        assert_eq!(score(&with_example, &def), Score { correct: 0, total: 1 });
        assert_eq!(score(&wrong_example, &def), Score { correct: 0, total: 1 });
    }

    #[test]
    fn unknown_tasks_are_ignored() {
        let state = AnswerState::new()
            .set_answer("p1", 99, "B")
            .set_answer("p9", 1, "B");
        assert_eq!(
            score(&state, &scenario_definition()),
            Score { correct: 0, total: 2 }
        );
    }

    #[test]
    fn adding_a_correct_answer_is_monotonic() {
        let def = TestDefinition::new(
            "t",
            "",
            vec![
                part("p1", vec![Task::new(1, "A"), Task::new(2, "B")]),
                part("p2", vec![Task::new(1, "falsch"), Task::example(0, "richtig")]),
            ],
        );
        let mut state = AnswerState::new();
        let mut previous = score(&state, &def);

        for (part_id, task_id, value) in [("p2", 1, "falsch"), ("p1", 2, "B"), ("p1", 1, "A")] {
            state = state.set_answer(part_id, task_id, value);
            let current = score(&state, &def);
            assert!(current.correct >= previous.correct);
            assert_eq!(current.total, previous.total);
            previous = current;
        }
        assert_eq!(previous, Score { correct: 3, total: 3 });
    }

    #[test]
    fn same_task_id_in_two_parts() {
        let def = TestDefinition::new(
            "t",
            "",
            vec![
                part("teil-1", vec![Task::new(1, "A")]),
                part("teil-2", vec![Task::new(1, "richtig")]),
            ],
        );
        let state = AnswerState::new()
            .set_answer("teil-1", 1, "A")
            .set_answer("teil-2", 1, "falsch");
        assert_eq!(score(&state, &def), Score { correct: 1, total: 2 });
    }

    #[test]
    fn case_insensitive_definition() {
        let mut def = TestDefinition::new(
            "t",
            "",
            vec![part("gap", vec![Task::new(1, "Bahnhof")])],
        );
        def.matching_mode = MatchingMode::CaseInsensitive;
        let state = AnswerState::new().set_answer("gap", 1, " bahnhof");
        assert_eq!(score(&state, &def), Score { correct: 1, total: 1 });
    }

    #[test]
    fn breakdown_lists_outcomes() {
        let def = TestDefinition::new(
            "t",
            "",
            vec![
                part("p1", vec![Task::example(0, "C"), Task::new(1, "A"), Task::new(2, "B")]),
                part("p2", vec![Task::new(1, "richtig")]),
            ],
        );
        let state = AnswerState::new()
            .set_answer("p1", 1, "A")
            .set_answer("p1", 2, "C");

        let report = score_breakdown(&state, &def);

        assert_eq!(report.overall, Score { correct: 1, total: 3 });
        assert_eq!(report.overall, score(&state, &def));
        assert_eq!(report.parts[0].score, Score { correct: 1, total: 2 });
        assert_eq!(report.parts[1].score, Score { correct: 0, total: 1 });
        assert_eq!(report.parts[0].section, "Leseverstehen");
        assert_eq!(
            report.tasks.iter().map(|t| t.verdict).collect::<Vec<_>>(),
            vec![Verdict::Correct, Verdict::Incorrect, Verdict::Unanswered]
        );
        assert_eq!(report.tasks[1].given.as_deref(), Some("C"));
        assert_eq!(report.tasks[1].expected, "B");
    }
}
