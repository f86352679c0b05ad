//! Test content parsing and validation.
//!
//! Tests are authored either as JSON definitions or as a plain-text answer
//! key (Lösungsschlüssel).
//!
//! # Answer key format
//! ```text
//! # Modellsatz 1
//! [teil-1] Leseverstehen Teil 1 | reading
//! 0*: B
//! 1: B
//! 2: richtig
//!
//! [teil-2] Hörverstehen Teil 1 | listening
//! 1: falsch
//! ```
//! A `*` after the task ID marks a worked example.

use crate::error::{ContentError, Result};
use crate::types::{Part, Skill, Task, TestDefinition};
use std::collections::HashSet;

/// Parse and validate a JSON test definition.
pub fn parse_test_definition(json: &str) -> Result<TestDefinition> {
    let definition: TestDefinition = serde_json::from_str(json)?;
    definition.validate()?;
    Ok(definition)
}

impl TestDefinition {
    /// Check structural rules the grader relies on.
    ///
    /// Task IDs only need to be unique within their part; answers are stored
    /// per part, so two parts may both use task 1.
    pub fn validate(&self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(ContentError::EmptyTest {
                test_id: self.id.clone(),
            });
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ContentError::InvalidThreshold(self.fuzzy_threshold));
        }

        let mut part_ids = HashSet::new();
        for part in &self.parts {
            if !part_ids.insert(part.part_id.as_str()) {
                return Err(ContentError::DuplicatePart {
                    part_id: part.part_id.clone(),
                });
            }

            let mut task_ids = HashSet::new();
            for task in &part.tasks {
                if !task_ids.insert(task.task_id) {
                    return Err(ContentError::DuplicateTask {
                        part_id: part.part_id.clone(),
                        task_id: task.task_id,
                    });
                }
                if task.correct_answer.trim().is_empty() {
                    return Err(ContentError::EmptyAnswer {
                        part_id: part.part_id.clone(),
                        task_id: task.task_id,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Parse a plain-text answer key into parts.
pub fn parse_answer_key(content: &str) -> Result<Vec<Part>> {
    let mut parser = KeyParser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    parser.finalize()
}

struct PartBuilder {
    part: Part,
    seen_tasks: HashSet<u32>,
}

struct KeyParser {
    parts: Vec<Part>,
    current: Option<PartBuilder>,
    seen_parts: HashSet<String>,
}

impl KeyParser {
    fn new() -> Self {
        Self {
            parts: Vec::new(),
            current: None,
            seen_parts: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Section(header) => self.handle_section(header, line_num),
            LineType::Task(id, answer) => self.handle_task(id, answer, line_num),
            LineType::Skip => Ok(()),
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            LineType::Skip
        } else if let Some(rest) = trimmed.strip_prefix('[') {
            LineType::Section(rest)
        } else {
            match trimmed.split_once(':') {
                Some((id, answer)) => LineType::Task(id.trim(), Some(answer.trim())),
                None => LineType::Task(trimmed, None),
            }
        }
    }

    fn handle_section(&mut self, header: &str, line_num: usize) -> Result<()> {
        let (part_id, rest) = header.split_once(']').ok_or_else(|| ContentError::InvalidSection {
            line: line_num,
            value: header.to_string(),
        })?;
        let part_id = part_id.trim();
        if part_id.is_empty() {
            return Err(ContentError::InvalidSection {
                line: line_num,
                value: header.to_string(),
            });
        }

        let (title, skill) = match rest.split_once('|') {
            Some((title, skill_name)) => {
                let skill = Skill::parse(skill_name).ok_or_else(|| ContentError::UnknownSkill {
                    line: line_num,
                    value: skill_name.trim().to_string(),
                })?;
                (title.trim(), skill)
            }
            None => (rest.trim(), Skill::default()),
        };

        if !self.seen_parts.insert(part_id.to_string()) {
            return Err(ContentError::DuplicatePart {
                part_id: part_id.to_string(),
            });
        }

        self.flush();
        self.current = Some(PartBuilder {
            part: Part {
                part_id: part_id.to_string(),
                title: title.to_string(),
                skill,
                tasks: Vec::new(),
            },
            seen_tasks: HashSet::new(),
        });
        Ok(())
    }

    fn handle_task(&mut self, id: &str, answer: Option<&str>, line_num: usize) -> Result<()> {
        let builder = self
            .current
            .as_mut()
            .ok_or(ContentError::MissingSection { line: line_num })?;

        let (id, is_example) = match id.strip_suffix('*') {
            Some(stripped) => (stripped.trim(), true),
            None => (id, false),
        };
        let task_id = id.parse::<u32>().map_err(|_| ContentError::InvalidTaskId {
            line: line_num,
            value: id.to_string(),
        })?;

        let answer = match answer {
            Some(a) if !a.is_empty() => a,
            _ => return Err(ContentError::MissingAnswer { line: line_num }),
        };

        if !builder.seen_tasks.insert(task_id) {
            return Err(ContentError::DuplicateKeyTask {
                task_id,
                line: line_num,
            });
        }

        builder.part.tasks.push(Task {
            task_id,
            correct_answer: answer.to_string(),
            is_example,
        });
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(builder) = self.current.take() {
            self.parts.push(builder.part);
        }
    }

    fn finalize(mut self) -> Result<Vec<Part>> {
        self.flush();
        Ok(self.parts)
    }
}

enum LineType<'a> {
    Section(&'a str),
    Task(&'a str, Option<&'a str>),
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchingMode;
    use pretty_assertions::assert_eq;

    const DEFINITION: &str = r#"{
        "id": "modellsatz-1",
        "title": "Modellsatz 1",
        "parts": [
            {
                "partId": "teil-1",
                "title": "Leseverstehen Teil 1",
                "skill": "reading",
                "tasks": [
                    { "taskId": 0, "correctAnswer": "C", "isExample": true },
                    { "taskId": 1, "correctAnswer": "B" }
                ]
            },
            {
                "partId": "teil-2",
                "skill": "listening",
                "tasks": [ { "taskId": 1, "correctAnswer": "richtig" } ]
            }
        ]
    }"#;

    #[test]
    fn parse_json_definition() {
        let def = parse_test_definition(DEFINITION).unwrap();
        assert_eq!(def.id, "modellsatz-1");
        assert_eq!(def.parts.len(), 2);
        assert_eq!(def.parts[0].tasks[0], Task::example(0, "C"));
        assert_eq!(def.parts[1].skill, Skill::Listening);
        assert_eq!(def.matching_mode, MatchingMode::Exact);
        assert_eq!(def.fuzzy_threshold, 0.8);
        assert_eq!(def.scored_task_count(), 2);
    }

    #[test]
    fn reject_invalid_json() {
        let result = parse_test_definition("{not json");
        assert!(matches!(result, Err(ContentError::InvalidJson(_))));
    }

    #[test]
    fn reject_empty_test() {
        let result = parse_test_definition(r#"{"id": "t", "parts": []}"#);
        assert!(matches!(result, Err(ContentError::EmptyTest { .. })));
    }

    #[test]
    fn reject_duplicate_part() {
        let def = TestDefinition::new(
            "t",
            "",
            vec![
                Part {
                    part_id: "p1".to_string(),
                    title: String::new(),
                    skill: Skill::Reading,
                    tasks: vec![Task::new(1, "A")],
                },
                Part {
                    part_id: "p1".to_string(),
                    title: String::new(),
                    skill: Skill::Reading,
                    tasks: vec![Task::new(2, "A")],
                },
            ],
        );
        assert!(matches!(def.validate(), Err(ContentError::DuplicatePart { .. })));
    }

    #[test]
    fn reject_duplicate_task_within_part() {
        let json = r#"{"id": "t", "parts": [{"partId": "p1", "tasks": [
            {"taskId": 1, "correctAnswer": "A"},
            {"taskId": 1, "correctAnswer": "B"}
        ]}]}"#;
        let result = parse_test_definition(json);
        assert!(matches!(
            result,
            Err(ContentError::DuplicateTask { task_id: 1, .. })
        ));
    }

    #[test]
    fn reject_empty_answer() {
        let json = r#"{"id": "t", "parts": [{"partId": "p1", "tasks": [
            {"taskId": 4, "correctAnswer": "  "}
        ]}]}"#;
        let result = parse_test_definition(json);
        assert!(matches!(result, Err(ContentError::EmptyAnswer { task_id: 4, .. })));
    }

    #[test]
    fn reject_threshold_out_of_range() {
        let json = r#"{"id": "t", "fuzzyThreshold": 1.5, "parts": [{"partId": "p1", "tasks": []}]}"#;
        let result = parse_test_definition(json);
        assert!(matches!(result, Err(ContentError::InvalidThreshold(_))));
    }

    #[test]
    fn parse_key_sections() {
        let input = "# Modellsatz 1\n[teil-1] Leseverstehen Teil 1 | reading\n0*: B\n1: B\n2: richtig\n\n[teil-2] | Hörverstehen\n1: falsch";
        let parts = parse_answer_key(input).unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].part_id, "teil-1");
        assert_eq!(parts[0].title, "Leseverstehen Teil 1");
        assert_eq!(
            parts[0].tasks,
            vec![Task::example(0, "B"), Task::new(1, "B"), Task::new(2, "richtig")]
        );
        assert_eq!(parts[1].skill, Skill::Listening);
        assert_eq!(parts[1].title, "");
        assert_eq!(parts[1].tasks, vec![Task::new(1, "falsch")]);
    }

    #[test]
    fn parse_key_section_without_skill() {
        let parts = parse_answer_key("[p1] Gap fill\n1: Bahnhof").unwrap();
        assert_eq!(parts[0].skill, Skill::Reading);
        assert_eq!(parts[0].tasks[0].correct_answer, "Bahnhof");
    }

    #[test]
    fn parse_key_empty_content() {
        assert!(parse_answer_key("").unwrap().is_empty());
    }

    #[test]
    fn reject_key_task_before_section() {
        let result = parse_answer_key("1: B");
        assert!(matches!(result, Err(ContentError::MissingSection { line: 1 })));
    }

    #[test]
    fn reject_key_invalid_task_id() {
        let result = parse_answer_key("[p1]\nx: B");
        assert!(matches!(
            result,
            Err(ContentError::InvalidTaskId { line: 2, .. })
        ));
    }

    #[test]
    fn reject_key_missing_answer() {
        assert!(matches!(
            parse_answer_key("[p1]\n1:"),
            Err(ContentError::MissingAnswer { line: 2 })
        ));
        assert!(matches!(
            parse_answer_key("[p1]\n1"),
            Err(ContentError::MissingAnswer { line: 2 })
        ));
    }

    #[test]
    fn reject_key_duplicate_task() {
        let result = parse_answer_key("[p1]\n1: A\n1: B");
        assert!(matches!(
            result,
            Err(ContentError::DuplicateKeyTask { task_id: 1, line: 3 })
        ));
    }

    #[test]
    fn reject_key_bad_header() {
        assert!(matches!(
            parse_answer_key("[p1 Teil 1"),
            Err(ContentError::InvalidSection { line: 1, .. })
        ));
        assert!(matches!(
            parse_answer_key("[p1] Teil | speaking"),
            Err(ContentError::UnknownSkill { line: 1, .. })
        ));
    }
}
