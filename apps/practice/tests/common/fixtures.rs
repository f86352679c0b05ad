//! Test fixtures and factory functions for creating test data.

use exam_core::{Part, Skill, Task, TestDefinition};

pub const SCENARIO: &str = "scenario";
pub const MODELLSATZ: &str = "modellsatz-1";

/// One part `p1` with tasks `{1: "B", 2: "richtig"}` and no examples.
pub fn scenario_definition() -> TestDefinition {
    let mut definition = TestDefinition::new(
        SCENARIO,
        "Scenario",
        vec![Part {
            part_id: "p1".to_string(),
            title: "Teil 1".to_string(),
            skill: Skill::Reading,
            tasks: vec![Task::new(1, "B"), Task::new(2, "richtig")],
        }],
    );
    definition.storage_key = Some("k1".to_string());
    definition
}

/// A small Modellsatz with reading, listening and writing parts.
pub fn modellsatz_definition() -> TestDefinition {
    TestDefinition::new(
        MODELLSATZ,
        "Modellsatz 1",
        vec![
            Part {
                part_id: "lesen-1".to_string(),
                title: "Leseverstehen Teil 1".to_string(),
                skill: Skill::Reading,
                tasks: vec![
                    Task::example(0, "C"),
                    Task::new(1, "A"),
                    Task::new(2, "D"),
                    Task::new(3, "B"),
                ],
            },
            Part {
                part_id: "hoeren-1".to_string(),
                title: "Hörverstehen Teil 1".to_string(),
                skill: Skill::Listening,
                tasks: vec![
                    Task::example(0, "richtig"),
                    Task::new(1, "falsch"),
                    Task::new(2, "richtig"),
                ],
            },
            Part {
                part_id: "schreiben-1".to_string(),
                title: "Schriftliche Kommunikation Teil 1".to_string(),
                skill: Skill::Writing,
                tasks: vec![Task::new(1, "weil"), Task::new(2, "obwohl")],
            },
        ],
    )
}
