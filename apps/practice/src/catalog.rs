//! Read-only catalog of practice tests loaded from the content directory.

use exam_core::{parse_answer_key, parse_test_definition, ContentError, TestDefinition};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file}: {source}")]
    Content {
        file: String,
        #[source]
        source: ContentError,
    },

    #[error("duplicate test id: {0}")]
    DuplicateTest(String),
}

/// Short description of a test for listings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TestSummary {
    pub id: String,
    pub title: String,
    pub part_count: usize,
    pub scored_task_count: usize,
}

/// Test definitions keyed by test ID.
#[derive(Debug, Default, Clone)]
pub struct ContentCatalog {
    tests: HashMap<String, Arc<TestDefinition>>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions already in memory.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TestDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            definition.validate().map_err(|source| CatalogError::Content {
                file: definition.id.clone(),
                source,
            })?;
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Load every `*.json` definition and `*.key` answer key in `dir`.
    ///
    /// An answer key's file stem becomes its test ID and title.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        let mut paths = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        for path in paths {
            let extension = path.extension().and_then(|ext| ext.to_str());
            let file = path.to_string_lossy().to_string();
            let definition = match extension {
                Some("json") => {
                    let content = fs::read_to_string(&path)?;
                    parse_test_definition(&content)
                        .map_err(|source| CatalogError::Content { file, source })?
                }
                Some("key") => {
                    let content = fs::read_to_string(&path)?;
                    let stem = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("default")
                        .to_string();
                    let parts = parse_answer_key(&content)
                        .map_err(|source| CatalogError::Content { file: file.clone(), source })?;
                    let definition = TestDefinition::new(stem.clone(), stem, parts);
                    definition
                        .validate()
                        .map_err(|source| CatalogError::Content { file, source })?;
                    definition
                }
                _ => continue,
            };

            tracing::debug!(test = %definition.id, file = %path.display(), "loaded test");
            catalog.insert(definition)?;
        }

        tracing::info!(tests = catalog.len(), dir = %dir.display(), "content catalog loaded");
        Ok(catalog)
    }

    fn insert(&mut self, definition: TestDefinition) -> Result<(), CatalogError> {
        if self.tests.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateTest(definition.id));
        }
        self.tests.insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, test_id: &str) -> Option<Arc<TestDefinition>> {
        self.tests.get(test_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Summaries of all tests sorted by ID.
    pub fn list(&self) -> Vec<TestSummary> {
        let mut summaries: Vec<TestSummary> = self
            .tests
            .values()
            .map(|def| TestSummary {
                id: def.id.clone(),
                title: def.title.clone(),
                part_count: def.parts.len(),
                scored_task_count: def.scored_task_count(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }
}
