use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::status::TestStatus;

pub const DEFAULT_PROJECT_NAME: &str = "Project";

/// Keeps a populated field as is and only fills a blank one.
pub(crate) fn fill_blank(field: &mut String, candidate: &str) {
    if field.is_empty() && !candidate.is_empty() {
        *field = candidate.to_string();
    }
}

/// A test as linked from one story, or directly from an epic.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestLink {
    pub test_key: String,
    pub summary: String,
    pub status: TestStatus,
}

impl TestLink {
    pub fn new(test_key: &str, summary: &str, status: TestStatus) -> Self {
        Self {
            test_key: test_key.to_string(),
            summary: summary.to_string(),
            status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Epic {
    pub key: String,
    pub summary: String,
    pub stories: Vec<String>,
    pub direct_tests: Vec<TestLink>,
}

impl Epic {
    pub fn new(key: &str, summary: &str) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.to_string(),
            stories: vec![],
            direct_tests: vec![],
        }
    }

    pub fn has_story(&self, story_key: &str) -> bool {
        self.stories.iter().any(|key| key == story_key)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Story {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub epic_key: String,
    pub tests: Vec<TestLink>,
}

impl Story {
    pub fn new(key: &str, summary: &str, status: &str, epic_key: &str) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.to_string(),
            status: status.to_string(),
            epic_key: epic_key.to_string(),
            tests: vec![],
        }
    }

    pub fn is_covered(&self) -> bool {
        !self.tests.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Test {
    pub key: String,
    pub summary: String,
    pub status: TestStatus,
    pub stories: BTreeSet<String>,
}

impl Test {
    pub fn new(key: &str, summary: &str, status: TestStatus) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.to_string(),
            status,
            stories: BTreeSet::new(),
        }
    }
}

/// Where a requirement key points once the epic and story tables are filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    Story(String),
    Epic(String),
    Unresolved,
}

/// Flat entity tables for one traceability export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Hierarchy {
    pub epics: BTreeMap<String, Epic>,
    pub stories: BTreeMap<String, Story>,
    pub tests: BTreeMap<String, Test>,
    pub project_name: Option<String>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_name(&self) -> &str {
        self.project_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PROJECT_NAME)
    }

    /// Stories win over epics: a key that is both a story and a
    /// self-parented requirement resolves to the story.
    pub fn resolve(&self, key: &str) -> KeyResolution {
        if self.stories.contains_key(key) {
            KeyResolution::Story(key.to_string())
        } else if self.epics.contains_key(key) {
            KeyResolution::Epic(key.to_string())
        } else {
            KeyResolution::Unresolved
        }
    }

    pub fn stories_of<'a>(&'a self, epic: &'a Epic) -> impl Iterator<Item = &'a Story> + 'a {
        epic.stories
            .iter()
            .filter_map(move |story_key| self.stories.get(story_key))
    }
}
