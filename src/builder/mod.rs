use tracing::trace;

use crate::{
    ingest::{
        TraceRow,
        row::{
            PARENT_KEY, PARENT_SUMMARY, PROJECT_KEY, PROJECT_NAME, REQUIREMENT_KEY,
            REQUIREMENT_STATUS, REQUIREMENT_SUMMARY, TEST_KEY, TEST_STATUS, TEST_SUMMARY,
        },
    },
    model::{
        Epic, Hierarchy, KeyResolution, Story, Test, TestLink, TestStatus, normalize_status,
        types::fill_blank,
    },
};

/// The fields of one row the hierarchy cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields<'a> {
    pub parent_key: &'a str,
    pub parent_summary: &'a str,
    pub requirement_key: &'a str,
    pub requirement_summary: &'a str,
    pub requirement_status: &'a str,
    pub test_key: &'a str,
    pub test_summary: &'a str,
    pub test_status: &'a str,
}

impl<'a> From<&'a TraceRow> for RowFields<'a> {
    fn from(row: &'a TraceRow) -> Self {
        Self {
            parent_key: row.get(PARENT_KEY),
            parent_summary: row.get(PARENT_SUMMARY),
            requirement_key: row.get(REQUIREMENT_KEY),
            requirement_summary: row.get(REQUIREMENT_SUMMARY),
            requirement_status: row.get(REQUIREMENT_STATUS),
            test_key: row.get(TEST_KEY),
            test_summary: row.get(TEST_SUMMARY),
            test_status: row.get(TEST_STATUS),
        }
    }
}

fn detect_project_name(row: &TraceRow, requirement_key: &str) -> String {
    let declared = if row.get(PROJECT_NAME).is_empty() {
        row.get(PROJECT_KEY)
    } else {
        row.get(PROJECT_NAME)
    };
    if !declared.is_empty() {
        return declared.to_string();
    }
    // Issue keys look like PROJ-123
    match requirement_key.split_once('-') {
        Some((prefix, _)) => prefix.to_string(),
        None => String::new(),
    }
}

fn ensure_epic(hierarchy: &mut Hierarchy, key: &str, summary: &str) {
    hierarchy
        .epics
        .entry(key.to_string())
        .and_modify(|epic| fill_blank(&mut epic.summary, summary))
        .or_insert_with(|| Epic::new(key, summary));
}

fn ensure_story(hierarchy: &mut Hierarchy, fields: &RowFields) {
    let story = hierarchy
        .stories
        .entry(fields.requirement_key.to_string())
        .or_insert_with(|| {
            Story::new(
                fields.requirement_key,
                fields.requirement_summary,
                fields.requirement_status,
                fields.parent_key,
            )
        });
    fill_blank(&mut story.summary, fields.requirement_summary);
    fill_blank(&mut story.status, fields.requirement_status);

    // A story belongs to the epic that first claimed it
    let owner = story.epic_key.clone();
    if let Some(epic) = hierarchy.epics.get_mut(&owner) {
        if !epic.has_story(fields.requirement_key) {
            epic.stories.push(fields.requirement_key.to_string());
        }
    }
}

fn merge_link(links: &mut Vec<TestLink>, test_key: &str, summary: &str, status: TestStatus) {
    match links.iter_mut().find(|link| link.test_key == test_key) {
        Some(link) => fill_blank(&mut link.summary, summary),
        None => links.push(TestLink::new(test_key, summary, status)),
    }
}

fn link_test(hierarchy: &mut Hierarchy, fields: &RowFields) {
    let status = normalize_status(fields.test_status);
    let test = hierarchy
        .tests
        .entry(fields.test_key.to_string())
        .or_insert_with(|| Test::new(fields.test_key, fields.test_summary, status));
    fill_blank(&mut test.summary, fields.test_summary);
    test.stories.insert(fields.requirement_key.to_string());

    match hierarchy.resolve(fields.requirement_key) {
        KeyResolution::Story(story_key) => {
            if let Some(story) = hierarchy.stories.get_mut(&story_key) {
                merge_link(&mut story.tests, fields.test_key, fields.test_summary, status);
            }
        }
        KeyResolution::Epic(epic_key) => {
            if let Some(epic) = hierarchy.epics.get_mut(&epic_key) {
                merge_link(
                    &mut epic.direct_tests,
                    fields.test_key,
                    fields.test_summary,
                    status,
                );
            }
        }
        KeyResolution::Unresolved => {
            trace!(test = fields.test_key, "test references an unknown requirement");
        }
    }
}

/// Folds one row into the hierarchy and hands it back.
pub fn fold_row(mut hierarchy: Hierarchy, row: &TraceRow) -> Hierarchy {
    let fields = RowFields::from(row);

    if hierarchy.project_name.is_none() {
        hierarchy.project_name = Some(detect_project_name(row, fields.requirement_key));
    }

    if !fields.parent_key.is_empty() {
        ensure_epic(&mut hierarchy, fields.parent_key, fields.parent_summary);
    }

    if !fields.requirement_key.is_empty() {
        if fields.parent_key.is_empty() {
            ensure_epic(
                &mut hierarchy,
                fields.requirement_key,
                fields.requirement_summary,
            );
        } else {
            ensure_story(&mut hierarchy, &fields);
        }
    }

    if !fields.test_key.is_empty() && !fields.requirement_key.is_empty() {
        link_test(&mut hierarchy, &fields);
    }

    hierarchy
}

/// Builds the hierarchy from a whole row stream in one pass.
pub fn build<I>(rows: I) -> Hierarchy
where
    I: IntoIterator<Item = TraceRow>,
{
    rows.into_iter()
        .fold(Hierarchy::new(), |hierarchy, row| fold_row(hierarchy, &row))
}
