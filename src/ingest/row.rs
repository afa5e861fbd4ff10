use std::collections::HashMap;

pub const PARENT_KEY: &str = "Parent Requirement Key";
pub const PARENT_SUMMARY: &str = "Parent Requirement Summary";
pub const REQUIREMENT_KEY: &str = "Requirement Key";
pub const REQUIREMENT_SUMMARY: &str = "Requirement Summary";
pub const REQUIREMENT_STATUS: &str = "Requirement Status";
pub const TEST_KEY: &str = "Test Key";
pub const TEST_SUMMARY: &str = "Test Summary";
pub const TEST_STATUS: &str = "Test Status";
pub const PROJECT_NAME: &str = "Project name";
pub const PROJECT_KEY: &str = "Project key";

/// One record of the export, addressed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceRow {
    fields: HashMap<String, String>,
}

impl TraceRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Trimmed value of `column`, empty when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields
            .get(column)
            .map(|value| value.trim())
            .unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_trims_and_defaults() {
        let row = TraceRow::from_pairs([(REQUIREMENT_KEY, "  STORY-1 "), (TEST_KEY, "")]);
        assert_eq!(row.get(REQUIREMENT_KEY), "STORY-1");
        assert_eq!(row.get(TEST_KEY), "");
        assert_eq!(row.get(PARENT_KEY), "");
        assert!(!row.is_blank());
        assert!(TraceRow::default().is_blank());
    }
}
