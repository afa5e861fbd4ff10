use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestStatus {
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "NOTRUN")]
    NotRun,
    #[serde(rename = "TO DO")]
    ToDo,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
            TestStatus::NotRun => "NOTRUN",
            TestStatus::ToDo => "TO DO",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::NotRun => "notrun",
            TestStatus::ToDo => "todo",
        }
    }
}

impl Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps free-text test execution status onto the closed status vocabulary.
///
/// Rules are case-insensitive and checked in order, so a status mentioning
/// both "pass" and "fail" ends up as [`TestStatus::Passed`]. Anything not
/// recognised, blank included, lands in [`TestStatus::ToDo`].
pub fn normalize_status(raw: &str) -> TestStatus {
    let status = raw.trim().to_uppercase();
    if status.contains("PASS") || status == "DONE" {
        TestStatus::Passed
    } else if status.contains("FAIL") {
        TestStatus::Failed
    } else if status.contains("NOTRUN") || status.contains("NOT RUN") {
        TestStatus::NotRun
    } else {
        TestStatus::ToDo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_known_vocabulary() {
        assert_eq!(normalize_status("Done"), TestStatus::Passed);
        assert_eq!(normalize_status("PASS"), TestStatus::Passed);
        assert_eq!(normalize_status("passed"), TestStatus::Passed);
        assert_eq!(normalize_status("FAIL"), TestStatus::Failed);
        assert_eq!(normalize_status("Failed"), TestStatus::Failed);
        assert_eq!(normalize_status("NOTRUN"), TestStatus::NotRun);
        assert_eq!(normalize_status("Not Run"), TestStatus::NotRun);
    }

    #[test]
    fn normalize_falls_back_to_todo() {
        assert_eq!(normalize_status(""), TestStatus::ToDo);
        assert_eq!(normalize_status("Blocked"), TestStatus::ToDo);
        assert_eq!(normalize_status("EXECUTING"), TestStatus::ToDo);
        // "Done" only counts as an exact match
        assert_eq!(normalize_status("Undone"), TestStatus::ToDo);
    }

    #[test]
    fn pass_wins_over_fail() {
        assert_eq!(normalize_status("fail then pass"), TestStatus::Passed);
    }

    #[test]
    fn serialized_names() {
        assert_eq!(serde_json::to_string(&TestStatus::ToDo).unwrap(), "\"TO DO\"");
        assert_eq!(TestStatus::ToDo.css_class(), "todo");
        assert_eq!(TestStatus::NotRun.to_string(), "NOTRUN");
    }
}
