use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Epic, Hierarchy, TestLink, TestStatus};

const HIGH_COVERAGE: f64 = 80.0;
const MEDIUM_COVERAGE: f64 = 50.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageBand {
    NoStories,
    High,
    Medium,
    Low,
}

impl CoverageBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            CoverageBand::NoStories => "no-stories",
            CoverageBand::High => "coverage-high",
            CoverageBand::Medium => "coverage-medium",
            CoverageBand::Low => "coverage-low",
        }
    }
}

fn coverage_percent(covered: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct EpicMetrics {
    pub total_stories: usize,
    pub covered_stories: usize,
    pub uncovered_stories: usize,
    pub coverage_percent: f64,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub notrun_tests: usize,
    pub todo_tests: usize,
}

impl EpicMetrics {
    fn count(&mut self, status: TestStatus) {
        self.total_tests += 1;
        match status {
            TestStatus::Passed => self.passed_tests += 1,
            TestStatus::Failed => self.failed_tests += 1,
            TestStatus::NotRun => self.notrun_tests += 1,
            TestStatus::ToDo => self.todo_tests += 1,
        }
    }

    pub fn band(&self) -> CoverageBand {
        if self.total_stories == 0 {
            CoverageBand::NoStories
        } else if self.coverage_percent >= HIGH_COVERAGE {
            CoverageBand::High
        } else if self.coverage_percent >= MEDIUM_COVERAGE {
            CoverageBand::Medium
        } else {
            CoverageBand::Low
        }
    }
}

/// Document-wide figures.
///
/// Everything except `total_epics` and `distinct_tests` is the plain sum of
/// the per-epic metrics, so a test linked from two epics is counted twice in
/// `total_tests`. `distinct_tests` is the size of the test table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SummaryMetrics {
    pub total_epics: usize,
    pub total_stories: usize,
    pub covered_stories: usize,
    pub uncovered_stories: usize,
    pub coverage_percent: f64,
    pub total_tests: usize,
    pub distinct_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub notrun_tests: usize,
    pub todo_tests: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Metrics {
    pub epics: BTreeMap<String, EpicMetrics>,
    pub summary: SummaryMetrics,
}

impl Metrics {
    pub fn epic(&self, key: &str) -> Option<&EpicMetrics> {
        self.epics.get(key)
    }
}

fn count_links<'a>(
    metrics: &mut EpicMetrics,
    seen_tests: &mut HashSet<&'a str>,
    links: &'a [TestLink],
) {
    for link in links {
        if seen_tests.insert(link.test_key.as_str()) {
            metrics.count(link.status);
        }
    }
}

/// Metrics of a single epic. A test reachable through several of its
/// stories, or both through a story and directly, is counted once.
pub fn epic_metrics(hierarchy: &Hierarchy, epic: &Epic) -> EpicMetrics {
    let mut metrics = EpicMetrics::default();
    let mut seen_tests: HashSet<&str> = HashSet::new();

    for story in hierarchy.stories_of(epic) {
        metrics.total_stories += 1;
        if story.is_covered() {
            metrics.covered_stories += 1;
        }
        count_links(&mut metrics, &mut seen_tests, &story.tests);
    }
    count_links(&mut metrics, &mut seen_tests, &epic.direct_tests);

    metrics.uncovered_stories = metrics.total_stories - metrics.covered_stories;
    metrics.coverage_percent = coverage_percent(metrics.covered_stories, metrics.total_stories);
    metrics
}

pub fn aggregate(hierarchy: &Hierarchy) -> Metrics {
    let epics: BTreeMap<String, EpicMetrics> = hierarchy
        .epics
        .iter()
        .map(|(key, epic)| (key.clone(), epic_metrics(hierarchy, epic)))
        .collect();

    let mut summary = SummaryMetrics {
        total_epics: epics.len(),
        distinct_tests: hierarchy.tests.len(),
        ..SummaryMetrics::default()
    };
    for metrics in epics.values() {
        summary.total_stories += metrics.total_stories;
        summary.covered_stories += metrics.covered_stories;
        summary.uncovered_stories += metrics.uncovered_stories;
        summary.total_tests += metrics.total_tests;
        summary.passed_tests += metrics.passed_tests;
        summary.failed_tests += metrics.failed_tests;
        summary.notrun_tests += metrics.notrun_tests;
        summary.todo_tests += metrics.todo_tests;
    }
    summary.coverage_percent = coverage_percent(summary.covered_stories, summary.total_stories);

    Metrics { epics, summary }
}
