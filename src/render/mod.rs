use serde::Serialize;

use crate::{
    errors::TdError,
    metrics::{CoverageBand, EpicMetrics, Metrics, SummaryMetrics},
    model::{Epic, Hierarchy, TestLink, TestStatus},
    utils::natural_sort::natural_sort_key,
};

const TEMPLATE: &str = include_str!("template.html");
const DATA_PLACEHOLDER: &str = "{{DATA}}";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TestView {
    pub key: String,
    pub summary: String,
    pub status: TestStatus,
    pub status_class: &'static str,
}

impl From<&TestLink> for TestView {
    fn from(link: &TestLink) -> Self {
        Self {
            key: link.test_key.clone(),
            summary: link.summary.clone(),
            status: link.status,
            status_class: link.status.css_class(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StoryView {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub covered: bool,
    pub tests: Vec<TestView>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EpicView {
    pub key: String,
    pub summary: String,
    pub metrics: EpicMetrics,
    pub band: CoverageBand,
    pub band_class: &'static str,
    pub stories: Vec<StoryView>,
    pub direct_tests: Vec<TestView>,
}

/// Everything the dashboard page shows, in display order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Dashboard {
    pub project_name: String,
    pub source: String,
    pub generated_at: String,
    pub summary: SummaryMetrics,
    pub epics: Vec<EpicView>,
}

fn epic_view(hierarchy: &Hierarchy, epic: &Epic, metrics: EpicMetrics) -> EpicView {
    let mut stories: Vec<StoryView> = hierarchy
        .stories_of(epic)
        .map(|story| StoryView {
            key: story.key.clone(),
            summary: story.summary.clone(),
            status: story.status.clone(),
            covered: story.is_covered(),
            tests: story.tests.iter().map(TestView::from).collect(),
        })
        .collect();
    stories.sort_by_cached_key(|story| natural_sort_key(&story.summary));

    let band = metrics.band();
    EpicView {
        key: epic.key.clone(),
        summary: epic.summary.clone(),
        metrics,
        band,
        band_class: band.css_class(),
        stories,
        direct_tests: epic.direct_tests.iter().map(TestView::from).collect(),
    }
}

impl Dashboard {
    pub fn new(hierarchy: &Hierarchy, metrics: &Metrics, source: &str, generated_at: &str) -> Self {
        let mut epics: Vec<EpicView> = hierarchy
            .epics
            .values()
            .map(|epic| {
                let epic_metrics = metrics.epic(&epic.key).cloned().unwrap_or_default();
                epic_view(hierarchy, epic, epic_metrics)
            })
            .collect();
        epics.sort_by_cached_key(|epic| natural_sort_key(&epic.summary));

        Self {
            project_name: hierarchy.project_name().to_string(),
            source: source.to_string(),
            generated_at: generated_at.to_string(),
            summary: metrics.summary.clone(),
            epics,
        }
    }
}

/// Renders the dashboard as one HTML document with the data inlined.
pub fn render_html(dashboard: &Dashboard) -> Result<String, TdError> {
    // '<' only occurs inside JSON strings, so escaping it keeps the script
    // element from being closed early
    let data = serde_json::to_string(dashboard)?.replace('<', "\\u003c");
    Ok(TEMPLATE.replacen(DATA_PLACEHOLDER, &data, 1))
}

pub fn render_json(dashboard: &Dashboard) -> Result<String, TdError> {
    serde_json::to_string_pretty(dashboard).map_err(TdError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::build,
        ingest::{
            TraceRow,
            row::{
                PARENT_KEY, PARENT_SUMMARY, REQUIREMENT_KEY, REQUIREMENT_SUMMARY, TEST_KEY,
                TEST_STATUS, TEST_SUMMARY,
            },
        },
        metrics::aggregate,
    };
    use pretty_assertions::assert_eq;

    fn row(parent: (&str, &str), requirement: (&str, &str), test: (&str, &str, &str)) -> TraceRow {
        TraceRow::from_pairs([
            (PARENT_KEY, parent.0),
            (PARENT_SUMMARY, parent.1),
            (REQUIREMENT_KEY, requirement.0),
            (REQUIREMENT_SUMMARY, requirement.1),
            (TEST_KEY, test.0),
            (TEST_SUMMARY, test.1),
            (TEST_STATUS, test.2),
        ])
    }

    fn dashboard() -> Dashboard {
        let hierarchy = build(vec![
            row(("SHOP-1", "10. Reporting"), ("SHOP-11", "b story"), ("SHOP-90", "Export", "PASS")),
            row(("SHOP-1", "10. Reporting"), ("SHOP-12", "A story"), ("", "", "")),
            row(("SHOP-2", "2. Checkout"), ("SHOP-21", "Pay"), ("SHOP-91", "</script>", "FAIL")),
            row(("", ""), ("SHOP-3", "1. Login"), ("SHOP-92", "Smoke", "Not Run")),
        ]);
        let metrics = aggregate(&hierarchy);
        Dashboard::new(&hierarchy, &metrics, "report.csv", "Jan 01, 2026, 09:00:00 AM")
    }

    #[test]
    fn orders_epics_and_stories_naturally() {
        let dashboard = dashboard();

        let epics: Vec<&str> = dashboard.epics.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(epics, vec!["SHOP-3", "SHOP-2", "SHOP-1"]);

        let stories: Vec<&str> = dashboard.epics[2]
            .stories
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(stories, vec!["SHOP-12", "SHOP-11"]);
        assert_eq!(dashboard.project_name, "SHOP");
    }

    #[test]
    fn epic_views_carry_band_and_direct_tests() {
        let dashboard = dashboard();

        let login = &dashboard.epics[0];
        assert_eq!(login.band, CoverageBand::NoStories);
        assert_eq!(login.band_class, "no-stories");
        assert_eq!(login.direct_tests.len(), 1);
        assert_eq!(login.direct_tests[0].status, TestStatus::NotRun);
        assert_eq!(login.direct_tests[0].status_class, "notrun");

        let reporting = &dashboard.epics[2];
        assert_eq!(reporting.band, CoverageBand::Medium);
        assert!(!reporting.stories[0].covered);
        assert!(reporting.stories[1].covered);
    }

    #[test]
    fn html_embeds_escaped_data() {
        let html = render_html(&dashboard()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains(DATA_PLACEHOLDER));
        assert!(html.contains("\\u003c/script>"));
        assert!(html.contains("\"project_name\":\"SHOP\""));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn json_export() {
        let json = render_json(&dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_epics"], 3);
        assert_eq!(value["epics"][0]["band"], "no-stories");
        assert_eq!(value["epics"][1]["stories"][0]["tests"][0]["status"], "FAILED");
    }
}
