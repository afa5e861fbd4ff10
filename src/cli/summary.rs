use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::{metrics::CoverageBand, render::Dashboard};

#[derive(Tabled)]
struct EpicRow {
    #[tabled(rename = "Epic")]
    key: String,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Stories")]
    stories: String,
    #[tabled(rename = "Coverage")]
    coverage: String, // Plain text, colorized after rendering
    #[tabled(rename = "Tests")]
    tests: usize,
    #[tabled(rename = "Passed")]
    passed: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
    #[tabled(rename = "Not Run")]
    notrun: usize,
    #[tabled(rename = "To Do")]
    todo: usize,
}

fn coverage_text(band: CoverageBand, percent: f64) -> String {
    match band {
        CoverageBand::NoStories => "-".to_string(),
        _ => format!("{:.1}%", percent),
    }
}

fn epic_rows(dashboard: &Dashboard) -> Vec<(EpicRow, CoverageBand)> {
    dashboard
        .epics
        .iter()
        .map(|epic| {
            let m = &epic.metrics;
            (
                EpicRow {
                    key: epic.key.clone(),
                    summary: epic.summary.clone(),
                    stories: format!("{}/{}", m.covered_stories, m.total_stories),
                    coverage: coverage_text(epic.band, m.coverage_percent),
                    tests: m.total_tests,
                    passed: m.passed_tests,
                    failed: m.failed_tests,
                    notrun: m.notrun_tests,
                    todo: m.todo_tests,
                },
                epic.band,
            )
        })
        .collect()
}

// Colorizes the coverage cell of each data row. The first row drawn
// between vertical borders is the header.
fn colorize_table_output(table_str: &str, bands: &[CoverageBand]) -> String {
    let mut bands = bands.iter();
    let mut in_header = true;
    table_str
        .lines()
        .map(|line| {
            if !line.starts_with('│') {
                return line.to_string();
            }
            if in_header {
                in_header = false;
                return line.to_string();
            }
            let mut cells: Vec<String> = line.split('│').map(|cell| cell.to_string()).collect();
            match bands.next() {
                Some(band) if cells.len() > 4 => {
                    cells[4] = match band {
                        CoverageBand::High => cells[4].green().to_string(),
                        CoverageBand::Medium => cells[4].yellow().to_string(),
                        CoverageBand::Low => cells[4].red().to_string(),
                        CoverageBand::NoStories => cells[4].dimmed().to_string(),
                    };
                    cells.join("│")
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn epic_table(dashboard: &Dashboard) -> String {
    let (rows, bands): (Vec<EpicRow>, Vec<CoverageBand>) =
        epic_rows(dashboard).into_iter().unzip();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    colorize_table_output(&table.to_string(), &bands)
}

pub fn print_epic_table(dashboard: &Dashboard) {
    if dashboard.epics.is_empty() {
        println!("{}", "No epics found in the input.".yellow());
        return;
    }
    println!("\n{}", epic_table(dashboard));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{EpicMetrics, SummaryMetrics};
    use crate::render::EpicView;

    fn epic(key: &str, total: usize, covered: usize) -> EpicView {
        let metrics = EpicMetrics {
            total_stories: total,
            covered_stories: covered,
            uncovered_stories: total - covered,
            coverage_percent: if total == 0 {
                0.0
            } else {
                covered as f64 / total as f64 * 100.0
            },
            ..EpicMetrics::default()
        };
        let band = metrics.band();
        EpicView {
            key: key.to_string(),
            summary: format!("{} summary", key),
            metrics,
            band,
            band_class: band.css_class(),
            stories: vec![],
            direct_tests: vec![],
        }
    }

    #[test]
    fn table_lists_every_epic() {
        colored::control::set_override(false);
        let dashboard = Dashboard {
            project_name: "Project".to_string(),
            source: "report.csv".to_string(),
            generated_at: String::new(),
            summary: SummaryMetrics::default(),
            epics: vec![epic("EPIC-1", 4, 3), epic("REQ-2", 0, 0)],
        };

        let table = epic_table(&dashboard);
        assert!(table.contains("Coverage"));
        assert!(table.contains("EPIC-1"));
        assert!(table.contains("3/4"));
        assert!(table.contains("75.0%"));
        assert!(table.contains("REQ-2"));
        assert!(table.contains("0/0"));
    }
}
