use std::{fs, path::Path};

use chrono::Local;
use colored::Colorize;
use tracing::{debug, info};

use crate::{
    builder::build,
    cli::summary::print_epic_table,
    errors::TdError,
    ingest::RowReader,
    metrics::{Metrics, aggregate},
    model::Hierarchy,
    render::{Dashboard, render_html, render_json},
};

use super::{Runner, config::RunnerConfig};

const TIMESTAMP_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// The built hierarchy and its metrics for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub hierarchy: Hierarchy,
    pub metrics: Metrics,
}

pub fn load_report(input: &Path, delimiter: u8) -> Result<Report, TdError> {
    let rows = RowReader::from_path(input, delimiter)?;
    let hierarchy = build(rows);
    let metrics = aggregate(&hierarchy);
    debug!(
        epics = hierarchy.epics.len(),
        stories = hierarchy.stories.len(),
        tests = hierarchy.tests.len(),
        "built traceability hierarchy"
    );
    Ok(Report { hierarchy, metrics })
}

fn source_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| input.to_string_lossy().to_string())
}

fn write_artifact(path: &Path, content: &str) -> Result<(), TdError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

pub struct DashboardRunner {
    config: RunnerConfig,
}

impl DashboardRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn dashboard(&self, report: &Report, generated_at: &str) -> Dashboard {
        let mut dashboard = Dashboard::new(
            &report.hierarchy,
            &report.metrics,
            source_name(&self.config.input).as_str(),
            generated_at,
        );
        if let Some(title) = self.config.title.as_ref().filter(|title| !title.is_empty()) {
            dashboard.project_name = title.clone();
        }
        dashboard
    }

    fn print_parsed(&self, report: &Report) {
        println!("{}", "Parsed:".bold());
        println!("   - {} Epics", report.hierarchy.epics.len());
        println!("   - {} Stories", report.hierarchy.stories.len());
        println!("   - {} Tests", report.hierarchy.tests.len());
        let coverage = format!("{:.1}%", report.metrics.summary.coverage_percent);
        println!("   - {} story coverage", coverage.cyan().bold());
    }
}

impl Runner for DashboardRunner {
    fn run(&self) -> Result<(), TdError> {
        println!("Generating Requirements Traceability Dashboard...");
        println!("Reading: {}", self.config.input.display());

        let report = load_report(&self.config.input, self.config.delimiter)?;
        self.print_parsed(&report);

        let generated_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let dashboard = self.dashboard(&report, &generated_at);
        if self.config.verbose {
            print_epic_table(&dashboard);
        }

        write_artifact(&self.config.output, &render_html(&dashboard)?)?;
        if let Some(json_output) = &self.config.json_output {
            write_artifact(json_output, &render_json(&dashboard)?)?;
            println!("Data exported: {}", json_output.display());
        }

        println!(
            "{} {}",
            "Dashboard generated:".green().bold(),
            self.config.output.display()
        );
        Ok(())
    }
}
