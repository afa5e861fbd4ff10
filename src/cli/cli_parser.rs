use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    errors::TdError,
    ingest::DEFAULT_DELIMITER,
    runner::{
        DashboardRunner, Runner, RunnerConfig,
        config::{DEFAULT_INPUT, DEFAULT_OUTPUT, parse_delimiter},
        settings::SettingsRunner,
    },
};

use super::{
    init_logging,
    settings::{Settings, load_settings},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(help = "Requirement traceability report export [default: traceability_report.csv]")]
    input: Option<PathBuf>,

    #[arg(long, short, help = "Dashboard file to write [default: dashboard.html]")]
    output: Option<PathBuf>,

    #[arg(long, help = "Also write the dashboard data as JSON to this path")]
    json: Option<PathBuf>,

    #[arg(long, short, help = "Field delimiter of the export [default: ;]")]
    delimiter: Option<String>,

    #[arg(long, short, help = "Project name shown in the dashboard header")]
    title: Option<String>,

    #[arg(long, default_value_t = false, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the settings file in $VISUAL / $EDITOR
    Config,
}

fn runner_config(cli: Cli, settings: Settings) -> Result<RunnerConfig, TdError> {
    let delimiter = match cli.delimiter.as_deref() {
        Some(delimiter) => parse_delimiter(delimiter)?,
        None => settings.delimiter.unwrap_or(DEFAULT_DELIMITER),
    };

    Ok(RunnerConfig::new(
        cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        cli.output
            .or(settings.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        cli.json,
        delimiter,
        cli.title.or(settings.title),
        cli.verbose,
    ))
}

pub fn parse_cli() -> Result<Box<dyn Runner>, TdError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Config) = cli.command {
        return Ok(Box::new(SettingsRunner));
    }

    let config = runner_config(cli, load_settings()?)?;
    if !config.input.exists() {
        return Err(TdError::InputNotFound(config.input));
    }
    Ok(Box::new(DashboardRunner::new(config)))
}
