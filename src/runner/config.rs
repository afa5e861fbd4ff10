use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{errors::TdError, ingest::DEFAULT_DELIMITER};

pub const DEFAULT_INPUT: &str = "traceability_report.csv";
pub const DEFAULT_OUTPUT: &str = "dashboard.html";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunnerConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub delimiter: u8,
    pub title: Option<String>,
    pub verbose: bool,
}

impl RunnerConfig {
    pub fn new(
        input: PathBuf,
        output: PathBuf,
        json_output: Option<PathBuf>,
        delimiter: u8,
        title: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            input,
            output,
            json_output,
            delimiter,
            title,
            verbose,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_INPUT),
            PathBuf::from(DEFAULT_OUTPUT),
            None,
            DEFAULT_DELIMITER,
            None,
            false,
        )
    }
}

/// Accepts exactly one ASCII character.
pub fn parse_delimiter(value: &str) -> Result<u8, TdError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) if delimiter.is_ascii() => Ok(delimiter as u8),
        _ => Err(TdError::InvalidArgument(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            value
        ))),
    }
}
