use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use home::home_dir;
use tracing::debug;

use crate::{errors::TdError, runner::config::parse_delimiter};

const DEFAULT_CONFIG: &str = r#"# ==========================
# The config file consists of simple key-value pairs,
# separated by equals signs.

# Spacing around the equals sign does not matter.
# key=value
# key = value

# Available settings
# delimiter=<single character>   field separator of the export
# output=<path>                  where the dashboard is written
# title=<text>                   project name shown in the header

# Default settings (uncomment and modify as needed)
# delimiter=;
# output=dashboard.html
"#;

/// Values read from the settings file. Command line flags take precedence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub delimiter: Option<u8>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
}

impl Settings {
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self, TdError> {
        let delimiter = config
            .get("delimiter")
            .map(|value| parse_delimiter(value))
            .transpose()?;
        Ok(Self {
            delimiter,
            output: config
                .get("output")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            title: config.get("title").filter(|value| !value.is_empty()).cloned(),
        })
    }
}

fn settings_location() -> Result<PathBuf, TdError> {
    let mut settings_location = home_dir().ok_or(TdError::RuntimeError(
        "Could not find home directory".to_string(),
    ))?;
    settings_location.push(".tracedash");
    settings_location.push("config");
    Ok(settings_location)
}

pub fn update_settings() -> Result<(), TdError> {
    let settings_location = settings_location()?;

    if !settings_location.exists() {
        if let Some(parent) = settings_location.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&settings_location)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;
    }

    open_in_editor(&settings_location)?;
    Ok(())
}

/// Open a file in the user's preferred editor
fn open_in_editor(path: &Path) -> Result<(), TdError> {
    let editor = env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else if cfg!(target_os = "macos") {
                "open".to_string()
            } else {
                "vim".to_string()
            }
        });

    let status = Command::new(&editor).arg(path).status().map_err(|e| {
        TdError::RuntimeError(format!("Failed to open editor '{}': {}", editor, e))
    })?;

    if !status.success() {
        return Err(TdError::RuntimeError(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(())
}

/// Parse the config file and return a HashMap of key-value pairs
fn parse_config(config_path: &Path) -> Result<HashMap<String, String>, TdError> {
    let file = File::open(config_path)?;
    let reader = BufReader::new(file);
    let mut config = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = trimmed.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                config.insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    Ok(config)
}

pub fn load_settings_from(config_path: &Path) -> Result<Settings, TdError> {
    if !config_path.exists() {
        return Ok(Settings::default());
    }
    let config = parse_config(config_path)?;
    debug!(path = %config_path.display(), keys = config.len(), "loaded settings");
    Settings::from_map(&config)
}

/// Load settings from the default location
pub fn load_settings() -> Result<Settings, TdError> {
    match home_dir() {
        Some(_) => load_settings_from(&settings_location()?),
        None => Ok(Settings::default()),
    }
}
