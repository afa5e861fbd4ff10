use std::{fmt::Display, path::PathBuf};

#[derive(Debug)]
pub enum TdError {
    InputNotFound(PathBuf),
    MalformedInput(String),
    InvalidArgument(String),
    IoError(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    RuntimeError(String),
}

impl std::error::Error for TdError {}

impl Display for TdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TdError::InputNotFound(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            TdError::MalformedInput(error) => write!(f, "Malformed input: {}", error),
            TdError::InvalidArgument(error) => write!(f, "{}", error),
            TdError::IoError(io_error) => write!(f, "{}", io_error),
            TdError::Csv(error) => write!(f, "{}", error),
            TdError::Json(error) => write!(f, "{}", error),
            TdError::RuntimeError(error) => write!(f, "{}", error),
        }
    }
}

impl From<std::io::Error> for TdError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<csv::Error> for TdError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for TdError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
