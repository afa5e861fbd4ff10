use crate::errors::TdError;

pub mod config;
pub mod dashboard;
pub mod settings;

pub use config::RunnerConfig;
pub use dashboard::{DashboardRunner, Report, load_report};

pub trait Runner {
    fn run(&self) -> Result<(), TdError>;
}
