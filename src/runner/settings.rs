use crate::{cli::settings::update_settings, errors::TdError};

use super::Runner;

/// Opens the settings file in the user's editor.
pub struct SettingsRunner;

impl Runner for SettingsRunner {
    fn run(&self) -> Result<(), TdError> {
        update_settings()
    }
}
