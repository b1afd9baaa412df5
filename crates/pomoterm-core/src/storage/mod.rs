mod config;

pub use config::{AlertConfig, Config, ProgressConfig, UiConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pomoterm[-dev]/` based on POMOTERM_ENV.
///
/// Set POMOTERM_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOTERM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomoterm-dev")
    } else {
        base_dir.join("pomoterm")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::NoConfigDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Directory for log files, `<data dir>/logs`.
pub fn logs_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("logs"))
}
