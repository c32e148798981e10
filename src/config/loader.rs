use super::LogSettings;
use crate::logging::{LogError, Result};
use std::path::Path;
use tracing::debug;

/// Load settings from `path`.
///
/// Returns `Ok(LogSettings::default())` when no path is given or the file does
/// not exist.
///
/// # Errors
///
/// Returns [`LogError`] if the file exists but cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<LogSettings> {
    let Some(path) = path else {
        return Ok(LogSettings::default());
    };
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(LogSettings::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| LogError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: LogSettings = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(settings)
}
