//! Pipeline settings, loaded from an optional TOML file.
//!
//! ```toml
//! [logging]
//! mode = "file"      # "stdio" (default) or "file"
//! dir = "/var/log/movies"
//! color = false      # stdout only, default true
//! ```

mod loader;
pub use loader::load_settings;

use crate::logging::OutputMode;
use serde::Deserialize;
use std::path::PathBuf;

fn default_color() -> bool {
    true
}

/// The `[logging]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            dir: None,
            color: default_color(),
        }
    }
}

/// Top-level settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    #[serde(default)]
    pub logging: LoggingSection,
}

impl LogSettings {
    /// Apply command-line or environment overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        mode: Option<OutputMode>,
        dir: Option<PathBuf>,
        no_color: bool,
    ) {
        if let Some(mode) = mode {
            self.logging.mode = mode;
        }
        if dir.is_some() {
            self.logging.dir = dir;
        }
        if no_color {
            self.logging.color = false;
        }
    }
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod config_tests;
