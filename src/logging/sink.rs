//! Sink strategy: where a formatted line physically goes.

use super::clock::Clock;
use super::error::{LogError, Result};
use super::record::{LogRecord, ANSI_RESET};
use super::rotation::DailyFile;
use serde::Deserialize;
use std::fmt;
use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Output selector as supplied by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputMode {
    #[default]
    Stdio,
    File,
}

impl FromStr for OutputMode {
    type Err = LogError;

    /// Accepts `stdio` (alias `stdout`) and `file` in any case, plus the
    /// numeric selectors `1` (stdio) and `2` (file).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stdio" | "stdout" | "1" => Ok(Self::Stdio),
            "file" | "2" => Ok(Self::File),
            _ => Err(LogError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputMode {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdio => "stdio",
            Self::File => "file",
        })
    }
}

/// Validated sink selection. Fixed for the lifetime of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Stdio,
    File(PathBuf),
}

impl SinkConfig {
    /// Pair a mode with its directory. `File` requires one; `Stdio` ignores it.
    pub fn new(mode: OutputMode, dir: Option<&Path>) -> Result<Self> {
        match (mode, dir) {
            (OutputMode::Stdio, _) => Ok(Self::Stdio),
            (OutputMode::File, Some(dir)) => Ok(Self::File(dir.to_path_buf())),
            (OutputMode::File, None) => Err(LogError::MissingDirectory),
        }
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        match self {
            Self::Stdio => OutputMode::Stdio,
            Self::File(_) => OutputMode::File,
        }
    }
}

/// The live sink, driven only by the consumer task.
#[derive(Debug)]
pub(crate) enum Sink {
    Stdio { out: Stdout, color: bool },
    File(DailyFile),
}

impl Sink {
    /// Open the sink for `config`. In file mode today's file is opened
    /// eagerly so a broken directory fails initialization.
    pub(crate) fn open(config: &SinkConfig, clock: &dyn Clock, color: bool) -> Result<Self> {
        match config {
            SinkConfig::Stdio => Ok(Self::Stdio {
                out: std::io::stdout(),
                color,
            }),
            SinkConfig::File(dir) => Ok(Self::File(DailyFile::open(dir, clock.now().date())?)),
        }
    }

    pub(crate) fn write(&mut self, record: &LogRecord, clock: &dyn Clock) {
        match self {
            Self::Stdio { out, color } => {
                let mut out = out.lock();
                let written = if *color {
                    writeln!(
                        out,
                        "{}{}{ANSI_RESET}",
                        record.severity().ansi_color(),
                        record.line()
                    )
                } else {
                    writeln!(out, "{}", record.line())
                };
                if let Err(e) = written {
                    warn!("Failed to write log line to stdout: {e}");
                }
            }
            Self::File(file) => file.write_line(clock.now().date(), record.line()),
        }
    }

    pub(crate) fn flush(&mut self) {
        match self {
            Self::Stdio { out, .. } => {
                if let Err(e) = out.flush() {
                    warn!("Failed to flush stdout: {e}");
                }
            }
            Self::File(file) => file.flush(),
        }
    }

    /// Flush and release the sink; closes the file in file mode.
    pub(crate) fn close(mut self) {
        self.flush();
        if let Self::File(file) = self {
            file.close();
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod sink_tests;
