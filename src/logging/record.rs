//! Log records as they travel through the queue.

use chrono::{NaiveDateTime, SubsecRound};
use std::fmt;
use std::panic::Location;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_BLUE: &str = "\x1b[34m";
pub(crate) const ANSI_RESET: &str = "\x1b[0m";

/// Severity tag embedded in every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }

    pub(crate) const fn ansi_color(self) -> &'static str {
        match self {
            Self::Info => ANSI_BLUE,
            Self::Error => ANSI_RED,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Source position of the code that emitted an error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// One formatted, immutable log entry.
///
/// The text line is rendered when the record is created, so the consumer
/// only has to copy bytes into the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    severity: Severity,
    timestamp: NaiveDateTime,
    location: Option<SourceLocation>,
    line: String,
}

impl LogRecord {
    /// Build an informational record: `[INFO][HH:MM:SS] message`.
    #[must_use]
    pub fn info(timestamp: NaiveDateTime, message: &str) -> Self {
        let timestamp = timestamp.trunc_subsecs(0);
        let line = format!(
            "[{}][{}] {message}",
            Severity::Info,
            timestamp.format("%H:%M:%S")
        );
        Self {
            severity: Severity::Info,
            timestamp,
            location: None,
            line,
        }
    }

    /// Build an error record carrying the caller's location:
    /// `[ERROR][HH:MM:SS] message Line No:<line> File:<file>`.
    #[must_use]
    pub fn error(timestamp: NaiveDateTime, message: &str, location: SourceLocation) -> Self {
        let timestamp = timestamp.trunc_subsecs(0);
        let line = format!(
            "[{}][{}] {message} Line No:{} File:{}",
            Severity::Error,
            timestamp.format("%H:%M:%S"),
            location.line,
            location.file
        );
        Self {
            severity: Severity::Error,
            timestamp,
            location: Some(location),
            line,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Creation time, truncated to whole seconds.
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Caller location; present on error records only.
    #[must_use]
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    /// The rendered line, without a terminator.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
