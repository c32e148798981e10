//! Common test utilities

use chrono::{NaiveDate, NaiveDateTime};
use daylog::{log_file_name, Logger, ManualClock, OutputMode, RunningLogger};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
#[allow(dead_code)] // Test utility for integration tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A fixed local time on the given day
#[allow(dead_code)] // Test utility for integration tests
pub fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid date")
}

/// Start a file-mode pipeline in `dir` driven by `clock`
#[allow(dead_code)] // Test utility for integration tests
pub fn start_file_pipeline(dir: &Path, clock: &ManualClock) -> RunningLogger {
    Logger::builder(OutputMode::File)
        .directory(dir)
        .clock(clock.clone())
        .build()
        .expect("Failed to initialize file pipeline")
        .run()
}

/// Lines of the log file written for `date`, empty if the file does not exist
#[allow(dead_code)] // Test utility for integration tests
pub fn read_log(dir: &Path, date: NaiveDate) -> Vec<String> {
    std::fs::read_to_string(dir.join(log_file_name(date)))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Strip the `[SEVERITY][HH:MM:SS] ` prefix from a line
#[allow(dead_code)] // Not every test binary inspects bare messages
pub fn message(line: &str) -> &str {
    line.split_once("] ").map_or(line, |(_, rest)| rest)
}
