//! `daylog`: an asynchronous, single-writer log pipeline.
//!
//! Many producers hand formatted records to a bounded queue; a single consumer
//! task writes them, in order, to standard output or to a daily log file
//! (`DD-MM-YYYY.log`) that rotates when the calendar day changes.

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{load_settings, LogSettings, LoggingSection};
pub use logging::{
    log_file_name, Clock, LogError, LogHandle, LogRecord, Logger, LoggerBuilder, ManualClock,
    OutputMode, Result, RunningLogger, Severity, SinkConfig, SourceLocation, SystemClock,
    QUEUE_CAPACITY,
};
