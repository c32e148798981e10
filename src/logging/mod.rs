//! Asynchronous single-writer log pipeline.
//!
//! Producers format a record and push it onto a bounded queue; one consumer
//! task drains the queue in order and writes each line to standard output or
//! to a file named after the current day, reopening the file when the day
//! changes.
//!
//! ```no_run
//! use daylog::{log_error, log_info, Logger, OutputMode};
//! use std::path::Path;
//!
//! # async fn example() -> daylog::Result<()> {
//! let logger = Logger::initialize(OutputMode::File, Some(Path::new("/var/log/movies")))?;
//! let pipeline = logger.run();
//! let log = pipeline.handle();
//!
//! log_info!(log, "created movie {}", 42).await;
//! log_error!(log, "lookup failed for {}", "Heat").await;
//!
//! pipeline.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod clock;
mod consumer;
mod error;
mod lifecycle;
mod macros;
mod producer;
mod record;
mod rotation;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LogError, Result};
pub use lifecycle::{Logger, LoggerBuilder, RunningLogger, QUEUE_CAPACITY};
pub use producer::LogHandle;
pub use record::{LogRecord, Severity, SourceLocation};
pub use rotation::log_file_name;
pub use sink::{OutputMode, SinkConfig};
