//! Lifecycle controller: initialize, run, drain and stop a log pipeline.

use super::clock::{Clock, SystemClock};
use super::consumer::Consumer;
use super::error::{LogError, Result};
use super::producer::LogHandle;
use super::record::LogRecord;
use super::sink::{OutputMode, Sink, SinkConfig};
use crate::config::LogSettings;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Number of records the delivery queue holds before producers wait.
pub const QUEUE_CAPACITY: usize = 1000;

/// Configures a [`Logger`] before initialization.
pub struct LoggerBuilder {
    mode: OutputMode,
    dir: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    color: bool,
}

impl LoggerBuilder {
    /// Directory for daily log files. Required in file mode.
    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Time source for timestamps and file names.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Color stdout lines by severity (ignored in file mode).
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Validate the configuration and allocate the pipeline.
    ///
    /// In file mode today's file is opened here; if that fails the error is
    /// returned and no consumer can ever be started.
    pub fn build(self) -> Result<Logger> {
        let config = SinkConfig::new(self.mode, self.dir.as_deref())?;
        if let SinkConfig::File(dir) = &config {
            info!("Log directory: {}", dir.display());
        }
        let sink = Sink::open(&config, self.clock.as_ref(), self.color)?;

        let (sender, queue) = mpsc::channel(QUEUE_CAPACITY);
        let (stop, stop_rx) = oneshot::channel();
        Ok(Logger {
            config,
            sink,
            sender,
            queue,
            stop,
            stop_rx,
            clock: self.clock,
            enqueued: Arc::new(AtomicU64::new(0)),
        })
    }
}

/// An initialized pipeline whose consumer has not started yet.
///
/// Handles taken from it can already enqueue; records wait in the queue
/// (producers block once it is full) until [`Logger::run`] is called.
pub struct Logger {
    config: SinkConfig,
    sink: Sink,
    sender: mpsc::Sender<LogRecord>,
    queue: mpsc::Receiver<LogRecord>,
    stop: oneshot::Sender<()>,
    stop_rx: oneshot::Receiver<()>,
    clock: Arc<dyn Clock>,
    enqueued: Arc<AtomicU64>,
}

impl Logger {
    #[must_use]
    pub fn builder(mode: OutputMode) -> LoggerBuilder {
        LoggerBuilder {
            mode,
            dir: None,
            clock: Arc::new(SystemClock),
            color: true,
        }
    }

    /// Initialize with the system clock. `dir` is required in file mode.
    pub fn initialize(mode: OutputMode, dir: Option<&Path>) -> Result<Self> {
        let builder = Self::builder(mode);
        match dir {
            Some(dir) => builder.directory(dir).build(),
            None => builder.build(),
        }
    }

    /// Initialize from loaded settings.
    pub fn from_settings(settings: &LogSettings) -> Result<Self> {
        let logging = &settings.logging;
        let builder = Self::builder(logging.mode).color(logging.color);
        match &logging.dir {
            Some(dir) => builder.directory(dir.clone()).build(),
            None => builder.build(),
        }
    }

    #[must_use]
    pub fn sink_config(&self) -> &SinkConfig {
        &self.config
    }

    #[must_use]
    pub fn handle(&self) -> LogHandle {
        LogHandle::new(
            self.sender.clone(),
            Arc::clone(&self.clock),
            Arc::clone(&self.enqueued),
        )
    }

    /// Start the consumer task on the current tokio runtime.
    ///
    /// Consuming `self` keeps a pipeline down to a single consumer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use = "dropping the running logger stops the consumer without draining producers"]
    pub fn run(self) -> RunningLogger {
        let (processed_tx, processed) = watch::channel(0);
        let consumer = Consumer::new(self.queue, self.sink, Arc::clone(&self.clock), processed_tx);
        let task = tokio::spawn(consumer.run(self.stop_rx));
        info!(mode = %self.config.mode(), "Log pipeline running");
        RunningLogger {
            config: self.config,
            sender: self.sender,
            stop: self.stop,
            consumer: task,
            processed,
            clock: self.clock,
            enqueued: self.enqueued,
        }
    }
}

/// A pipeline with its consumer task running.
///
/// Stop it with [`RunningLogger::shutdown`]. Dropping it instead still stops
/// the consumer, which writes what is queued at that moment, but nothing
/// waits for it and the file is closed whenever the task ends.
pub struct RunningLogger {
    config: SinkConfig,
    sender: mpsc::Sender<LogRecord>,
    stop: oneshot::Sender<()>,
    consumer: JoinHandle<Sink>,
    processed: watch::Receiver<u64>,
    clock: Arc<dyn Clock>,
    enqueued: Arc<AtomicU64>,
}

impl RunningLogger {
    #[must_use]
    pub fn handle(&self) -> LogHandle {
        LogHandle::new(
            self.sender.clone(),
            Arc::clone(&self.clock),
            Arc::clone(&self.enqueued),
        )
    }

    #[must_use]
    pub fn sink_config(&self) -> &SinkConfig {
        &self.config
    }

    /// Records enqueued but not yet written.
    #[must_use]
    pub fn pending(&self) -> u64 {
        let processed = *self.processed.borrow();
        self.enqueued
            .load(Ordering::Acquire)
            .saturating_sub(processed)
    }

    /// Wait until every record enqueued before this call has been written.
    ///
    /// Records enqueued while waiting are not waited for, so a busy producer
    /// cannot hold this open on its own. It does wait as long as the consumer
    /// itself is stuck, with no upper bound.
    pub async fn drain(&mut self) {
        let target = self.enqueued.load(Ordering::Acquire);
        if self.processed.wait_for(|count| *count >= target).await.is_err() {
            warn!("Log consumer exited before the queue was drained");
        }
    }

    /// Drain the queue, stop the consumer and close the sink.
    ///
    /// Returns once every record enqueued before the call is in the sink and
    /// the log file (in file mode) is closed. Handles that outlive the
    /// pipeline keep working but their records are discarded.
    pub async fn shutdown(mut self) -> Result<()> {
        self.drain().await;
        self.stop_consumer().await
    }

    /// [`RunningLogger::shutdown`] with an upper bound on the drain wait.
    ///
    /// When `limit` passes the consumer is told to stop anyway: it closes the
    /// queue, writes what is already in it and exits. The number of records
    /// still pending at the deadline is reported as
    /// [`LogError::DrainTimeout`]; producers blocked on the full queue get
    /// their records discarded.
    pub async fn shutdown_timeout(mut self, limit: Duration) -> Result<()> {
        let drained = tokio::time::timeout(limit, self.drain()).await.is_ok();
        let pending = self.pending();
        self.stop_consumer().await?;
        if drained {
            Ok(())
        } else {
            warn!(pending, "Log drain timed out after {limit:?}");
            Err(LogError::DrainTimeout { pending })
        }
    }

    async fn stop_consumer(self) -> Result<()> {
        // The consumer may already be gone; joining below reports why.
        let _ = self.stop.send(());
        let sink = self.consumer.await?;
        sink.close();
        info!(mode = %self.config.mode(), "Log pipeline stopped");
        Ok(())
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod lifecycle_tests;
