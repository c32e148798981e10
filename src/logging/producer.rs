//! Producer API: the entry points request handlers call.

use super::clock::Clock;
use super::record::LogRecord;
use std::future::Future;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Cloneable handle for submitting records to a pipeline.
///
/// Each call formats its record immediately and then enqueues it. Enqueuing
/// waits while the queue is full; records are never dropped for lack of space.
/// Once the pipeline has shut down, submissions are discarded silently:
/// logging after shutdown is a caller error, but it must not take the caller
/// down with it.
#[derive(Clone)]
pub struct LogHandle {
    sender: mpsc::Sender<LogRecord>,
    clock: Arc<dyn Clock>,
    enqueued: Arc<AtomicU64>,
}

impl LogHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<LogRecord>,
        clock: Arc<dyn Clock>,
        enqueued: Arc<AtomicU64>,
    ) -> Self {
        Self {
            sender,
            clock,
            enqueued,
        }
    }

    /// Submit an informational record.
    ///
    /// The record is built when this is called; the returned future only
    /// performs the enqueue, so it must be awaited for the record to be
    /// delivered.
    pub fn info(&self, message: impl AsRef<str>) -> impl Future<Output = ()> + Send + '_ {
        let record = LogRecord::info(self.clock.now(), message.as_ref());
        self.enqueue(record)
    }

    /// Submit an error record attributed to the caller's source location.
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) -> impl Future<Output = ()> + Send + '_ {
        let location = Location::caller().into();
        let record = LogRecord::error(self.clock.now(), message.as_ref(), location);
        self.enqueue(record)
    }

    /// Blocking form of [`LogHandle::info`] for producers on plain threads.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn blocking_info(&self, message: impl AsRef<str>) {
        let record = LogRecord::info(self.clock.now(), message.as_ref());
        self.blocking_enqueue(record);
    }

    /// Blocking form of [`LogHandle::error`] for producers on plain threads.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    #[track_caller]
    pub fn blocking_error(&self, message: impl AsRef<str>) {
        let location = Location::caller().into();
        let record = LogRecord::error(self.clock.now(), message.as_ref(), location);
        self.blocking_enqueue(record);
    }

    async fn enqueue(&self, record: LogRecord) {
        if self.sender.send(record).await.is_ok() {
            self.enqueued.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn blocking_enqueue(&self, record: LogRecord) {
        if self.sender.blocking_send(record).is_ok() {
            self.enqueued.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// True once the pipeline has stopped accepting records.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("closed", &self.sender.is_closed())
            .field("enqueued", &self.enqueued.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "producer_tests.rs"]
mod producer_tests;
