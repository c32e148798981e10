//! Log consumer task: the only writer to the sink.

use super::clock::Clock;
use super::record::LogRecord;
use super::sink::Sink;
use std::sync::Arc;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

/// Drains the delivery queue into the sink.
///
/// The consumer owns the sink, including any rotation state, for as long as it
/// runs; nothing else writes to it, so no lock is involved.
pub(crate) struct Consumer {
    queue: mpsc::Receiver<LogRecord>,
    sink: Sink,
    clock: Arc<dyn Clock>,
    processed: watch::Sender<u64>,
}

impl Consumer {
    pub(crate) fn new(
        queue: mpsc::Receiver<LogRecord>,
        sink: Sink,
        clock: Arc<dyn Clock>,
        processed: watch::Sender<u64>,
    ) -> Self {
        Self {
            queue,
            sink,
            clock,
            processed,
        }
    }

    /// Run until `stop` fires (or its sender is dropped), then hand the sink
    /// back so the caller can close it.
    pub(crate) async fn run(mut self, mut stop: oneshot::Receiver<()>) -> Sink {
        debug!("Log consumer started");
        loop {
            tokio::select! {
                // Records already queued win over a pending stop.
                biased;
                record = self.queue.recv() => match record {
                    Some(record) => {
                        self.deliver(&record);
                        // A queue that never empties must not hide the stop.
                        if stop_requested(&mut stop) {
                            break;
                        }
                    }
                    None => break,
                },
                _ = &mut stop => break,
            }
        }

        self.queue.close();
        drop(stop);
        // Producers that slipped in before the close are still written.
        while let Ok(record) = self.queue.try_recv() {
            self.deliver(&record);
        }
        self.sink.flush();
        debug!(
            processed = *self.processed.borrow(),
            "Log consumer stopped"
        );
        self.sink
    }

    fn deliver(&mut self, record: &LogRecord) {
        self.sink.write(record, self.clock.as_ref());
        if self.queue.is_empty() {
            self.sink.flush();
        }
        self.processed.send_modify(|count| *count = count.saturating_add(1));
    }
}

/// True once stop was sent or its sender is gone.
fn stop_requested(stop: &mut oneshot::Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod consumer_tests;
