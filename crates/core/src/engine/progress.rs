//! Progress reporting for batch conversions.

use tokio::sync::mpsc;

use super::types::{BatchResult, ConversionOutcome};

/// Receives per-file and end-of-batch notifications.
///
/// In parallel mode `on_progress` is called in completion order, `index`
/// always refers to the request's position in the input.
pub trait ProgressReporter: Send + Sync {
    /// Called once per request when it reaches a terminal state.
    fn on_progress(&self, index: usize, total: usize, outcome: &ConversionOutcome);

    /// Called once after every request is terminal.
    fn on_batch_complete(&self, _result: &BatchResult) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(usize, usize, &ConversionOutcome) + Send + Sync,
{
    fn on_progress(&self, index: usize, total: usize, outcome: &ConversionOutcome) {
        self(index, total, outcome)
    }
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_progress(&self, _index: usize, _total: usize, _outcome: &ConversionOutcome) {}
}

/// Event forwarded by [`ChannelReporter`].
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress {
        index: usize,
        total: usize,
        outcome: ConversionOutcome,
    },
    Completed {
        result: BatchResult,
    },
}

/// Forwards progress over an unbounded tokio channel.
///
/// A dropped receiver is ignored; reporting never fails a batch.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<BatchEvent>,
}

impl ChannelReporter {
    /// Creates a reporter and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wraps an existing sender.
    pub fn from_sender(tx: mpsc::UnboundedSender<BatchEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressReporter for ChannelReporter {
    fn on_progress(&self, index: usize, total: usize, outcome: &ConversionOutcome) {
        let _ = self.tx.send(BatchEvent::Progress {
            index,
            total,
            outcome: outcome.clone(),
        });
    }

    fn on_batch_complete(&self, result: &BatchResult) {
        let _ = self.tx.send(BatchEvent::Completed {
            result: result.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConversionRequest;
    use crate::format::Format;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn outcome() -> ConversionOutcome {
        ConversionOutcome {
            request: ConversionRequest::new("a.md", Format::Html),
            output_path: None,
            success: false,
            diagnostic: None,
            failure: None,
            output_size_bytes: None,
            duration_ms: 0,
        }
    }

    #[test]
    fn test_closure_reporter() {
        let calls = AtomicUsize::new(0);
        let reporter = |index: usize, total: usize, _outcome: &ConversionOutcome| {
            assert!(index < total);
            calls.fetch_add(1, Ordering::SeqCst);
        };

        let dyn_reporter: &dyn ProgressReporter = &reporter;
        dyn_reporter.on_progress(0, 2, &outcome());
        dyn_reporter.on_progress(1, 2, &outcome());
        dyn_reporter.on_batch_complete(&BatchResult::default());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_channel_reporter() {
        let (reporter, mut rx) = ChannelReporter::new();
        reporter.on_progress(0, 1, &outcome());
        reporter.on_batch_complete(&BatchResult::default());

        match rx.recv().await {
            Some(BatchEvent::Progress { index, total, .. }) => {
                assert_eq!((index, total), (0, 1));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(rx.recv().await, Some(BatchEvent::Completed { .. })));
    }

    #[test]
    fn test_channel_reporter_ignores_closed_receiver() {
        let (reporter, rx) = ChannelReporter::new();
        drop(rx);
        reporter.on_progress(0, 1, &outcome());
    }
}
