//! Progress reporter that remembers what it was told.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{BatchResult, ConversionOutcome, ProgressReporter};

/// One `on_progress` call.
#[derive(Debug, Clone)]
pub struct ProgressCall {
    pub index: usize,
    pub total: usize,
    pub outcome: ConversionOutcome,
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<ProgressCall>,
    completed: Option<BatchResult>,
}

/// Reporter that records every callback for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All progress calls in the order they arrived.
    pub fn calls(&self) -> Vec<ProgressCall> {
        self.lock().calls.clone()
    }

    /// Indices in arrival order.
    pub fn indices(&self) -> Vec<usize> {
        self.lock().calls.iter().map(|c| c.index).collect()
    }

    /// Totals in arrival order.
    pub fn totals(&self) -> Vec<usize> {
        self.lock().calls.iter().map(|c| c.total).collect()
    }

    /// Whether `on_batch_complete` was called.
    pub fn completed(&self) -> bool {
        self.lock().completed.is_some()
    }

    /// The result passed to `on_batch_complete`.
    pub fn batch_result(&self) -> Option<BatchResult> {
        self.lock().completed.clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn on_progress(&self, index: usize, total: usize, outcome: &ConversionOutcome) {
        self.lock().calls.push(ProgressCall {
            index,
            total,
            outcome: outcome.clone(),
        });
    }

    fn on_batch_complete(&self, result: &BatchResult) {
        self.lock().completed = Some(result.clone());
    }
}
