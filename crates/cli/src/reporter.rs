use indicatif::{ProgressBar, ProgressStyle};

use docuflow_core::{BatchResult, ConversionOutcome, ProgressReporter};

/// Renders batch progress as a terminal progress bar.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            bar
        };
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for BarReporter {
    fn on_progress(&self, _index: usize, _total: usize, outcome: &ConversionOutcome) {
        let name = outcome
            .request
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mark = if outcome.success { "ok" } else { "failed" };
        self.bar.set_message(format!("{} {}", mark, name));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, result: &BatchResult) {
        self.bar.finish_with_message(format!(
            "{} converted, {} failed",
            result.succeeded(),
            result.failed()
        ));
    }
}
