//! Progress reporting for CLI

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Progress reporter using indicatif
pub struct ProgressReporter {
    bar: Arc<ProgressBar>,
}

impl ProgressReporter {
    /// Creates a spinner-style reporter for a scan of unknown record count.
    pub fn for_scan_mft() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        bar.set_message("scanning $MFT...");

        Self { bar: Arc::new(bar) }
    }

    /// Finishes with a message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Gets a callback for scan progress: `records` is the number of MFT
    /// records examined so far.
    pub fn scan_callback(&self) -> Box<dyn Fn(u64) + Send + Sync> {
        let bar = Arc::clone(&self.bar);
        Box::new(move |records: u64| {
            bar.tick();
            bar.set_message(format!("scanning $MFT... {records} records examined"));
        })
    }
}
