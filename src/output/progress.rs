//! Progress reporting on stderr

use crate::core::parallel::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress bar for the extraction phase
///
/// A disabled reporter keeps a hidden bar, so callers never branch on it.
pub struct ProgressReporter {
    enabled: bool,
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter; nothing is drawn unless `enabled`
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { enabled, bar }
    }

    /// Start a new progress operation
    pub fn start(&self, operation: &str) {
        self.bar.reset();
        self.bar.set_message(operation.to_string());
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(message.to_string());
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Remove the bar from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
