use agrimind_core::pipeline::{AnalyticsStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives an indicatif bar from core progress callbacks.
pub struct BarReporter {
    pb: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len}") {
            pb.set_style(style.progress_chars("=> "));
        }
        Self { pb }
    }

    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: AnalyticsStage, total_items: Option<usize>) {
        self.pb.reset();
        self.pb.set_length(total_items.unwrap_or(0) as u64);
        self.pb.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        if let Some(len) = self.pb.length() {
            self.pb.set_position(len);
        }
    }
}
