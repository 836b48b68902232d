/// Analytics stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalyticsStage {
    Training,
}

impl std::fmt::Display for AnalyticsStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Training => write!(f, "Training forecast"),
        }
    }
}

/// Thread-safe progress reporting for long-running stages.
///
/// The forecast trainer calls `advance` once per epoch, which is where a
/// front end gets control back between units of work. All methods have
/// default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// (epochs) if known.
    fn begin_stage(&self, _stage: AnalyticsStage, _total_items: Option<usize>) {}

    /// `items_done` work items of the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores all progress.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
