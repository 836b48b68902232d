pub mod config;
mod session;
mod types;

pub use config::AnalyticsConfig;
pub use session::{AnalyticsSession, SessionReport};
pub use types::{AnalyticsStage, NoOpReporter, ProgressReporter};
