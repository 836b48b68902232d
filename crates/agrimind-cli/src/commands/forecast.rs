use std::path::PathBuf;

use agrimind_core::forecast::ModelStatus;
use agrimind_core::pipeline::AnalyticsSession;
use anyhow::{Context, Result};
use clap::Args;

use crate::progress::BarReporter;
use crate::summary;

#[derive(Args)]
pub struct ForecastArgs {
    /// CSV file with a yield column
    pub file: PathBuf,

    /// Analytics config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of future periods, overrides the config
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Training epochs, overrides the config
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Initialization seed, overrides the config
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &ForecastArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_ref())?;
    if let Some(horizon) = args.horizon {
        config.forecast.horizon = horizon;
    }
    if let Some(epochs) = args.epochs {
        config.forecast.epochs = epochs;
    }
    if let Some(seed) = args.seed {
        config.forecast.seed = seed;
    }

    let mut session = AnalyticsSession::new(config);
    session
        .ingest_csv(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let reporter = BarReporter::new();
    let status = session.train_forecast(&reporter);
    reporter.finish(&status.to_string());

    summary::print_model_status(status);
    if status == ModelStatus::Ready {
        summary::print_forecast(session.forecast(), session.latest_yield());
    }
    summary::print_recommendations(session.recommendations());
    Ok(())
}
