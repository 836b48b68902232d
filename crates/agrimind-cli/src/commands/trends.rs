use std::path::PathBuf;

use agrimind_core::pipeline::AnalyticsSession;
use anyhow::{Context, Result};
use clap::Args;

use crate::summary;

#[derive(Args)]
pub struct TrendsArgs {
    /// CSV file with one row per period
    pub file: PathBuf,

    /// Analytics config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Moving average window, overrides the config
    #[arg(long)]
    pub window: Option<usize>,
}

pub fn run(args: &TrendsArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_ref())?;
    if let Some(window) = args.window {
        config.trend.window = window;
    }
    let window = config.trend.window;

    let mut session = AnalyticsSession::new(config);
    let rows = session
        .ingest_csv(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    if rows == 0 {
        println!("No rows in {}", args.file.display());
        return Ok(());
    }

    summary::print_series_table(session.series(), window);
    summary::print_signals(&session.signals());
    summary::print_recommendations(session.recommendations());
    Ok(())
}
