pub mod config;
pub mod detect;
pub mod forecast;
pub mod report;
pub mod trends;
pub mod zones;

use std::path::PathBuf;

use agrimind_core::pipeline::AnalyticsConfig;
use anyhow::{Context, Result};

/// Read `--config` if given, otherwise use the defaults.
pub fn load_config(path: Option<&PathBuf>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AnalyticsConfig::default()),
    }
}
