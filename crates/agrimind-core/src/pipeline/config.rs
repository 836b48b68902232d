use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::DetectionConfig;
use crate::error::Result;
use crate::forecast::ForecastConfig;
use crate::recommend::AdviceConfig;
use crate::trend::TrendConfig;
use crate::vegetation::ZoningConfig;

/// Every tunable of the analytics session. Missing sections and fields fall
/// back to their defaults, so partial TOML files are accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub zoning: ZoningConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
}

impl AnalyticsConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
