use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FORECAST_EPOCHS, DEFAULT_FORECAST_HORIZON, DEFAULT_FORECAST_SEED,
    DEFAULT_HIDDEN_UNITS, DEFAULT_LEARNING_RATE, MIN_FORECAST_POINTS,
};

/// Forecast regressor settings. Small capacity and a short epoch budget are
/// intentional: the model is refit on every run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub hidden_units: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Number of future indices to predict.
    pub horizon: usize,
    /// Minimum finite yield values before training is attempted.
    pub min_points: usize,
    /// Weight initialization seed.
    pub seed: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            hidden_units: DEFAULT_HIDDEN_UNITS,
            epochs: DEFAULT_FORECAST_EPOCHS,
            learning_rate: DEFAULT_LEARNING_RATE,
            horizon: DEFAULT_FORECAST_HORIZON,
            min_points: MIN_FORECAST_POINTS,
            seed: DEFAULT_FORECAST_SEED,
        }
    }
}
