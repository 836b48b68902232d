use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_HEAT_STRESS_CELSIUS, DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_RAINFALL_DEFICIT_RATIO,
};
use crate::series::{finite_values, Field, TimeSeriesPoint};

use super::{finite_mean, moving_average};

/// Thresholds for the trend signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Trailing window for the yield moving average.
    pub window: usize,
    /// Latest rainfall below `ratio * mean` is a deficit.
    pub rainfall_deficit_ratio: f64,
    /// Latest temperature above this (°C) is heat stress.
    pub heat_stress_celsius: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_MOVING_AVERAGE_WINDOW,
            rainfall_deficit_ratio: DEFAULT_RAINFALL_DEFICIT_RATIO,
            heat_stress_celsius: DEFAULT_HEAT_STRESS_CELSIUS,
        }
    }
}

/// Boolean agronomic signals derived from the whole series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSignals {
    pub yield_trend_up: bool,
    pub rainfall_deficit: bool,
    pub heat_stress: bool,
}

impl TrendSignals {
    pub fn any(&self) -> bool {
        self.yield_trend_up || self.rainfall_deficit || self.heat_stress
    }
}

/// Derive the trend signals. Missing data suppresses a signal.
pub fn analyze(points: &[TimeSeriesPoint], config: &TrendConfig) -> TrendSignals {
    let yields = finite_values(points, Field::Yield);
    let rains = finite_values(points, Field::Rainfall);
    let temps = finite_values(points, Field::Temperature);

    let signals = TrendSignals {
        yield_trend_up: yield_trend_up(&yields, config.window),
        rainfall_deficit: rainfall_deficit(&rains, config.rainfall_deficit_ratio),
        heat_stress: temps
            .last()
            .is_some_and(|&t| t > config.heat_stress_celsius),
    };
    debug!(?signals, points = points.len(), "Trend signals computed");
    signals
}

/// The latest moving average exceeds the one two positions earlier.
fn yield_trend_up(yields: &[f64], window: usize) -> bool {
    let wrapped: Vec<Option<f64>> = yields.iter().copied().map(Some).collect();
    let averaged = moving_average(&wrapped, window);
    let n = averaged.len();
    if n < 3 {
        return false;
    }
    match (averaged[n - 1], averaged[n - 3]) {
        (Some(latest), Some(earlier)) => latest > earlier,
        _ => false,
    }
}

fn rainfall_deficit(rains: &[f64], ratio: f64) -> bool {
    match (rains.last(), finite_mean(rains)) {
        (Some(&latest), Some(mean)) => latest < mean * ratio,
        _ => false,
    }
}
