use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::pipeline::{AnalyticsStage, ProgressReporter};
use crate::series::{finite_values, Field, TimeSeriesPoint};

use super::config::ForecastConfig;
use super::regressor::Regressor;

/// A predicted yield beyond the known series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Position continuing the yield-only series.
    pub index: usize,
    /// `T+1`, `T+2`, ...
    pub label: String,
    pub predicted_yield: f64,
}

/// Result of one forecast request.
#[derive(Clone, Debug, PartialEq)]
pub enum ForecastOutcome {
    /// Fewer finite yields than the configured minimum. The regressor was
    /// never built.
    InsufficientData { available: usize },
    /// Training diverged or failed; the reason is for logs only.
    TrainingFailed(String),
    Ready(Vec<ForecastPoint>),
}

impl ForecastOutcome {
    pub fn status(&self) -> ModelStatus {
        match self {
            Self::InsufficientData { .. } => ModelStatus::InsufficientData,
            Self::TrainingFailed(_) => ModelStatus::TrainingFailed,
            Self::Ready(_) => ModelStatus::Ready,
        }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        match self {
            Self::Ready(points) => points,
            _ => &[],
        }
    }
}

/// Forecast panel status shown to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelStatus {
    #[default]
    Idle,
    Training,
    InsufficientData,
    TrainingFailed,
    Ready,
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Training => write!(f, "Training..."),
            Self::InsufficientData => write!(f, "Not enough yield data"),
            Self::TrainingFailed => write!(f, "Training failed"),
            Self::Ready => write!(f, "Model ready"),
        }
    }
}

/// Finite yields in series order, implicitly re-indexed from 0.
pub fn yield_series(points: &[TimeSeriesPoint]) -> Vec<f64> {
    finite_values(points, Field::Yield)
}

/// Forecast the next `horizon` yields of a normalized series.
pub fn forecast_yield(
    points: &[TimeSeriesPoint],
    config: &ForecastConfig,
    reporter: &dyn ProgressReporter,
) -> ForecastOutcome {
    forecast_series(&yield_series(points), config, reporter)
}

/// Fit a fresh regressor on `index -> yield` and predict the next indices.
///
/// Predictions are rounded to 2 decimals. Failures are reported in the
/// outcome, never propagated.
pub fn forecast_series(
    yields: &[f64],
    config: &ForecastConfig,
    reporter: &dyn ProgressReporter,
) -> ForecastOutcome {
    let ys: Vec<f64> = yields.iter().copied().filter(|v| v.is_finite()).collect();
    if ys.len() < config.min_points.max(1) {
        info!(available = ys.len(), required = config.min_points, "Not enough yield data");
        return ForecastOutcome::InsufficientData { available: ys.len() };
    }

    let n = ys.len();
    let xs = Array1::from_shape_fn(n, |i| i as f64);
    let ys = Array1::from_vec(ys);

    let mut model = Regressor::new(config.hidden_units, config.seed);
    reporter.begin_stage(AnalyticsStage::Training, Some(config.epochs));
    let fitted = model.fit(&xs, &ys, config.epochs, config.learning_rate, |epoch, _| {
        reporter.advance(epoch)
    });
    reporter.finish_stage();

    let loss = match fitted {
        Ok(loss) => loss,
        Err(e) => {
            warn!(error = %e, "Forecast training failed");
            return ForecastOutcome::TrainingFailed(e.to_string());
        }
    };

    let future = Array1::from_shape_fn(config.horizon, |k| (n + k) as f64);
    let predicted = model.predict(&future);
    if predicted.iter().any(|v| !v.is_finite()) {
        warn!("Forecast produced non-finite predictions");
        return ForecastOutcome::TrainingFailed("non-finite prediction".to_string());
    }

    let points: Vec<ForecastPoint> = predicted
        .iter()
        .enumerate()
        .map(|(k, &v)| ForecastPoint {
            index: n + k,
            label: format!("T+{}", k + 1),
            predicted_yield: round2(v),
        })
        .collect();

    info!(samples = n, loss, horizon = points.len(), "Forecast model ready");
    ForecastOutcome::Ready(points)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
