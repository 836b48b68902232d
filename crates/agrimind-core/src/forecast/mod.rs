mod config;
mod engine;
pub mod regressor;

pub use config::ForecastConfig;
pub use engine::{forecast_series, forecast_yield, yield_series, ForecastOutcome, ForecastPoint, ModelStatus};
pub use regressor::Regressor;
