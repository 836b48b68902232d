//! Rule-based advisories fused from trend signals and the forecast.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DIP_RATIO;
use crate::forecast::ForecastPoint;
use crate::trend::TrendSignals;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// A forecast below `dip_ratio * latest yield` flags a dip.
    pub dip_ratio: f64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            dip_ratio: DEFAULT_DIP_RATIO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    Irrigation,
    HeatStress,
    YieldImproving,
    YieldDip,
}

impl RecommendationKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Irrigation => "Irrigation watch",
            Self::HeatStress => "Heat stress risk",
            Self::YieldImproving => "Yield trend improving",
            Self::YieldDip => "Possible yield dip ahead",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Self::Irrigation => {
                "Recent rainfall below typical levels. Consider supplemental irrigation over the next 7-10 days."
            }
            Self::HeatStress => {
                "Recent temperatures exceed 32°C. Adjust irrigation timing to early morning/evening and monitor canopy temperature."
            }
            Self::YieldImproving => {
                "3-period moving average is rising. Stay the course on nutrient plan; minor N top-up may boost late growth."
            }
            Self::YieldDip => {
                "Short-term forecast suggests softening yields. Re-check pest pressure and soil moisture."
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub detail: String,
}

impl From<RecommendationKind> for Recommendation {
    fn from(kind: RecommendationKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            detail: kind.detail().to_string(),
        }
    }
}

/// Any forecast point falls below `ratio` of the latest known yield.
pub fn forecast_dip(forecast: &[ForecastPoint], latest_yield: Option<f64>, ratio: f64) -> bool {
    let Some(latest) = latest_yield.filter(|v| v.is_finite()) else {
        return false;
    };
    forecast
        .iter()
        .any(|f| f.predicted_yield.is_finite() && f.predicted_yield < latest * ratio)
}

/// Evaluate every rule independently, in fixed order. No signal, no advice.
pub fn recommend(
    signals: &TrendSignals,
    forecast: &[ForecastPoint],
    latest_yield: Option<f64>,
    config: &AdviceConfig,
) -> Vec<Recommendation> {
    let rules = [
        (signals.rainfall_deficit, RecommendationKind::Irrigation),
        (signals.heat_stress, RecommendationKind::HeatStress),
        (signals.yield_trend_up, RecommendationKind::YieldImproving),
        (
            forecast_dip(forecast, latest_yield, config.dip_ratio),
            RecommendationKind::YieldDip,
        ),
    ];
    rules
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, kind)| kind.into())
        .collect()
}
