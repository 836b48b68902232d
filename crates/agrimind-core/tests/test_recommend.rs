use agrimind_core::forecast::ForecastPoint;
use agrimind_core::recommend::{
    forecast_dip, recommend, AdviceConfig, Recommendation, RecommendationKind,
};
use agrimind_core::trend::TrendSignals;
use proptest::prelude::*;

fn point(predicted_yield: f64) -> ForecastPoint {
    ForecastPoint {
        index: 0,
        label: "T+1".into(),
        predicted_yield,
    }
}

fn kinds(recs: &[Recommendation]) -> Vec<RecommendationKind> {
    recs.iter().map(|r| r.kind).collect()
}

#[test]
fn test_no_signals_no_advice() {
    let recs = recommend(&TrendSignals::default(), &[], Some(10.0), &AdviceConfig::default());
    assert!(recs.is_empty());
}

#[test]
fn test_fixed_rule_order() {
    let signals = TrendSignals {
        yield_trend_up: true,
        rainfall_deficit: true,
        heat_stress: true,
    };
    let recs = recommend(&signals, &[point(5.0)], Some(10.0), &AdviceConfig::default());
    assert_eq!(
        kinds(&recs),
        vec![
            RecommendationKind::Irrigation,
            RecommendationKind::HeatStress,
            RecommendationKind::YieldImproving,
            RecommendationKind::YieldDip,
        ]
    );
}

#[test]
fn test_irrigation_text() {
    let signals = TrendSignals {
        rainfall_deficit: true,
        ..TrendSignals::default()
    };
    let recs = recommend(&signals, &[], None, &AdviceConfig::default());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].title, "Irrigation watch");
    assert!(recs[0].detail.contains("supplemental irrigation"));
}

#[test]
fn test_forecast_dip_rule() {
    assert!(forecast_dip(&[point(9.4)], Some(10.0), 0.95));
    assert!(!forecast_dip(&[point(9.5)], Some(10.0), 0.95));
    assert!(!forecast_dip(&[point(1.0)], None, 0.95));
    assert!(!forecast_dip(&[], Some(10.0), 0.95));
    // A zero prediction is a real value and counts.
    assert!(forecast_dip(&[point(0.0)], Some(10.0), 0.95));
}

#[test]
fn test_any_forecast_point_can_trigger_dip() {
    let forecast = [point(12.0), point(11.0), point(8.0)];
    assert!(forecast_dip(&forecast, Some(10.0), 0.95));
}

proptest! {
    #[test]
    fn prop_adding_a_signal_never_removes_advice(
        trend in any::<bool>(),
        rain in any::<bool>(),
        heat in any::<bool>(),
        predicted in 0.0f64..20.0,
    ) {
        let config = AdviceConfig::default();
        let forecast = [point(predicted)];
        let base = TrendSignals { yield_trend_up: trend, rainfall_deficit: rain, heat_stress: heat };
        let more = TrendSignals { yield_trend_up: true, rainfall_deficit: rain, heat_stress: heat };
        let before = kinds(&recommend(&base, &forecast, Some(10.0), &config));
        let after = kinds(&recommend(&more, &forecast, Some(10.0), &config));
        for kind in before {
            prop_assert!(after.contains(&kind));
        }
    }
}
