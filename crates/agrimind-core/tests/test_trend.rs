use agrimind_core::series::{normalize, parse_csv_records};
use agrimind_core::trend::{analyze, finite_mean, moving_average, TrendConfig};
use approx::assert_relative_eq;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Moving average
// ---------------------------------------------------------------------------

#[test]
fn test_moving_average_shrinking_window() {
    let ma = moving_average(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)], 3);
    assert_eq!(ma, vec![Some(1.0), Some(1.5), Some(2.0), Some(3.0)]);
}

#[test]
fn test_moving_average_skips_missing() {
    let ma = moving_average(&[Some(1.0), None, Some(3.0), Some(5.0)], 3);
    assert_eq!(ma, vec![Some(1.0), Some(1.0), Some(2.0), Some(4.0)]);
}

#[test]
fn test_moving_average_all_missing_window() {
    let ma = moving_average(&[None, None, Some(6.0)], 2);
    assert_eq!(ma, vec![None, None, Some(6.0)]);
}

#[test]
fn test_moving_average_ignores_non_finite() {
    let ma = moving_average(&[Some(2.0), Some(f64::NAN), Some(f64::INFINITY)], 3);
    assert_eq!(ma, vec![Some(2.0), Some(2.0), Some(2.0)]);
}

#[test]
fn test_moving_average_window_zero_acts_as_one() {
    let ma = moving_average(&[Some(4.0f32), Some(8.0)], 0);
    assert_eq!(ma, vec![Some(4.0), Some(8.0)]);
}

#[test]
fn test_finite_mean() {
    assert_eq!(finite_mean(&[]), None);
    assert_relative_eq!(finite_mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
}

proptest! {
    #[test]
    fn prop_moving_average_preserves_length(
        values in prop::collection::vec(prop::option::of(-1e6f64..1e6), 0..64),
        window in 0usize..10,
    ) {
        prop_assert_eq!(moving_average(&values, window).len(), values.len());
    }

    #[test]
    fn prop_moving_average_within_window_bounds(
        values in prop::collection::vec(-1e3f64..1e3, 1..32),
        window in 1usize..6,
    ) {
        let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let ma = moving_average(&wrapped, window);
        for (i, avg) in ma.iter().enumerate() {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            let lo = slice.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = avg.unwrap();
            prop_assert!(avg >= lo - 1e-9 && avg <= hi + 1e-9);
        }
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

fn signals_for(csv: &str) -> agrimind_core::trend::TrendSignals {
    let points = normalize(&parse_csv_records(csv).unwrap());
    analyze(&points, &TrendConfig::default())
}

#[test]
fn test_rising_yields_signal_trend() {
    let s = signals_for("yield\n10\n11\n13\n15\n");
    assert!(s.yield_trend_up);
}

#[test]
fn test_falling_yields_no_trend() {
    let s = signals_for("yield\n15\n13\n11\n10\n");
    assert!(!s.yield_trend_up);
}

#[test]
fn test_rainfall_deficit_signal() {
    let s = signals_for("rainfall\n10\n10\n10\n2\n");
    assert!(s.rainfall_deficit);
    let s = signals_for("rainfall\n10\n10\n10\n10\n");
    assert!(!s.rainfall_deficit);
}

#[test]
fn test_heat_stress_uses_latest_finite_temperature() {
    assert!(signals_for("temp\n20\n33\n").heat_stress);
    assert!(!signals_for("temp\n33\n20\n").heat_stress);
    // Exactly at the threshold is not stress.
    assert!(!signals_for("temp\n32\n").heat_stress);
    assert!(signals_for("temp\n35\nx\n").heat_stress);
}

#[test]
fn test_missing_columns_suppress_signals() {
    let s = signals_for("date\n2021\n2022\n2023\n");
    assert!(!s.any());
}

#[test]
fn test_custom_thresholds() {
    let points = normalize(&parse_csv_records("temp\n30\n").unwrap());
    let config = TrendConfig {
        heat_stress_celsius: 28.0,
        ..TrendConfig::default()
    };
    assert!(analyze(&points, &config).heat_stress);
}
