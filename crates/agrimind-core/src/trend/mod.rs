//! Moving averages and threshold signals over the normalized series.

mod signals;

pub use signals::{analyze, TrendConfig, TrendSignals};

use num_traits::{Float, NumCast};

/// Trailing moving average over the finite values of `values`.
///
/// The window shrinks at the start instead of padding. A position whose
/// window holds no finite value yields `None`, never zero. Output length
/// always equals input length. A window of 0 is treated as 1.
pub fn moving_average<T: Float>(values: &[Option<T>], window: usize) -> Vec<Option<T>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .filter_map(|v| (*v).filter(|x| x.is_finite()))
                .fold((T::zero(), 0usize), |(sum, count), x| (sum + x, count + 1));
            if count == 0 {
                None
            } else {
                <T as NumCast>::from(count).map(|n| sum / n)
            }
        })
        .collect()
}

/// Mean of the finite entries, `None` when there are none.
pub fn finite_mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        None
    } else {
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    }
}
