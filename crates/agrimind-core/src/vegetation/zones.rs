use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

use super::greenness::GreennessMap;

/// One vigor zone: a 1-based id and its centroid in raw greenness units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub zone_id: usize,
    pub centroid: f64,
}

/// Greenness range and zones for one raster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub min: f64,
    pub max: f64,
    pub zones: Vec<Zone>,
}

/// Floor a requested zone count and clamp it to at least one.
pub fn clamp_zone_count(requested: f64) -> usize {
    if !requested.is_finite() || requested < 1.0 {
        return 1;
    }
    requested.floor() as usize
}

/// Per-cluster running sums for one assignment round.
#[derive(Clone)]
struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl Accumulator {
    fn new(k: usize) -> Self {
        Self {
            sums: vec![0.0; k],
            counts: vec![0; k],
        }
    }

    fn add(mut self, cluster: usize, value: f64) -> Self {
        self.sums[cluster] += value;
        self.counts[cluster] += 1;
        self
    }

    fn merge(mut self, other: Self) -> Self {
        for c in 0..self.sums.len() {
            self.sums[c] += other.sums[c];
            self.counts[c] += other.counts[c];
        }
        self
    }
}

/// Nearest centroid by absolute distance; ties go to the lowest index.
fn nearest(value: f64, centroids: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, &centroid) in centroids.iter().enumerate() {
        let dist = (value - centroid).abs();
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

#[inline]
fn sanitize(v: f32) -> f64 {
    if v.is_finite() {
        v as f64
    } else {
        0.0
    }
}

/// 1-D k-means with evenly spaced initialization and a fixed round budget.
///
/// Always returns exactly `max(k, 1)` zones in centroid order. A centroid
/// with no assigned values in a round keeps its previous position.
/// Non-finite values count as 0.
pub fn kmeans_1d(values: &[f32], k: usize, iterations: usize) -> Vec<Zone> {
    let k = k.max(1);
    let (min, max) = values
        .iter()
        .map(|&v| sanitize(v))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0));

    let mut centroids: Vec<f64> = (0..k)
        .map(|i| {
            if k == 1 {
                min
            } else {
                min + i as f64 * (max - min) / (k - 1) as f64
            }
        })
        .collect();

    if !values.is_empty() {
        let parallel = values.len() >= PARALLEL_PIXEL_THRESHOLD;
        for _ in 0..iterations {
            let acc = if parallel {
                values
                    .par_iter()
                    .fold(
                        || Accumulator::new(k),
                        |acc, &v| {
                            let v = sanitize(v);
                            acc.add(nearest(v, &centroids), v)
                        },
                    )
                    .reduce(|| Accumulator::new(k), Accumulator::merge)
            } else {
                values.iter().fold(Accumulator::new(k), |acc, &v| {
                    let v = sanitize(v);
                    acc.add(nearest(v, &centroids), v)
                })
            };

            for (c, centroid) in centroids.iter_mut().enumerate() {
                if acc.counts[c] > 0 {
                    *centroid = acc.sums[c] / acc.counts[c] as f64;
                }
            }
        }
    }

    centroids
        .into_iter()
        .enumerate()
        .map(|(i, centroid)| Zone {
            zone_id: i + 1,
            centroid,
        })
        .collect()
}

/// Cluster a greenness map into `k` vigor zones.
pub fn zone_summary(map: &GreennessMap, k: usize, iterations: usize) -> ZoneSummary {
    let zones = kmeans_1d(&map.values(), k, iterations);
    let finite_or_zero = |v: f32| if v.is_finite() { v as f64 } else { 0.0 };
    info!(
        pixels = map.data.len(),
        zones = zones.len(),
        "Vigor zones computed"
    );
    ZoneSummary {
        min: finite_or_zero(map.min),
        max: finite_or_zero(map.max),
        zones,
    }
}
