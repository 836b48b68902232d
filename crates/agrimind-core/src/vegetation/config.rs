use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZONE_COUNT, KMEANS_ITERATIONS, MAX_RASTER_WIDTH};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningConfig {
    /// Number of vigor zones (K).
    pub zone_count: usize,
    /// Fixed k-means round budget.
    pub iterations: usize,
    /// Working raster width cap.
    pub max_width: u32,
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self {
            zone_count: DEFAULT_ZONE_COUNT,
            iterations: KMEANS_ITERATIONS,
            max_width: MAX_RASTER_WIDTH,
        }
    }
}
