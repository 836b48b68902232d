use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANOPY_GREENNESS, DEFAULT_CONFIDENCE, DEFAULT_FRAME_INTERVAL_MS,
    DEFAULT_MIN_PATCH_FRACTION,
};

/// Configuration for the live detection loop and the built-in detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Initial confidence threshold, clamped to [0.3, 0.9].
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Delay between loop iterations in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Minimum `G - R` for a pixel to count as canopy.
    #[serde(default = "default_canopy_greenness")]
    pub canopy_greenness: f32,
    /// Minimum patch area as a fraction of the frame.
    #[serde(default = "default_min_patch_fraction")]
    pub min_patch_fraction: f32,
    /// Restart an image sequence from the first frame when it runs out.
    #[serde(default)]
    pub loop_frames: bool,
}

fn default_confidence() -> f32 {
    DEFAULT_CONFIDENCE
}
fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}
fn default_canopy_greenness() -> f32 {
    DEFAULT_CANOPY_GREENNESS
}
fn default_min_patch_fraction() -> f32 {
    DEFAULT_MIN_PATCH_FRACTION
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            canopy_greenness: DEFAULT_CANOPY_GREENNESS,
            min_patch_fraction: DEFAULT_MIN_PATCH_FRACTION,
            loop_frames: false,
        }
    }
}
