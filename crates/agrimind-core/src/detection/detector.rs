use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Axis-aligned box in frame pixel coordinates. Valid for one frame only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One detected object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    /// Detector score in [0, 1].
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    /// Overlay caption, e.g. `vegetation 87%`.
    pub fn caption(&self) -> String {
        format!("{} {}%", self.label, (self.confidence * 100.0).round() as i32)
    }
}

/// A single-shot object detector run once per frame.
///
/// Implementations are moved onto the detection thread while the loop runs
/// and handed back when it stops, so a loaded model is reused across runs.
pub trait ObjectDetector: Send {
    fn name(&self) -> &str;

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Keep detections scoring at or above `threshold`, preserving order.
pub fn filter_by_confidence(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence >= threshold)
        .collect()
}
