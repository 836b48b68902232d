use image::RgbImage;
use tracing::debug;

use crate::error::Result;
use crate::vegetation::extract_greenness;

use super::components::{label_patches, Patch};
use super::config::DetectionConfig;
use super::detector::{BoundingBox, Detection, ObjectDetector};
use super::morphology::opening;

/// Label reported for every canopy patch.
pub const CANOPY_LABEL: &str = "vegetation";

/// Built-in detector reporting connected canopy patches in a frame.
///
/// Pipeline: greenness (`G - R`) -> threshold -> morphological opening ->
/// connected components -> area filter -> score.
#[derive(Clone, Debug)]
pub struct CanopyPatchDetector {
    greenness_threshold: f32,
    min_patch_fraction: f32,
}

impl CanopyPatchDetector {
    pub fn new(greenness_threshold: f32, min_patch_fraction: f32) -> Self {
        Self {
            greenness_threshold,
            min_patch_fraction: min_patch_fraction.max(0.0),
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.canopy_greenness, config.min_patch_fraction)
    }

    /// Score in [0, 1] from how far the patch sits above the greenness
    /// threshold and how compact it is.
    fn score(&self, patch: &Patch) -> f32 {
        let headroom = (255.0 - self.greenness_threshold as f64).max(1.0);
        let vigor = ((patch.mean_intensity() - self.greenness_threshold as f64) / headroom)
            .clamp(0.0, 1.0);
        (0.3 + 0.4 * vigor + 0.3 * patch.fill_ratio()).clamp(0.0, 1.0) as f32
    }
}

impl Default for CanopyPatchDetector {
    fn default() -> Self {
        Self::from_config(&DetectionConfig::default())
    }
}

impl ObjectDetector for CanopyPatchDetector {
    fn name(&self) -> &str {
        "canopy-patch"
    }

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>> {
        // Full resolution so boxes land in frame coordinates.
        let map = extract_greenness(frame, frame.width());
        let total = map.data.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let mask = map.data.mapv(|g| g > self.greenness_threshold);
        let cleaned = opening(&mask);
        let min_area = ((total as f32 * self.min_patch_fraction).ceil() as usize).max(1);

        let mut detections: Vec<Detection> = label_patches(&cleaned, &map.data)
            .iter()
            .take_while(|patch| patch.area >= min_area)
            .map(|patch| {
                let (min_row, max_row, min_col, max_col) = patch.bbox;
                Detection {
                    label: CANOPY_LABEL.to_string(),
                    confidence: self.score(patch),
                    bbox: BoundingBox {
                        x: min_col as f32,
                        y: min_row as f32,
                        w: (max_col - min_col + 1) as f32,
                        h: (max_row - min_row + 1) as f32,
                    },
                }
            })
            .collect();

        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        debug!(patches = detections.len(), "Canopy patches detected");
        Ok(detections)
    }
}
