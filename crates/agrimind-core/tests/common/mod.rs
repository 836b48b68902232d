#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use agrimind_core::detection::{BoundingBox, Detection, ObjectDetector};
use agrimind_core::error::{AgriError, Result};
use image::{Rgb, RgbImage};

/// Uniform RGB image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Gray field with one bright green square at (`x0`, `y0`).
pub fn green_square_image(width: u32, height: u32, x0: u32, y0: u32, size: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
            Rgb([30, 200, 30])
        } else {
            Rgb([100, 100, 100])
        }
    })
}

/// Horizontal ramp: greenness grows from left to right.
pub fn greenness_ramp(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let g = (x * 255 / width.max(1)) as u8;
        Rgb([0, g, 0])
    })
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub const SAMPLE_CSV: &str = "\
date,yield,rainfall,temp,ndvi
2021-01,10,50,25,0.61
2021-02,12,48,27,0.63
2021-03,9,52,26,0.58
2021-04,14,47,29,0.66
2021-05,15,20,34,0.70
";

/// Detector returning one detection per configured score, on every frame.
pub struct ScriptedDetector {
    scores: Vec<f32>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn new(scores: &[f32]) -> Self {
        Self {
            scores: scores.to_vec(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `detect` calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ObjectDetector for ScriptedDetector {
    fn name(&self) -> &str {
        "scripted"
    }

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &confidence)| Detection {
                label: format!("object{i}"),
                confidence,
                bbox: BoundingBox {
                    x: 10.0 * i as f32,
                    y: 5.0,
                    w: 8.0,
                    h: 8.0,
                },
            })
            .collect())
    }
}

/// Fails on every even call, succeeds with one 0.8 detection otherwise.
pub struct FlakyDetector {
    calls: usize,
}

impl FlakyDetector {
    pub fn new() -> Self {
        Self { calls: 0 }
    }
}

impl ObjectDetector for FlakyDetector {
    fn name(&self) -> &str {
        "flaky"
    }

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            return Err(AgriError::Inference("backend hiccup".into()));
        }
        Ok(vec![Detection {
            label: "plant".into(),
            confidence: 0.8,
            bbox: BoundingBox {
                x: 1.0,
                y: 1.0,
                w: 4.0,
                h: 4.0,
            },
        }])
    }
}
