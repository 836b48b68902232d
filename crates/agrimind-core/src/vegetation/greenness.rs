use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage, RgbImage};
use ndarray::Array2;
use num_traits::Float;
use tracing::debug;

use crate::consts::{HEATMAP_BLUE, HEATMAP_RED};

/// Per-pixel greenness (`G - R`, raw 0-255 domain) of a working raster.
#[derive(Clone, Debug)]
pub struct GreennessMap {
    /// Row-major, shape = (height, width).
    pub data: Array2<f32>,
    /// Observed minimum; `+inf` for an empty raster.
    pub min: f32,
    /// Observed maximum; `-inf` for an empty raster.
    pub max: f32,
}

impl GreennessMap {
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Values in row-major order, as fed to the zone clusterer.
    pub fn values(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}

/// Working raster size: width capped at `max_width`, aspect ratio kept,
/// never upscaled.
pub fn working_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (height as f64 * max_width as f64 / width as f64).round();
    let scaled_height = if height > 0 { scaled.max(1.0) as u32 } else { 0 };
    (max_width, scaled_height)
}

/// Compute greenness for every pixel, tracking min and max in one pass.
pub fn extract_greenness(image: &RgbImage, max_width: u32) -> GreennessMap {
    let (src_w, src_h) = image.dimensions();
    let (w, h) = working_size(src_w, src_h, max_width);

    let resized;
    let working: &RgbImage = if (w, h) != (src_w, src_h) {
        debug!(src_w, src_h, w, h, "Downscaling raster for greenness");
        resized = imageops::resize(image, w, h, FilterType::Triangle);
        &resized
    } else {
        image
    };

    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for (x, y, pixel) in working.enumerate_pixels() {
        let [r, g, _] = pixel.0;
        let value = g as f32 - r as f32;
        data[[y as usize, x as usize]] = value;
        min = min.min(value);
        max = max.max(value);
    }

    GreennessMap { data, min, max }
}

/// Linearly rescale `value` from `[min, max]` to `[0, 255]`.
///
/// Returns 0 when any input is non-finite or `min == max`.
pub fn scale_to_255<T: Float>(value: T, min: T, max: T) -> u8 {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() || max == min {
        return 0;
    }
    let scaled = ((value - min) / (max - min)).to_f64().unwrap_or(0.0) * 255.0;
    scaled.round().clamp(0.0, 255.0) as u8
}

/// False-color visualization: fixed low red and blue, full opacity, green
/// channel carrying the rescaled index.
pub fn render_heatmap(map: &GreennessMap) -> RgbaImage {
    RgbaImage::from_fn(map.width() as u32, map.height() as u32, |x, y| {
        let v = scale_to_255(map.data[[y as usize, x as usize]], map.min, map.max);
        Rgba([HEATMAP_RED, v, HEATMAP_BLUE, 255])
    })
}
