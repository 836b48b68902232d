use image::{Rgba, RgbaImage};

use crate::consts::{FALLBACK_OVERLAY_HEIGHT, FALLBACK_OVERLAY_WIDTH, OVERLAY_STROKE_WIDTH};

use super::detector::Detection;

const STROKE: Rgba<u8> = Rgba([0, 255, 136, 255]);
const FILL: Rgba<u8> = Rgba([0, 255, 136, 38]);

/// Caption anchored at a pixel position on the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Transparent drawing surface matching the video's natural size.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub surface: RgbaImage,
    pub labels: Vec<OverlayLabel>,
}

impl Overlay {
    /// Sized to the source, or 640x360 when the size is unknown or zero.
    pub fn for_source(natural_size: Option<(u32, u32)>) -> Self {
        let (w, h) = match natural_size {
            Some((w, h)) if w > 0 && h > 0 => (w, h),
            _ => (FALLBACK_OVERLAY_WIDTH, FALLBACK_OVERLAY_HEIGHT),
        };
        Self {
            surface: RgbaImage::new(w, h),
            labels: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.surface.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        self.labels.clear();
    }

    /// Translucent fill, solid stroke and a caption for one detection.
    pub fn draw(&mut self, detection: &Detection) {
        let (sw, sh) = self.surface.dimensions();
        let bbox = detection.bbox;
        let x0 = bbox.x.max(0.0).floor() as u32;
        let y0 = bbox.y.max(0.0).floor() as u32;
        let x1 = ((bbox.x + bbox.w).ceil().max(0.0) as u32).min(sw);
        let y1 = ((bbox.y + bbox.h).ceil().max(0.0) as u32).min(sh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x < x0 + OVERLAY_STROKE_WIDTH
                    || x + OVERLAY_STROKE_WIDTH >= x1
                    || y < y0 + OVERLAY_STROKE_WIDTH
                    || y + OVERLAY_STROKE_WIDTH >= y1;
                let pixel = self.surface.get_pixel_mut(x, y);
                *pixel = if on_edge { STROKE } else { blend(*pixel, FILL) };
            }
        }

        self.labels.push(OverlayLabel {
            text: detection.caption(),
            x: bbox.x + 4.0,
            y: bbox.y + 16.0,
        });
    }
}

/// Source-over alpha compositing of `top` onto `base`.
fn blend(base: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = top[3] as f32 / 255.0;
    let ba = base[3] as f32 / 255.0;
    let out_a = ta + ba * (1.0 - ta);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        ((top[i] as f32 * ta + base[i] as f32 * ba * (1.0 - ta)) / out_a).round() as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round() as u8])
}
