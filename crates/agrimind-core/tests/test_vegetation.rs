use agrimind_core::consts::MAX_RASTER_WIDTH;
use agrimind_core::vegetation::{
    extract_greenness, render_heatmap, scale_to_255, working_size, zone_summary,
};
use proptest::prelude::*;

mod common;

// ---------------------------------------------------------------------------
// Working size
// ---------------------------------------------------------------------------

#[test]
fn test_working_size_caps_width() {
    assert_eq!(working_size(2048, 1000, 1024), (1024, 500));
    assert_eq!(working_size(800, 600, 1024), (800, 600));
    assert_eq!(working_size(1024, 3, 1024), (1024, 3));
}

#[test]
fn test_extract_downscales_wide_raster() {
    let img = common::solid_image(2048, 100, [10, 90, 10]);
    let map = extract_greenness(&img, MAX_RASTER_WIDTH);
    assert_eq!(map.width(), 1024);
    assert_eq!(map.height(), 50);
    // Resampling a uniform field may be off by one level.
    assert!((map.min - 80.0).abs() <= 1.0);
    assert!((map.max - 80.0).abs() <= 1.0);
}

// ---------------------------------------------------------------------------
// Greenness
// ---------------------------------------------------------------------------

#[test]
fn test_greenness_is_green_minus_red() {
    let mut img = common::solid_image(2, 1, [200, 50, 0]);
    img.put_pixel(1, 0, image::Rgb([0, 255, 255]));
    let map = extract_greenness(&img, MAX_RASTER_WIDTH);
    assert_eq!(map.data[[0, 0]], -150.0);
    assert_eq!(map.data[[0, 1]], 255.0);
    assert_eq!((map.min, map.max), (-150.0, 255.0));
}

#[test]
fn test_uniform_gray_field() {
    let img = common::solid_image(16, 8, [128, 128, 128]);
    let map = extract_greenness(&img, MAX_RASTER_WIDTH);
    assert_eq!((map.min, map.max), (0.0, 0.0));

    let heatmap = render_heatmap(&map);
    assert!(heatmap.pixels().all(|p| p.0 == [20, 0, 40, 255]));

    let summary = zone_summary(&map, 3, 8);
    assert_eq!(summary.zones.len(), 3);
    assert!(summary.zones.iter().all(|z| z.centroid == 0.0));
}

#[test]
fn test_heatmap_spans_full_range() {
    let img = common::greenness_ramp(64, 4);
    let map = extract_greenness(&img, MAX_RASTER_WIDTH);
    let heatmap = render_heatmap(&map);
    assert_eq!(heatmap.dimensions(), (64, 4));
    assert_eq!(heatmap.get_pixel(0, 0).0, [20, 0, 40, 255]);
    assert_eq!(heatmap.get_pixel(63, 0).0[1], 255);
}

#[test]
fn test_empty_raster() {
    let img = image::RgbImage::new(0, 0);
    let map = extract_greenness(&img, MAX_RASTER_WIDTH);
    assert_eq!(map.data.len(), 0);
    let summary = zone_summary(&map, 2, 8);
    assert_eq!((summary.min, summary.max), (0.0, 0.0));
    assert_eq!(summary.zones.len(), 2);
}

// ---------------------------------------------------------------------------
// Rescaling
// ---------------------------------------------------------------------------

#[test]
fn test_scale_to_255_edges() {
    assert_eq!(scale_to_255(-10.0f32, -10.0, 30.0), 0);
    assert_eq!(scale_to_255(30.0f32, -10.0, 30.0), 255);
    assert_eq!(scale_to_255(10.0f64, -10.0, 30.0), 128);
    assert_eq!(scale_to_255(5.0f32, 5.0, 5.0), 0);
    assert_eq!(scale_to_255(f32::NAN, 0.0, 1.0), 0);
}

proptest! {
    #[test]
    fn prop_scale_is_monotonic(
        a in -255.0f32..255.0,
        b in -255.0f32..255.0,
        min in -300.0f32..-255.0,
        max in 255.0f32..300.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scale_to_255(lo, min, max) <= scale_to_255(hi, min, max));
    }

    #[test]
    fn prop_scale_is_zero_for_flat_range(
        value in proptest::num::f32::ANY,
        bound in -1.0e6f32..1.0e6,
    ) {
        prop_assert_eq!(scale_to_255(value, bound, bound), 0);
    }

    #[test]
    fn prop_scale_is_zero_for_non_finite_input(
        finite in -1.0e6f64..1.0e6,
        other in -1.0e6f64..1.0e6,
        bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
        slot in 0usize..3,
    ) {
        let (value, min, max) = match slot {
            0 => (bad, finite, other),
            1 => (finite, bad, other),
            _ => (finite, other, bad),
        };
        prop_assert_eq!(scale_to_255(value, min, max), 0);
    }
}
