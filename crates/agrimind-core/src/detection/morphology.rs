use ndarray::Array2;

/// Morphological opening (erosion then dilation) with a 3x3 square kernel.
///
/// Drops isolated foreground specks while keeping larger regions.
pub fn opening(mask: &Array2<bool>) -> Array2<bool> {
    dilate(&erode(mask))
}

/// A pixel survives only if its whole 3x3 neighborhood is set.
/// Out-of-bounds neighbors count as unset.
fn erode(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        mask[[row, col]] && neighborhood(row, col, h, w).all(|p| p.is_some_and(|ix| mask[ix]))
    })
}

/// A pixel is set if any pixel of its 3x3 neighborhood is set.
fn dilate(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        neighborhood(row, col, h, w).any(|p| p.is_some_and(|ix| mask[ix]))
    })
}

/// The 9 positions around (row, col); `None` where outside the image.
fn neighborhood(
    row: usize,
    col: usize,
    h: usize,
    w: usize,
) -> impl Iterator<Item = Option<[usize; 2]>> {
    (-1..=1_i64).flat_map(move |dr| {
        (-1..=1_i64).map(move |dc| {
            let r = row as i64 + dr;
            let c = col as i64 + dc;
            (r >= 0 && r < h as i64 && c >= 0 && c < w as i64).then(|| [r as usize, c as usize])
        })
    })
}
