use std::collections::HashMap;

use ndarray::Array2;

/// One connected canopy patch.
#[derive(Clone, Debug)]
pub struct Patch {
    /// Root label, also the value of this patch in the label map.
    pub label: u32,
    /// Number of pixels in the patch.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
    /// Sum of the intensity values under the patch.
    pub intensity_sum: f64,
}

impl Patch {
    pub fn mean_intensity(&self) -> f64 {
        if self.area == 0 {
            0.0
        } else {
            self.intensity_sum / self.area as f64
        }
    }

    /// Share of the bounding box covered by the patch.
    pub fn fill_ratio(&self) -> f64 {
        let (min_row, max_row, min_col, max_col) = self.bbox;
        let box_area = (max_row - min_row + 1) * (max_col - min_col + 1);
        self.area as f64 / box_area as f64
    }
}

/// Label 4-connected regions of `mask` in two passes with union-find,
/// accumulating `intensity` under each region.
///
/// Returns patches sorted by area, largest first.
pub fn label_patches(mask: &Array2<bool>, intensity: &Array2<f32>) -> Vec<Patch> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    // parent[0] is unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            labels[[row, col]] = match (up, left) {
                (0, 0) => {
                    let next = parent.len() as u32;
                    parent.push(next);
                    next
                }
                (a, 0) | (0, a) => a,
                (a, b) => {
                    if a != b {
                        union(&mut parent, a, b);
                    }
                    a.min(b)
                }
            };
        }
    }

    let mut patches = HashMap::<u32, Patch>::new();
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = find(&parent, lbl);
            let patch = patches.entry(root).or_insert(Patch {
                label: root,
                area: 0,
                bbox: (row, row, col, col),
                intensity_sum: 0.0,
            });
            patch.area += 1;
            patch.intensity_sum += intensity[[row, col]] as f64;
            patch.bbox.0 = patch.bbox.0.min(row);
            patch.bbox.1 = patch.bbox.1.max(row);
            patch.bbox.2 = patch.bbox.2.min(col);
            patch.bbox.3 = patch.bbox.3.max(col);
        }
    }

    let mut patches: Vec<Patch> = patches.into_values().collect();
    patches.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
    patches
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
