//! Nearest strictly-denser neighbour linking.
//!
//! Each cell p scans its window in row-major order and links to the cell q
//! with `density(q) > density(p)` that minimizes the squared joint distance.
//! Equal distances keep the first candidate in scan order. Cells without a
//! denser neighbour stay roots with distance 0.
//!
//! Distances are recomputed from the features instead of being cached from
//! the density pass; the extra work is of the same order as density
//! estimation and avoids O(H·W·r²) storage.
use super::rows::fill_rows;
use super::window::{joint_dist_sq, Window};
use crate::image::{FeatureGrid, Grid};

/// Parent pointers and link lengths produced by [`link_parents`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParentLinks {
    /// Flattened parent index per cell (`y * w + x`).
    pub parents: Grid<usize>,
    /// Euclidean joint distance to the parent, 0 for roots.
    pub distances: Grid<f64>,
}

/// Link every cell to its nearest denser neighbour inside the window.
pub fn link_parents(features: &FeatureGrid, density: &Grid<f64>, kernel_size: f64) -> ParentLinks {
    let (w, h) = (features.width(), features.height());
    debug_assert_eq!((density.w, density.h), (w, h));
    let window = Window::from_kernel_size(kernel_size);

    let mut links = vec![(0usize, 0.0f64); w * h];
    fill_rows(&mut links, w, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = nearest_denser(features, density, &window, x, y);
        }
    });

    let (parents, distances): (Vec<usize>, Vec<f64>) = links.into_iter().unzip();
    ParentLinks {
        parents: Grid { w, h, data: parents },
        distances: Grid { w, h, data: distances },
    }
}

#[inline]
fn nearest_denser(
    features: &FeatureGrid,
    density: &Grid<f64>,
    window: &Window,
    x: usize,
    y: usize,
) -> (usize, f64) {
    let (w, h) = (features.width(), features.height());
    let p = y * w + x;
    let current = density.data[p];
    let (rows, cols) = window.bounds(x, y, w, h);

    let mut parent = p;
    let mut closest = f64::INFINITY;
    for qy in rows {
        for qx in cols.clone() {
            let q = qy * w + qx;
            if density.data[q] <= current {
                continue;
            }
            let dist = joint_dist_sq(features, x, y, qx, qy);
            if dist < closest {
                closest = dist;
                parent = q;
            }
        }
    }

    if parent == p {
        (p, 0.0)
    } else {
        (parent, closest.sqrt())
    }
}
