use crate::image::FeatureGrid;
use std::ops::Range;

/// Square neighbourhood of radius `floor(3 * kernel_size)` clipped to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub radius: usize,
}

impl Window {
    pub fn from_kernel_size(kernel_size: f64) -> Self {
        Self {
            radius: (3.0 * kernel_size).floor() as usize,
        }
    }

    /// Row and column ranges of the window around (x, y) on a `w × h` grid.
    #[inline]
    pub fn bounds(&self, x: usize, y: usize, w: usize, h: usize) -> (Range<usize>, Range<usize>) {
        // Radius may saturate at usize::MAX for huge kernel sizes.
        let reach = self.radius.saturating_add(1);
        let rows = y.saturating_sub(self.radius)..y.saturating_add(reach).min(h);
        let cols = x.saturating_sub(self.radius)..x.saturating_add(reach).min(w);
        (rows, cols)
    }
}

/// Squared joint distance: feature distance plus squared spatial offset.
#[inline]
pub fn joint_dist_sq(features: &FeatureGrid, x: usize, y: usize, qx: usize, qy: usize) -> f64 {
    let w = features.width();
    let dx = x.abs_diff(qx) as f64;
    let dy = y.abs_diff(qy) as f64;
    features.feature_dist_sq(y * w + x, qy * w + qx) + dx * dx + dy * dy
}
