//! Windowed Parzen density estimate over the joint spatial+feature space.
//!
//! For every cell p the estimate sums `exp(-D(p, q) / (2 k²))` over the cells
//! q in the clipped window, where `D` is the squared joint distance and `k`
//! the kernel size. A tiny Gaussian perturbation (σ = 1e-5) is added so that
//! equal raw densities compare strictly during parent linking.
//!
//! Noise is drawn up front in row-major order from the caller's generator, so
//! the result for a given seed does not depend on how rows are scheduled.
//!
//! Complexity: O(H·W·r²·C) time, r = window radius; O(H·W) extra memory.
use super::rows::fill_rows;
use super::window::{joint_dist_sq, Window};
use crate::image::{FeatureGrid, Grid, ImageViewMut};
use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation of the tie-breaking perturbation.
pub const DENSITY_NOISE_STD: f64 = 1e-5;

/// Raw (unperturbed) density of every cell.
pub fn raw_density(features: &FeatureGrid, kernel_size: f64) -> Grid<f64> {
    let (w, h) = (features.width(), features.height());
    let window = Window::from_kernel_size(kernel_size);
    let inv = -0.5 / (kernel_size * kernel_size);
    let mut density = Grid::<f64>::new(w, h);

    fill_rows(density.as_mut_slice(), w, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (rows, cols) = window.bounds(x, y, w, h);
            let mut acc = 0.0;
            for qy in rows {
                for qx in cols.clone() {
                    acc += (joint_dist_sq(features, x, y, qx, qy) * inv).exp();
                }
            }
            *out = acc;
        }
    });
    density
}

/// Perturbed density estimate, the input of parent linking.
pub fn estimate_density<R: Rng>(
    features: &FeatureGrid,
    kernel_size: f64,
    rng: &mut R,
) -> Grid<f64> {
    let mut density = raw_density(features, kernel_size);
    for v in density.as_mut_slice() {
        let noise: f64 = rng.sample(StandardNormal);
        *v += noise * DENSITY_NOISE_STD;
    }
    density
}
