//! Quickshift mode-seeking oversegmentation.
//!
//! The kernel runs four stages over a 2D grid of feature vectors:
//!
//! - Density estimation: a windowed Gaussian Parzen estimate in the joint
//!   spatial+feature space, perturbed by seeded noise (σ = 1e-5) so that no two
//!   cells compare equal (`density`).
//! - Parent linking: every cell points at its nearest strictly denser cell in
//!   the same window, or at itself when none exists (`linker`).
//! - Flattening: links longer than `max_dist` are cut and the remaining forest
//!   is collapsed to its roots by pointer doubling (`flatten`).
//! - Relabeling: roots become dense ids `0..K` in ascending index order
//!   (`relabel`).
//!
//! [`segment`] wraps the kernel with the usual preprocessing: optional Lab
//! conversion, optional spatial Gaussian smoothing and ratio scaling of the
//! feature channels. [`run_quickshift`] runs the kernel alone on prepared features.
//!
//! Cells with no denser neighbour inside their window become roots even if a
//! denser cell exists further away; such local modes are kept as segments.
//!
//! Complexity
//! - O(H·W·r²·C) for density and linking, r = `floor(3 * kernel_size)`.
//! - O(H·W·log L) for flattening, L = longest surviving chain.

pub mod density;
pub mod flatten;
pub mod linker;
mod options;
pub mod relabel;
mod rows;
pub mod window;

#[cfg(test)]
mod tests;

pub use density::{estimate_density, raw_density};
pub use flatten::{flatten, is_flat, resolve_roots, truncate, FlattenOutcome};
pub use linker::{link_parents, ParentLinks};
pub use options::QuickshiftParams;
pub use relabel::relabel;
pub use window::Window;

use crate::color;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::{QuickshiftError, QuickshiftResult};
use crate::image::{FeatureGrid, Grid};
use crate::smoothing;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Instant;

/// Parent forest before flattening, returned on request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickshiftTree {
    /// Flattened parent index per cell after `max_dist` truncation.
    pub parents: Grid<usize>,
    /// Link length per cell, 0 for cells that were roots after linking.
    pub distances: Grid<f64>,
}

/// Output of one segmentation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmentation {
    /// Segment id per cell in `[0, num_segments)`.
    pub labels: Grid<usize>,
    pub num_segments: usize,
    /// Present only when `return_tree` was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<QuickshiftTree>,
}

/// Segmentation together with per-stage timings.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub segmentation: Segmentation,
    pub timings: TimingBreakdown,
}

pub fn validate_kernel_size(kernel_size: f64) -> QuickshiftResult<()> {
    // Written so that NaN is rejected as well.
    if !(kernel_size >= 1.0) {
        return Err(QuickshiftError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

/// Segment `image` with the full preprocessing chain.
pub fn segment(image: &FeatureGrid, params: &QuickshiftParams) -> QuickshiftResult<Segmentation> {
    segment_with_report(image, params).map(|report| report.segmentation)
}

/// Like [`segment`], also reporting per-stage timings.
pub fn segment_with_report(
    image: &FeatureGrid,
    params: &QuickshiftParams,
) -> QuickshiftResult<SegmentationReport> {
    let total_start = Instant::now();
    validate_kernel_size(params.kernel_size)?;
    smoothing::validate_sigma(params.sigma)?;
    if params.convert2lab {
        color::validate_lab_input(image)?;
    }

    let mut timings = TimingBreakdown::default();
    let mut features = image.clone();
    if params.convert2lab {
        let start = Instant::now();
        color::convert_grid_to_lab(&mut features)?;
        timings.push("lab", elapsed_ms(start));
    }
    if params.sigma > 0.0 {
        let start = Instant::now();
        smoothing::gaussian_smooth(&mut features, params.sigma)?;
        timings.push("smooth", elapsed_ms(start));
    }
    features.scale(params.ratio);

    let mut rng = make_rng(params.random_seed);
    let segmentation = run_kernel(
        &features,
        params.kernel_size,
        params.max_dist,
        params.return_tree,
        &mut rng,
        &mut timings,
    );
    timings.total_ms = elapsed_ms(total_start);
    debug!(
        "quickshift: {}x{}x{} -> {} segments in {:.3} ms",
        image.width(),
        image.height(),
        image.channels(),
        segmentation.num_segments,
        timings.total_ms
    );

    Ok(SegmentationReport {
        segmentation,
        timings,
    })
}

/// Run the kernel on an already prepared feature grid.
///
/// `features` must already carry the ratio scaling; no colour conversion or
/// smoothing happens here.
pub fn run_quickshift(
    features: &FeatureGrid,
    kernel_size: f64,
    max_dist: f64,
    return_tree: bool,
    random_seed: Option<u64>,
) -> QuickshiftResult<Segmentation> {
    validate_kernel_size(kernel_size)?;
    let mut rng = make_rng(random_seed);
    let mut timings = TimingBreakdown::default();
    Ok(run_kernel(
        features,
        kernel_size,
        max_dist,
        return_tree,
        &mut rng,
        &mut timings,
    ))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run_kernel(
    features: &FeatureGrid,
    kernel_size: f64,
    max_dist: f64,
    return_tree: bool,
    rng: &mut StdRng,
    timings: &mut TimingBreakdown,
) -> Segmentation {
    let start = Instant::now();
    let density = estimate_density(features, kernel_size, rng);
    let density_ms = elapsed_ms(start);
    timings.push("density", density_ms);
    debug!(
        "density: {}x{} window radius {} in {:.3} ms",
        features.width(),
        features.height(),
        Window::from_kernel_size(kernel_size).radius,
        density_ms
    );

    let start = Instant::now();
    let ParentLinks { parents, distances } = link_parents(features, &density, kernel_size);
    let link_ms = elapsed_ms(start);
    timings.push("link", link_ms);
    debug!("link: {:.3} ms", link_ms);

    let start = Instant::now();
    let (truncated, outcome) = flatten(&parents, &distances, max_dist);
    timings.push("flatten", elapsed_ms(start));

    let start = Instant::now();
    let (labels, num_segments) = relabel(&outcome.roots);
    timings.push("relabel", elapsed_ms(start));

    let tree = return_tree.then(|| QuickshiftTree {
        parents: truncated,
        distances,
    });

    Segmentation {
        labels,
        num_segments,
        tree,
    }
}
