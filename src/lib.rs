//! Quickshift oversegmentation of 2D feature grids.
//!
//! Each output region surrounds one local mode of a Parzen density estimate
//! over the joint spatial+feature space. The result is a dense label map with
//! many small, coherent regions, suited as input to region merging.

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod kernel;

// Preprocessing collaborators and tool support.
pub mod color;
pub mod config;
pub mod smoothing;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{QuickshiftError, QuickshiftResult};
pub use crate::image::{FeatureGrid, Grid};
pub use crate::kernel::{
    run_quickshift, segment, segment_with_report, QuickshiftParams, QuickshiftTree, Segmentation,
    SegmentationReport,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use quickshift::prelude::*;
///
/// # fn main() -> Result<(), QuickshiftError> {
/// let (w, h) = (64usize, 48usize);
/// let rgb = vec![0.5f64; w * h * 3];
/// let image = FeatureGrid::from_vec(w, h, 3, rgb)?;
///
/// let params = QuickshiftParams {
///     kernel_size: 3.0,
///     max_dist: 6.0,
///     ..Default::default()
/// }
/// .with_seed(42);
///
/// let seg = segment(&image, &params)?;
/// println!("segments={}", seg.num_segments);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{FeatureGrid, Grid, ImageView};
    pub use crate::{segment, QuickshiftError, QuickshiftParams, Segmentation};
}
