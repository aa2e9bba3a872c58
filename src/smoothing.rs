//! Separable Gaussian pre-smoothing over the two spatial axes.
//!
//! Each feature channel is filtered independently; the channel axis itself is
//! never blurred. Borders use half-sample symmetric reflection
//! (`d c b a | a b c d | d c b a`), which stays valid for kernels wider than
//! the grid.
//!
//! Complexity: O(W·H·C·r) with two 1D passes, r = kernel radius.
use crate::error::{QuickshiftError, QuickshiftResult};
use crate::image::FeatureGrid;

/// Kernel half-width in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (left-to-right). Length is odd; the centre tap sits
    /// at `taps().len() / 2`.
    fn taps(&self) -> &[f64];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Sampled, normalized Gaussian kernel.
#[derive(Clone, Debug)]
pub struct GaussianFilter {
    taps: Vec<f64>,
}

impl GaussianFilter {
    /// Build a kernel for `sigma > 0` with radius `round(4 * sigma)`.
    pub fn new(sigma: f64) -> Self {
        let radius = (TRUNCATE * sigma + 0.5) as usize;
        let inv = -0.5 / (sigma * sigma);
        let mut taps: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (x * x * inv).exp()
            })
            .collect();
        let sum: f64 = taps.iter().sum();
        taps.iter_mut().for_each(|t| *t /= sum);
        Self { taps }
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f64] {
        &self.taps
    }
}

pub fn validate_sigma(sigma: f64) -> QuickshiftResult<()> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(QuickshiftError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Smooth `grid` in place with a Gaussian of standard deviation `sigma` along
/// rows and columns. `sigma == 0` leaves the grid untouched.
pub fn gaussian_smooth(grid: &mut FeatureGrid, sigma: f64) -> QuickshiftResult<()> {
    validate_sigma(sigma)?;
    if sigma == 0.0 || grid.is_empty() {
        return Ok(());
    }
    let filter = GaussianFilter::new(sigma);
    apply(&filter, grid);
    Ok(())
}

/// Apply a separable filter to every channel of `grid` (horizontal then vertical).
pub fn apply(filter: &dyn SeparableFilter, grid: &mut FeatureGrid) {
    let (w, h, c) = (grid.width(), grid.height(), grid.channels());
    let taps = filter.taps();
    let radius = filter.radius() as isize;
    let mut tmp = vec![0.0; w * h * c];

    // horizontal
    let src = grid.as_slice();
    for y in 0..h {
        for x in 0..w {
            let out = &mut tmp[(y * w + x) * c..(y * w + x + 1) * c];
            for (k, &t) in taps.iter().enumerate() {
                let sx = reflect(x as isize + k as isize - radius, w);
                let base = (y * w + sx) * c;
                for (o, v) in out.iter_mut().zip(&src[base..base + c]) {
                    *o += t * v;
                }
            }
        }
    }

    // vertical
    let dst = grid.as_mut_slice();
    dst.iter_mut().for_each(|v| *v = 0.0);
    for y in 0..h {
        for (k, &t) in taps.iter().enumerate() {
            let sy = reflect(y as isize + k as isize - radius, h);
            let src_row = &tmp[sy * w * c..(sy + 1) * w * c];
            let dst_row = &mut dst[y * w * c..(y + 1) * w * c];
            for (o, v) in dst_row.iter_mut().zip(src_row) {
                *o += t * v;
            }
        }
    }
}

/// Map any integer position onto `[0, n)` by half-sample symmetric reflection.
#[inline]
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}
