//! sRGB → CIE-Lab conversion (D65 white point, 2° observer).
//!
//! Input channels are expected in [0, 1]. The transform linearizes each sRGB
//! channel, maps to XYZ with the standard sRGB matrix, normalizes by the
//! reference white and applies the CIE `f(t)` companding. Output ranges are
//! roughly L ∈ [0, 100], a/b ∈ [-128, 127].
use crate::error::{QuickshiftError, QuickshiftResult};
use crate::image::FeatureGrid;
use nalgebra::{Matrix3, Vector3};

const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];
const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;

fn rgb_to_xyz_matrix() -> Matrix3<f64> {
    Matrix3::new(
        0.412453, 0.357580, 0.180423, //
        0.212671, 0.715160, 0.072169, //
        0.019334, 0.119193, 0.950227,
    )
}

#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t + 16.0 / 116.0
    }
}

#[inline]
fn xyz_to_lab(xyz: Vector3<f64>) -> [f64; 3] {
    let fx = lab_f(xyz.x / D65_WHITE[0]);
    let fy = lab_f(xyz.y / D65_WHITE[1]);
    let fz = lab_f(xyz.z / D65_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Convert a single sRGB triple in [0, 1] to Lab.
pub fn rgb_to_lab(rgb: [f64; 3]) -> [f64; 3] {
    let linear = Vector3::new(
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    );
    xyz_to_lab(rgb_to_xyz_matrix() * linear)
}

/// Check that a grid can be converted, without touching it.
pub fn validate_lab_input(grid: &FeatureGrid) -> QuickshiftResult<()> {
    if grid.channels() != 3 {
        return Err(QuickshiftError::ChannelMismatch {
            expected: 3,
            actual: grid.channels(),
        });
    }
    Ok(())
}

/// Convert every cell of a 3-channel RGB grid to Lab in place.
pub fn convert_grid_to_lab(grid: &mut FeatureGrid) -> QuickshiftResult<()> {
    validate_lab_input(grid)?;
    let m = rgb_to_xyz_matrix();
    for px in grid.as_mut_slice().chunks_exact_mut(3) {
        let linear = Vector3::new(
            srgb_to_linear(px[0]),
            srgb_to_linear(px[1]),
            srgb_to_linear(px[2]),
        );
        px.copy_from_slice(&xyz_to_lab(m * linear));
    }
    Ok(())
}
