//! I/O helpers for RGB images, label maps and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into a 3-channel `FeatureGrid` in [0, 1].
//! - `save_segments_mean_rgb`: paint each segment with its mean colour and save as PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{FeatureGrid, Grid, ImageView};
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB, scaled to [0, 1].
pub fn load_rgb_image(path: &Path) -> Result<FeatureGrid, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    FeatureGrid::from_u8(width, height, 3, img.as_raw())
        .map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// Per-segment mean of the given feature grid. Returns one vector per label.
pub fn segment_means(
    labels: &Grid<usize>,
    num_segments: usize,
    features: &FeatureGrid,
) -> Vec<Vec<f64>> {
    let channels = features.channels();
    let mut sums = vec![vec![0.0; channels]; num_segments];
    let mut counts = vec![0usize; num_segments];
    for (i, &label) in labels.as_slice().iter().enumerate() {
        counts[label] += 1;
        for (acc, v) in sums[label].iter_mut().zip(features.pixel_at(i)) {
            *acc += v;
        }
    }
    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count > 0 {
            sum.iter_mut().for_each(|v| *v /= count as f64);
        }
    }
    sums
}

/// Save a label map where each segment is painted with its mean RGB colour.
///
/// `rgb` must be a 3-channel grid in [0, 1] with the same size as `labels`.
pub fn save_segments_mean_rgb(
    labels: &Grid<usize>,
    num_segments: usize,
    rgb: &FeatureGrid,
    path: &Path,
) -> Result<(), String> {
    if rgb.channels() != 3 || rgb.width() != labels.w || rgb.height() != labels.h {
        return Err(format!(
            "Colour source {}x{}x{} does not match label map {}x{}",
            rgb.width(),
            rgb.height(),
            rgb.channels(),
            labels.w,
            labels.h
        ));
    }
    ensure_parent_dir(path)?;
    let means = segment_means(labels, num_segments, rgb);
    let mut out = RgbImage::new(labels.w as u32, labels.h as u32);
    for (y, row) in labels.rows().enumerate() {
        for (x, &label) in row.iter().enumerate() {
            let m = &means[label];
            let px = [to_u8(m[0]), to_u8(m[1]), to_u8(m[2])];
            out.put_pixel(x as u32, y as u32, Rgb(px));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
