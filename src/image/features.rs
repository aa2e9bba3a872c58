//! Owned multi-channel `f64` feature grid (H×W×C), channel-interleaved.
//!
//! Every cell holds a feature vector of `channels` values. Spatial position is
//! implicit in the cell index and is never stored or scaled.
use crate::error::QuickshiftError;

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureGrid {
    w: usize,
    h: usize,
    channels: usize,
    data: Vec<f64>,
}

impl FeatureGrid {
    /// Zero-filled grid of size `w × h × channels`.
    pub fn new(w: usize, h: usize, channels: usize) -> Result<Self, QuickshiftError> {
        Self::from_vec(w, h, channels, vec![0.0; w * h * channels])
    }

    /// Wrap a row-major, channel-interleaved buffer.
    pub fn from_vec(
        w: usize,
        h: usize,
        channels: usize,
        data: Vec<f64>,
    ) -> Result<Self, QuickshiftError> {
        if channels == 0 {
            return Err(QuickshiftError::ZeroChannels);
        }
        let expected = w * h * channels;
        if data.len() != expected {
            return Err(QuickshiftError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Single-channel grid from one value per cell.
    pub fn from_scalar(w: usize, h: usize, values: Vec<f64>) -> Result<Self, QuickshiftError> {
        Self::from_vec(w, h, 1, values)
    }

    /// Build from 8-bit interleaved samples, scaling to `[0, 1]`.
    pub fn from_u8(
        w: usize,
        h: usize,
        channels: usize,
        raw: &[u8],
    ) -> Result<Self, QuickshiftError> {
        let data = raw.iter().map(|&v| v as f64 / 255.0).collect();
        Self::from_vec(w, h, channels, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.w * self.h
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature vector of the cell at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f64] {
        self.pixel_at(y * self.w + x)
    }

    /// Feature vector of the cell with flattened index `i`.
    #[inline]
    pub fn pixel_at(&self, i: usize) -> &[f64] {
        let start = i * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Multiply every feature channel by `ratio`.
    pub fn scale(&mut self, ratio: f64) {
        if ratio != 1.0 {
            self.data.iter_mut().for_each(|v| *v *= ratio);
        }
    }

    /// Squared feature distance between two cells given by flattened index.
    #[inline]
    pub fn feature_dist_sq(&self, a: usize, b: usize) -> f64 {
        self.pixel_at(a)
            .iter()
            .zip(self.pixel_at(b))
            .map(|(p, q)| {
                let d = p - q;
                d * d
            })
            .sum()
    }
}
