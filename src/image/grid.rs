//! Owned single-value-per-cell grid in row-major layout.
//!
//! Backs the density, parent, distance and label grids. Cells are addressed
//! either by `(x, y)` or by the flattened index `y * w + x`, which is also the
//! value stored in parent grids.
use super::traits::{ImageView, ImageViewMut};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid<T> {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    /// Backing storage in row-major order, `w * h` elements
    pub data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Construct a default-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(w: usize, h: usize, value: T) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` on a length mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    /// Convert (x, y) to a linear index into `data`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    /// Get the cell value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }
    /// Set the cell value at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl Grid<usize> {
    /// Parent grid where every cell points at itself.
    pub fn identity(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: (0..w * h).collect(),
        }
    }
}

impl<T: Copy> ImageView for Grid<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> ImageViewMut for Grid<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}
