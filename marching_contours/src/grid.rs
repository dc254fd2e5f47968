//! Binary occupancy grid sampled from the working canvas.

use std::ops::Range;

use image::Rgb;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::canvas::PixelSource;

/// Light sample: mean intensity above the threshold.
pub const LIGHT: u8 = 0;
/// Dark sample: mean intensity at or below the threshold.
pub const DARK: u8 = 1;

/// Integer mean of the three channels.
#[inline]
pub fn intensity(px: Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

#[inline]
pub fn occupancy(px: Rgb<u8>, threshold: u8) -> u8 {
    if intensity(px) > threshold {
        LIGHT
    } else {
        DARK
    }
}

/// `(P + 1) x (Q + 1)` occupancy values, P = canvas height / step and
/// Q = canvas width / step. Row `i` samples canvas row `i * step`.
///
/// Each grid row sits behind its own lock so workers can fill disjoint
/// rows concurrently and then read neighbouring rows once the fill is done.
pub struct OccupancyGrid {
    rows: Vec<RwLock<Vec<u8>>>,
    p: usize,
    q: usize,
}

impl OccupancyGrid {
    /// A zeroed grid with `p x q` interior cells.
    pub fn new(p: usize, q: usize) -> Self {
        let rows = (0..=p).map(|_| RwLock::new(vec![LIGHT; q + 1])).collect();
        Self { rows, p, q }
    }

    pub fn for_canvas(width: u32, height: u32, step: u32) -> Self {
        Self::new((height / step) as usize, (width / step) as usize)
    }

    /// P: number of interior cell rows.
    pub fn interior_rows(&self) -> usize {
        self.p
    }

    /// Q: number of interior cell columns.
    pub fn interior_cols(&self) -> usize {
        self.q
    }

    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.rows[i].read()[j]
    }

    pub fn row(&self, i: usize) -> RwLockReadGuard<'_, Vec<u8>> {
        self.rows[i].read()
    }

    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.rows.iter().map(|r| r.read().clone()).collect()
    }

    /// Interior fill for grid rows `rows`, columns `0..Q`.
    pub fn fill_interior<S: PixelSource>(&self, canvas: &S, rows: Range<usize>, step: u32, threshold: u8) {
        for i in rows {
            let y = i as u32 * step;
            let mut row = self.rows[i].write();
            for (j, cell) in row.iter_mut().take(self.q).enumerate() {
                *cell = occupancy(canvas.pixel(j as u32 * step, y), threshold);
            }
        }
    }

    /// Column Q for grid rows `rows`, sampled from the canvas' last pixel column.
    pub fn fill_boundary_column<S: PixelSource>(&self, canvas: &S, rows: Range<usize>, step: u32, threshold: u8) {
        let x = canvas.width() - 1;
        for i in rows {
            let value = occupancy(canvas.pixel(x, i as u32 * step), threshold);
            self.rows[i].write()[self.q] = value;
        }
    }

    /// Row P from the canvas' last pixel row; the corner (P, Q) is always light.
    pub fn fill_boundary_row<S: PixelSource>(&self, canvas: &S, step: u32, threshold: u8) {
        let y = canvas.height() - 1;
        let mut row = self.rows[self.p].write();
        for (j, cell) in row.iter_mut().take(self.q).enumerate() {
            *cell = occupancy(canvas.pixel(j as u32 * step, y), threshold);
        }
        row[self.q] = LIGHT;
    }
}
