//! Cell classification and tile compositing.

use std::ops::Range;

use image::RgbImage;

use crate::canvas::SharedCanvas;
use crate::error::{ContourError, Result};
use crate::grid::OccupancyGrid;
use crate::tiles::TileSet;

/// 4-bit marching-squares configuration from the corner occupancy bits.
/// Only the lowest bit of each corner counts.
#[inline]
pub fn configuration_index(top_left: u8, top_right: u8, bottom_right: u8, bottom_left: u8) -> u8 {
    8 * (top_left & 1) + 4 * (top_right & 1) + 2 * (bottom_right & 1) + (bottom_left & 1)
}

/// Configuration indices of every interior cell in grid row `i`.
pub fn row_configurations(grid: &OccupancyGrid, i: usize) -> Vec<u8> {
    let top = grid.row(i);
    let bottom = grid.row(i + 1);
    (0..grid.interior_cols())
        .map(|j| configuration_index(top[j], top[j + 1], bottom[j + 1], bottom[j]))
        .collect()
}

/// Stamps the tile of every interior cell in grid rows `rows` onto the canvas.
///
/// Cell row `i` covers canvas rows `i * step .. (i + 1) * step`, so disjoint
/// grid ranges never touch the same pixel. Tiles must be `step x step`.
pub fn composite_rows(grid: &OccupancyGrid, canvas: &SharedCanvas<'_>, tiles: &TileSet, rows: Range<usize>) {
    let step = tiles.size() as usize;
    let span = step * 3;
    for i in rows {
        let configs = row_configurations(grid, i);
        for ty in 0..step {
            let y = (i * step + ty) as u32;
            canvas.with_row_mut(y, |row| {
                for (j, &k) in configs.iter().enumerate() {
                    let src = &tiles.get(k).as_raw()[ty * span..(ty + 1) * span];
                    row[j * span..(j + 1) * span].copy_from_slice(src);
                }
            });
        }
    }
}

/// Phase 3 alone, single-threaded, over a grid built for `canvas`.
pub fn composite(canvas: &mut RgbImage, grid: &OccupancyGrid, tiles: &TileSet) -> Result<()> {
    let step = tiles.size() as usize;
    let (width, height) = canvas.dimensions();
    if grid.interior_rows() * step > height as usize || grid.interior_cols() * step > width as usize {
        return Err(ContourError::InvalidConfig(format!(
            "{}x{} cells of {step}px do not fit a {width}x{height} canvas",
            grid.interior_cols(),
            grid.interior_rows()
        )));
    }
    let rows = 0..grid.interior_rows();
    let shared = SharedCanvas::new(canvas);
    composite_rows(grid, &shared, tiles, rows);
    Ok(())
}
