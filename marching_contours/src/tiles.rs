//! The 16 pre-rendered contour tiles, one per configuration index.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use log::debug;

use crate::config::TileSource;
use crate::error::{ContourError, Result};

pub const CONFIG_COUNT: usize = 16;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Clone, Copy)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

// Segments joining edge midpoints, indexed by configuration
// (8 = top-left, 4 = top-right, 2 = bottom-right, 1 = bottom-left dark).
// Saddles 5 and 10 keep the two dark corners apart.
const SEGMENTS: [&[(Edge, Edge)]; CONFIG_COUNT] = {
    use Edge::*;
    [
        &[],
        &[(Left, Bottom)],
        &[(Bottom, Right)],
        &[(Left, Right)],
        &[(Top, Right)],
        &[(Top, Right), (Left, Bottom)],
        &[(Top, Bottom)],
        &[(Left, Top)],
        &[(Left, Top)],
        &[(Top, Bottom)],
        &[(Left, Top), (Bottom, Right)],
        &[(Top, Right)],
        &[(Left, Right)],
        &[(Bottom, Right)],
        &[(Left, Bottom)],
        &[],
    ]
};

/// Path of tile `index` under `dir`: `<dir>/<index>.ppm`.
pub fn tile_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index}.ppm"))
}

/// Immutable set of square contour tiles, all `size x size`.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<RgbImage>,
    size: u32,
}

impl TileSet {
    /// Validates count and dimensions up front so compositing never overruns a block.
    pub fn from_tiles(tiles: Vec<RgbImage>, size: u32) -> Result<Self> {
        if tiles.len() != CONFIG_COUNT {
            return Err(ContourError::TileCount { expected: CONFIG_COUNT, got: tiles.len() });
        }
        for (index, tile) in tiles.iter().enumerate() {
            let (width, height) = tile.dimensions();
            if width != size || height != size {
                return Err(ContourError::TileSize { index, width, height, expected: size });
            }
        }
        Ok(Self { tiles, size })
    }

    /// Reads `<dir>/0.ppm` .. `<dir>/15.ppm`; any missing or malformed tile is an error.
    pub fn load(dir: &Path, size: u32) -> Result<Self> {
        let mut tiles = Vec::with_capacity(CONFIG_COUNT);
        for index in 0..CONFIG_COUNT {
            let path = tile_path(dir, index);
            let tile = image::open(&path)
                .map_err(|source| ContourError::TileLoad { index, path: path.clone(), source })?
                .to_rgb8();
            debug!("Loaded contour tile {}: {}", index, path.display());
            tiles.push(tile);
        }
        Self::from_tiles(tiles, size)
    }

    /// Draws the canonical tiles: ink segments between edge midpoints on white.
    pub fn render(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(ContourError::InvalidConfig("tile size must be at least 1".into()));
        }
        let mid = (size - 1) as f32 / 2.0;
        let last = (size - 1) as f32;
        let point = |edge: Edge| match edge {
            Edge::Top => (mid, 0.0),
            Edge::Right => (last, mid),
            Edge::Bottom => (mid, last),
            Edge::Left => (0.0, mid),
        };
        let tiles = SEGMENTS
            .iter()
            .map(|segments| {
                let mut tile = RgbImage::from_pixel(size, size, BACKGROUND);
                for &(from, to) in segments.iter() {
                    draw_line_segment_mut(&mut tile, point(from), point(to), INK);
                }
                tile
            })
            .collect();
        Self::from_tiles(tiles, size)
    }

    pub fn from_source(source: &TileSource, size: u32) -> Result<Self> {
        match source {
            TileSource::Directory(dir) => Self::load(dir, size),
            TileSource::Rendered => Self::render(size),
        }
    }

    pub fn get(&self, index: u8) -> &RgbImage {
        &self.tiles[index as usize]
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Errors unless the tiles are exactly `step x step`.
    pub fn ensure_size(&self, step: u32) -> Result<()> {
        if self.size != step {
            return Err(ContourError::TileSize {
                index: 0,
                width: self.size,
                height: self.size,
                expected: step,
            });
        }
        Ok(())
    }
}
