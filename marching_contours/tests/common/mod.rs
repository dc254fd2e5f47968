#![allow(dead_code)]

use std::path::PathBuf;

use image::{ImageBuffer, Rgb, RgbImage};
use marching_contours::{Config, TileSet, TileSource, CONFIG_COUNT};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

pub fn solid(width: u32, height: u32, px: Rgb<u8>) -> RgbImage {
    ImageBuffer::from_pixel(width, height, px)
}

/// Deterministic mix of blobs and stripes, so every configuration shows up.
pub fn pattern(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let (cx, cy) = (width as i64 / 3, height as i64 / 2);
        let (dx, dy) = (x as i64 - cx, y as i64 - cy);
        let in_blob = dx * dx + dy * dy < (width as i64 * width as i64) / 16;
        let stripe = (x / 7 + y / 5) % 3 == 0;
        if in_blob || stripe {
            Rgb([(x * 3 % 90) as u8, 40, (y % 60) as u8])
        } else {
            Rgb([230, 240, (200 + x % 50) as u8])
        }
    })
}

/// Tile `k` is filled with a colour unique to `k`.
pub fn tile_colour(k: usize) -> Rgb<u8> {
    Rgb([(k * 16) as u8, (255 - k * 16) as u8, 7])
}

pub fn marked_tiles(step: u32) -> TileSet {
    let tiles = (0..CONFIG_COUNT).map(|k| solid(step, step, tile_colour(k))).collect();
    TileSet::from_tiles(tiles, step).expect("marked tiles are step x step")
}

pub fn config(step: u32, threads: usize) -> Config {
    Config {
        step,
        threshold: 200,
        max_width: 64,
        max_height: 64,
        num_threads: threads,
        tiles: TileSource::Rendered,
    }
}

/// True when the `size x size` block at (`x0`, `y0`) matches `tile` pixel for pixel.
pub fn block_equals(canvas: &RgbImage, x0: u32, y0: u32, tile: &RgbImage) -> bool {
    tile.enumerate_pixels()
        .all(|(x, y, px)| canvas.get_pixel(x0 + x, y0 + y) == px)
}

/// Fresh, empty scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("marching_contours_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}
