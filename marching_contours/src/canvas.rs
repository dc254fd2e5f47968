use image::{Rgb, RgbImage};
use parking_lot::Mutex;

use crate::error::{ContourError, Result};

const CHANNELS: usize = 3;

/// Read access to RGB pixels, shared by whole images and the partitioned canvas.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> Rgb<u8>;
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.get_pixel(x, y)
    }
}

/// A working canvas split into independently lockable pixel rows.
///
/// Workers write only the rows of their own range, so every lock is
/// uncontended; the locks exist to let disjoint rows of one buffer be
/// borrowed mutably from several threads at once. Pixel reads lock the row
/// too; the sampling phases never write the canvas, so a read never waits
/// on a writer.
pub struct SharedCanvas<'a> {
    rows: Vec<Mutex<&'a mut [u8]>>,
    width: u32,
    height: u32,
}

impl<'a> SharedCanvas<'a> {
    pub fn new(image: &'a mut RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let row_len = width as usize * CHANNELS;
        let rows = if row_len == 0 {
            Vec::new()
        } else {
            image.chunks_mut(row_len).map(Mutex::new).collect()
        };
        Self { rows, width, height }
    }

    /// Runs `f` on the raw RGB bytes of row `y`.
    pub fn with_row_mut<R>(&self, y: u32, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut row = self.rows[y as usize].lock();
        f(&mut row[..])
    }
}

impl PixelSource for SharedCanvas<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        let row = self.rows[y as usize].lock();
        let o = x as usize * CHANNELS;
        Rgb([row[o], row[o + 1], row[o + 2]])
    }
}

/// Allocates a zeroed `width` x `height` canvas, reporting failure instead of aborting.
pub fn allocate_canvas(width: u32, height: u32) -> Result<RgbImage> {
    let bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(ContourError::Allocation { width, height, bytes: usize::MAX })?;
    let mut data: Vec<u8> = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| ContourError::Allocation { width, height, bytes })?;
    data.resize(bytes, 0);
    RgbImage::from_raw(width, height, data).ok_or(ContourError::Allocation { width, height, bytes })
}
