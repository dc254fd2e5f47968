//! Bicubic rescaling of the source image onto the fixed-size working canvas.

use std::ops::Range;

use image::{Rgb, RgbImage};

use crate::canvas::{allocate_canvas, PixelSource, SharedCanvas};
use crate::error::Result;

/// True when the image needs no rescale: it fits the bounds on both axes.
pub fn fits_within(image: &RgbImage, max_width: u32, max_height: u32) -> bool {
    image.width() <= max_width && image.height() <= max_height
}

/// Catmull-Rom cubic through `b` (t = 0) and `c` (t = 1).
#[inline]
pub fn cubic_hermite(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let a3 = -a / 2.0 + (3.0 * b) / 2.0 - (3.0 * c) / 2.0 + d / 2.0;
    let b2 = a - (5.0 * b) / 2.0 + 2.0 * c - d / 2.0;
    let c1 = -a / 2.0 + c / 2.0;
    a3 * t * t * t + b2 * t * t + c1 * t + b
}

#[inline]
fn clamped(image: &RgbImage, x: i64, y: i64) -> &Rgb<u8> {
    let x = x.clamp(0, image.width() as i64 - 1) as u32;
    let y = y.clamp(0, image.height() as i64 - 1) as u32;
    image.get_pixel(x, y)
}

/// Samples `image` at normalized coordinates `u`, `v` in [0, 1].
///
/// The 4x4 neighbourhood is edge-clamped, so no read leaves the image.
pub fn sample_bicubic(image: &RgbImage, u: f32, v: f32) -> Rgb<u8> {
    let x = u * image.width() as f32 - 0.5;
    let y = v * image.height() as f32 - 0.5;
    let (xf, yf) = (x.floor(), y.floor());
    let (xt, yt) = (x - xf, y - yf);
    let (xi, yi) = (xf as i64, yf as i64);

    let mut out = [0u8; 3];
    for (ch, value) in out.iter_mut().enumerate() {
        let mut cols = [0f32; 4];
        for (k, dy) in (-1..=2).enumerate() {
            let p = |dx: i64| clamped(image, xi + dx, yi + dy)[ch] as f32;
            cols[k] = cubic_hermite(p(-1), p(0), p(1), p(2), xt);
        }
        let v = cubic_hermite(cols[0], cols[1], cols[2], cols[3], yt);
        *value = v.clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

#[inline]
fn normalized(i: u32, n: u32) -> f32 {
    if n > 1 {
        i as f32 / (n - 1) as f32
    } else {
        0.0
    }
}

/// Fills canvas rows `rows` with bicubic samples of `source`.
pub fn resample_rows(source: &RgbImage, canvas: &SharedCanvas<'_>, rows: Range<usize>) {
    let (out_w, out_h) = (canvas.width(), canvas.height());
    for y in rows {
        let y = y as u32;
        let v = normalized(y, out_h);
        canvas.with_row_mut(y, |row| {
            for x in 0..out_w {
                let px = sample_bicubic(source, normalized(x, out_w), v);
                let o = x as usize * 3;
                row[o..o + 3].copy_from_slice(&px.0);
            }
        });
    }
}

/// Single-threaded rescale of `source` to exactly `width` x `height`.
pub fn resample(source: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    let mut out = allocate_canvas(width, height)?;
    {
        let canvas = SharedCanvas::new(&mut out);
        resample_rows(source, &canvas, 0..height as usize);
    }
    Ok(out)
}
