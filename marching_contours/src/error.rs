use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a contour run.
///
/// Every variant is terminal for the batch: the pipeline never produces a
/// partial canvas. Callers embedding the library decide whether to recover.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContourError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load contour tile {index} from {}: {source}", .path.display())]
    TileLoad {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("expected {expected} contour tiles, got {got}")]
    TileCount { expected: usize, got: usize },

    #[error("contour tile {index} is {width}x{height}, expected {expected}x{expected}")]
    TileSize {
        index: usize,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("unable to allocate {bytes} bytes for a {width}x{height} canvas")]
    Allocation { width: u32, height: u32, bytes: usize },

    #[error("failed to spawn worker thread {id}: {source}")]
    ThreadSpawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker thread {0} panicked")]
    WorkerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, ContourError>;
