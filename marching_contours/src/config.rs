use std::path::PathBuf;

use crate::error::{ContourError, Result};

/// Pixels per grid cell on both axes; also the contour tile edge length.
pub const DEFAULT_STEP: u32 = 8;
/// Mean RGB intensity above which a sample counts as light.
pub const DEFAULT_THRESHOLD: u8 = 200;
pub const DEFAULT_MAX_WIDTH: u32 = 2048;
pub const DEFAULT_MAX_HEIGHT: u32 = 2048;
pub const DEFAULT_CONTOUR_DIR: &str = "./contours";

/// Where the 16 contour tiles come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileSource {
    /// `<dir>/<index>.ppm` for index 0..15.
    Directory(PathBuf),
    /// Tiles drawn in memory, see [`crate::TileSet::render`].
    Rendered,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub step: u32,
    pub threshold: u8,
    pub max_width: u32,
    pub max_height: u32,
    pub num_threads: usize,
    pub tiles: TileSource,
}

pub fn default_config() -> Config {
    Config {
        step: DEFAULT_STEP,
        threshold: DEFAULT_THRESHOLD,
        max_width: DEFAULT_MAX_WIDTH,
        max_height: DEFAULT_MAX_HEIGHT,
        num_threads: num_cpus::get().max(1),
        tiles: TileSource::Directory(PathBuf::from(DEFAULT_CONTOUR_DIR)),
    }
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Config {
    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(ContourError::InvalidConfig(
                "thread count must be at least 1".into(),
            ));
        }
        if self.step == 0 {
            return Err(ContourError::InvalidConfig(
                "sampling step must be at least 1".into(),
            ));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ContourError::InvalidConfig(format!(
                "rescale bounds must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

/// One batch run: read `input`, draw contours, write `output`.
#[derive(Debug, Clone)]
pub struct Params {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Config,
}
