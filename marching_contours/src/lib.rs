//! Marching-squares contour drawing of raster images.
//!
//! The source image is rescaled onto a working canvas when it exceeds the
//! configured bounds, sampled on a fixed stride into a binary occupancy grid,
//! and every grid cell is replaced by the contour tile matching its four
//! corners. All phases run on one pool of worker threads that split the
//! canvas into disjoint row ranges.
//!
//! ```no_run
//! use marching_contours::{default_config, process_image, TileSet};
//!
//! let config = default_config();
//! let tiles = TileSet::render(config.step)?;
//! let source = image::open("input.png").expect("readable image").to_rgb8();
//! let contours = process_image(source, &tiles, &config)?;
//! contours.save("contours.png").expect("writable output");
//! # Ok::<(), marching_contours::ContourError>(())
//! ```

pub mod canvas;
mod config;
mod error;
pub mod grid;
pub mod march;
pub mod partition;
mod pipeline;
pub mod resample;
pub mod tiles;

pub use config::{
    default_config, Config, Params, TileSource, DEFAULT_CONTOUR_DIR, DEFAULT_MAX_HEIGHT,
    DEFAULT_MAX_WIDTH, DEFAULT_STEP, DEFAULT_THRESHOLD,
};
pub use error::{ContourError, Result};
pub use grid::OccupancyGrid;
pub use march::{composite, configuration_index};
pub use partition::row_range;
pub use pipeline::{build_grid, process, process_image, run_phases};
pub use tiles::{TileSet, CONFIG_COUNT};
