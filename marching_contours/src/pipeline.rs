//! Parallel coordinator: one fixed pool of workers runs every phase over
//! its own row range, with a barrier between phases.
//!
//! Phase order:
//! 0. resample (only when the source exceeds the rescale bounds)
//! 1. grid interior fill
//! 2. grid boundary fill (column Q, row P, corner)
//! 3. classify + composite

use std::panic::{self, AssertUnwindSafe};
use std::sync::Barrier;
use std::thread;
use std::time::Instant;

use image::RgbImage;
use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};

use crate::canvas::{allocate_canvas, PixelSource, SharedCanvas};
use crate::config::{Config, Params};
use crate::error::{ContourError, Result};
use crate::grid::OccupancyGrid;
use crate::march::composite_rows;
use crate::partition::row_range;
use crate::resample::{fits_within, resample_rows};
use crate::tiles::TileSet;

/// Holds workers until every thread of the pool exists, or releases them
/// empty-handed when spawning fails part way.
struct StartGate {
    state: Mutex<Option<bool>>,
    cond: Condvar,
}

impl StartGate {
    fn new() -> Self {
        Self { state: Mutex::new(None), cond: Condvar::new() }
    }

    fn open(&self, go: bool) {
        *self.state.lock() = Some(go);
        self.cond.notify_all();
    }

    fn wait(&self) -> bool {
        let mut state = self.state.lock();
        while state.is_none() {
            self.cond.wait(&mut state);
        }
        *state == Some(true)
    }
}

struct Shared<'a> {
    source: Option<&'a RgbImage>,
    canvas: SharedCanvas<'a>,
    grid: &'a OccupancyGrid,
    tiles: &'a TileSet,
    config: &'a Config,
    barrier: Barrier,
    gate: StartGate,
    failed: Mutex<Option<usize>>,
    phase_started: Mutex<Instant>,
}

impl Shared<'_> {
    /// Runs one phase's work unless an earlier phase already failed.
    /// A panicking worker is recorded and keeps meeting the barriers.
    fn guarded(&self, id: usize, work: impl FnOnce()) {
        if self.failed.lock().is_some() {
            return;
        }
        if panic::catch_unwind(AssertUnwindSafe(work)).is_err() {
            self.failed.lock().get_or_insert(id);
        }
    }

    fn sync(&self, phase: &str) {
        if self.barrier.wait().is_leader() {
            let mut started = self.phase_started.lock();
            debug!("phase {} done in {} ms", phase, started.elapsed().as_millis());
            *started = Instant::now();
        }
    }
}

fn run_worker(id: usize, ctx: &Shared<'_>) {
    if !ctx.gate.wait() {
        return;
    }
    let workers = ctx.config.num_threads;
    let step = ctx.config.step;
    let threshold = ctx.config.threshold;

    if let Some(source) = ctx.source {
        let rows = row_range(id, workers, ctx.canvas.height() as usize);
        ctx.guarded(id, || resample_rows(source, &ctx.canvas, rows));
        ctx.sync("resample");
    }

    let rows = row_range(id, workers, ctx.grid.interior_rows());

    ctx.guarded(id, || ctx.grid.fill_interior(&ctx.canvas, rows.clone(), step, threshold));
    ctx.sync("grid interior");

    ctx.guarded(id, || {
        ctx.grid.fill_boundary_column(&ctx.canvas, rows.clone(), step, threshold);
        if id == 0 {
            ctx.grid.fill_boundary_row(&ctx.canvas, step, threshold);
        }
    });
    ctx.sync("grid boundary");

    ctx.guarded(id, || composite_rows(ctx.grid, &ctx.canvas, ctx.tiles, rows));
    ctx.sync("composite");
}

/// Runs phases 0-3 on a pool of `config.num_threads` workers.
///
/// `source` is `Some` when the canvas must first be filled by resampling it.
/// The grid must be sized for the canvas and the tiles must be `step x step`.
pub fn run_phases(
    canvas: &mut RgbImage,
    source: Option<&RgbImage>,
    grid: &OccupancyGrid,
    tiles: &TileSet,
    config: &Config,
) -> Result<()> {
    config.validate()?;
    tiles.ensure_size(config.step)?;
    let workers = config.num_threads;
    let ctx = Shared {
        source,
        canvas: SharedCanvas::new(canvas),
        grid,
        tiles,
        config,
        barrier: Barrier::new(workers),
        gate: StartGate::new(),
        failed: Mutex::new(None),
        phase_started: Mutex::new(Instant::now()),
    };

    thread::scope(|s| -> Result<()> {
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let ctx = &ctx;
            let spawned = thread::Builder::new()
                .name(format!("march-{id}"))
                .spawn_scoped(s, move || run_worker(id, ctx));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    ctx.gate.open(false);
                    return Err(ContourError::ThreadSpawn { id, source });
                }
            }
        }
        ctx.gate.open(true);
        for (id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                return Err(ContourError::WorkerPanicked(id));
            }
        }
        Ok(())
    })?;

    let failed = *ctx.failed.lock();
    match failed {
        Some(id) => Err(ContourError::WorkerPanicked(id)),
        None => Ok(()),
    }
}

fn ensure_non_empty(image: &RgbImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ContourError::EmptyImage { width, height });
    }
    Ok(())
}

/// Phases 1-2 on a single thread: the occupancy grid of `canvas` as-is.
pub fn build_grid(canvas: &RgbImage, config: &Config) -> Result<OccupancyGrid> {
    config.validate()?;
    ensure_non_empty(canvas)?;
    let (width, height) = canvas.dimensions();
    let grid = OccupancyGrid::for_canvas(width, height, config.step);
    grid.fill_interior(canvas, 0..grid.interior_rows(), config.step, config.threshold);
    grid.fill_boundary_column(canvas, 0..grid.interior_rows(), config.step, config.threshold);
    grid.fill_boundary_row(canvas, config.step, config.threshold);
    Ok(grid)
}

/// Core algorithm on an in-memory image: returns the contour canvas.
///
/// A source within the rescale bounds becomes the canvas itself; a larger
/// one is resampled onto a fresh `max_width x max_height` canvas.
pub fn process_image(source: RgbImage, tiles: &TileSet, config: &Config) -> Result<RgbImage> {
    config.validate()?;
    tiles.ensure_size(config.step)?;
    ensure_non_empty(&source)?;

    let (src_w, src_h) = source.dimensions();
    let (mut canvas, original) = if fits_within(&source, config.max_width, config.max_height) {
        info!("Source {}x{} fits {}x{}, no rescale", src_w, src_h, config.max_width, config.max_height);
        (source, None)
    } else {
        info!("Rescaling {}x{} to {}x{}", src_w, src_h, config.max_width, config.max_height);
        (allocate_canvas(config.max_width, config.max_height)?, Some(source))
    };

    let (width, height) = canvas.dimensions();
    let grid = OccupancyGrid::for_canvas(width, height, config.step);
    info!(
        "Canvas {}x{}, grid {}x{} (step {}), {} threads",
        width,
        height,
        grid.interior_rows() + 1,
        grid.interior_cols() + 1,
        config.step,
        config.num_threads
    );
    if grid.interior_rows() == 0 || grid.interior_cols() == 0 {
        warn!("Canvas {}x{} is smaller than one {}px cell; no contours drawn", width, height, config.step);
    }

    let started = Instant::now();
    run_phases(&mut canvas, original.as_ref(), &grid, tiles, config)?;
    debug!("all phases done in {} ms", started.elapsed().as_millis());
    Ok(canvas)
}

/// Batch entry point: load, draw contours, save.
pub fn process(params: Params) -> Result<()> {
    let Params { input, output, config } = params;
    config.validate()?;
    info!("Starting marching squares");
    info!("Input image: {}", input.display());
    info!("Output image: {}", output.display());

    let tiles = TileSet::from_source(&config.tiles, config.step)?;
    let source = image::open(&input)
        .map_err(|source| ContourError::ImageRead { path: input.clone(), source })?
        .to_rgb8();

    let canvas = process_image(source, &tiles, &config)?;
    canvas
        .save(&output)
        .map_err(|source| ContourError::ImageWrite { path: output.clone(), source })?;
    info!("Output saved");
    Ok(())
}
