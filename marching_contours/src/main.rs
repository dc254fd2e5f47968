// CLI entry for march
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use marching_contours::{default_config, process, Config, Params, TileSource};

#[derive(Parser, Debug)]
#[command(name = "march", version, about = "Marching-squares contour drawing (Rust core)")]
struct Cli {
    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Output image path
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
    /// Number of worker threads (at least 1)
    threads: usize,

    /// Pixels per grid cell on both axes; must match the tile size
    #[arg(long = "step")]
    step: Option<u32>,
    /// Mean intensity above which a sample is light (0-255)
    #[arg(long = "threshold")]
    threshold: Option<u8>,
    /// Rescale bound (width)
    #[arg(long = "max-width")]
    max_width: Option<u32>,
    /// Rescale bound (height)
    #[arg(long = "max-height")]
    max_height: Option<u32>,
    /// Directory holding the contour tiles 0.ppm .. 15.ppm
    #[arg(long = "contours", value_hint = ValueHint::DirPath, conflicts_with = "builtin_tiles")]
    contours: Option<PathBuf>,
    /// Draw the contour tiles in memory instead of loading them
    #[arg(long = "builtin-tiles")]
    builtin_tiles: bool,
}

fn build_config(cli: &Cli) -> Config {
    let mut cfg = default_config();
    cfg.num_threads = cli.threads;
    if let Some(v) = cli.step { cfg.step = v; }
    if let Some(v) = cli.threshold { cfg.threshold = v; }
    if let Some(v) = cli.max_width { cfg.max_width = v; }
    if let Some(v) = cli.max_height { cfg.max_height = v; }
    if let Some(dir) = &cli.contours { cfg.tiles = TileSource::Directory(dir.clone()); }
    if cli.builtin_tiles { cfg.tiles = TileSource::Rendered; }
    cfg
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli);
    let input = cli.input.clone();
    process(Params { input: cli.input, output: cli.output, config })
        .with_context(|| format!("contour run failed for {}", input.display()))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let usage_error = e.use_stderr();
            // Usage errors exit 1; --help and --version exit 0.
            let _ = e.print();
            return if usage_error { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
