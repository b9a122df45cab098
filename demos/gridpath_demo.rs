//! Headless demo: carve a maze, then search it, printing ASCII frames.
//!
//! Run: cargo run --bin gridpath-demo [config.json]
//! Set `RUST_LOG=debug` to see run progress.

use std::path::PathBuf;
use std::time::Duration;

use gridpath_core::{CellKind, Context, Status, Stepper, compute_frame, drive};
use gridpath_demos::{DemoConfig, render};
use gridpath_maze::MazeRun;
use gridpath_search::run_search;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const CLEAR: &str = "\x1b[2J\x1b[H";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(path.as_deref())?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "{}x{} grid, {} maze (seed {seed}), {} search",
        config.rows,
        config.cols,
        config.difficulty,
        config.algorithm
    );

    let mut grid = config.grid()?;
    let delay = if config.animate {
        config.speed.delay()
    } else {
        Duration::ZERO
    };

    // Maze
    let ctx = Context::new();
    let mut maze = MazeRun::new(
        &mut grid,
        config.difficulty.complexity(),
        StdRng::seed_from_u64(seed),
    );
    drive(&mut maze, delay, &ctx, |run, _| {
        if config.animate {
            print!("{CLEAR}{}", render(run.grid()));
        }
    })?;
    let walls = grid.iter().filter(|c| c.kind() == CellKind::Wall).count();
    log::info!("maze placed {walls} walls");

    // Search
    let ctx = Context::new();
    let mut prev = grid.clone();
    let mut search = run_search(config.algorithm, &mut grid);
    let outcome = drive(&mut search, delay, &ctx, |run, _| {
        let frame = compute_frame(&prev, run.grid());
        log::trace!("step {}: {} cells changed", run.steps(), frame.cells.len());
        prev = run.grid().clone();
        if config.animate {
            print!("{CLEAR}{}", render(run.grid()));
        }
        if config.max_steps.is_some_and(|max| run.steps() >= max) {
            ctx.cancel();
        }
    })?;
    let steps = search.steps();
    drop(search);

    print!("{}", render(&grid));
    match outcome {
        Status::Succeeded(path) => {
            println!("{}: path of {} moves in {steps} steps", config.algorithm, path.cost())
        }
        Status::Exhausted => println!("{}: no path after {steps} steps", config.algorithm),
        Status::Cancelled => println!("{}: cancelled after {steps} steps", config.algorithm),
        Status::Running => unreachable!("drive returns only terminal statuses"),
    }
    Ok(())
}
