#![deny(clippy::all)]
#![forbid(unsafe_code)]
// A `.scr` launched by the host must not open a console. `/c` output still
// reaches a redirected stdout, e.g. `conway.scr /c > controls.txt`.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod saver;

use error_iter::ErrorIter as _;
use life_grid::Config;
use log::{error, info, warn};
use pixels_main_support::animate;
use saver::{SaverMode, parse_saver_args};
use std::process::ExitCode;
use std::time::Duration;

const CELL_PIXEL_WIDTH: u32 = 16;
const STEP_MILLIS: u64 = 1000;
const INITIAL_DENSITY: f64 = 0.18;
const WRAP_EDGES: bool = true;
const MAX_AGE: u32 = 30;

const CONTROLS_TEXT: &str = "\
Conway screen saver

Run modes:
  /s         Fullscreen
  /p <HWND>  Preview
  /c         Config (this text)

Controls:
  Left mouse  = paint live cells
  Right mouse = erase cells
  ESC         = exit
";

fn main() -> ExitCode {
    env_logger::init();

    match parse_saver_args(std::env::args().skip(1)) {
        SaverMode::Config => {
            print!("{CONTROLS_TEXT}");
            ExitCode::SUCCESS
        }
        SaverMode::Preview { parent } => {
            warn!("Preview inside window {parent:#x} is not supported; exiting");
            ExitCode::SUCCESS
        }
        SaverMode::Run => run(),
    }
}

fn run() -> ExitCode {
    let config = config();
    info!("Running with {config:?}");
    match animate(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("animate() failed: {err}");
            for source in err.sources().skip(1) {
                error!("  Caused by: {source}");
            }
            ExitCode::FAILURE
        }
    }
}

fn config() -> Config {
    Config {
        cell_px: CELL_PIXEL_WIDTH,
        step_interval: Duration::from_millis(STEP_MILLIS),
        density: INITIAL_DENSITY,
        wrap: WRAP_EDGES,
        max_age: MAX_AGE,
    }
    .sanitized()
}
