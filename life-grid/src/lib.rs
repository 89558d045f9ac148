#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Conway's Game of Life with per-cell ages, colored by age, sized to fit a
//! resizable drawing surface.

mod clock;
mod config;
mod frame;
mod grid;
mod input;
mod palette;

pub use clock::StepClock;
pub use config::{Config, SurfaceSize};
pub use frame::{DrawSink, FrameEvent, FrameLoop, FrameState, Key};
pub use grid::{AgeGrid, CellAge, GridSize, Loc, Random};
pub use input::{CellEdit, InputMapper, PointerButton, PointerEdits};
pub use palette::{BACKGROUND_RGBA, color_for_age, hsv_to_rgba};
