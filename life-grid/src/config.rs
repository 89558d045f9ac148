use crate::grid::GridSize;
use std::time::Duration;

pub const DEFAULT_CELL_PX: u32 = 16;
pub const DEFAULT_STEP_MILLIS: u64 = 1000;
pub const DEFAULT_DENSITY: f64 = 0.18;
pub const DEFAULT_WRAP: bool = true;
pub const DEFAULT_MAX_AGE: u32 = 30;

/// Tunables fixed for the life of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub cell_px: u32,
    pub step_interval: Duration,
    pub density: f64,
    pub wrap: bool,
    pub max_age: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_px: DEFAULT_CELL_PX,
            step_interval: Duration::from_millis(DEFAULT_STEP_MILLIS),
            density: DEFAULT_DENSITY,
            wrap: DEFAULT_WRAP,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl Config {
    /// Pulls every tunable into its valid range.
    pub fn sanitized(self) -> Self {
        let density = if self.density.is_nan() {
            0.0
        } else {
            self.density.clamp(0.0, 1.0)
        };
        Self {
            cell_px: self.cell_px.max(1),
            step_interval: self.step_interval,
            density,
            wrap: self.wrap,
            max_age: self.max_age.clamp(1, u8::MAX as u32),
        }
    }

    pub fn grid_size(&self, surface: SurfaceSize) -> GridSize {
        let cell_px = self.cell_px.max(1);
        GridSize::new(
            (surface.width / cell_px).max(1),
            (surface.height / cell_px).max(1),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
