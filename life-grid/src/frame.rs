use crate::clock::StepClock;
use crate::config::{Config, SurfaceSize};
use crate::grid::{AgeGrid, Random};
use crate::input::{CellEdit, InputMapper, PointerButton};
use crate::palette::{BACKGROUND_RGBA, color_for_age};
use log::{debug, info};
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Terminating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameEvent {
    QuitRequested,
    SurfaceResized(SurfaceSize),
    KeyPressed(Key),
    PointerButton { button: PointerButton, pressed: bool },
    PointerMoved { x: f64, y: f64 },
}

/// Receives one frame: a clear, any number of filled rectangles, a present.
pub trait DrawSink {
    fn clear(&mut self, rgba: [u8; 4]);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]);
    fn present(&mut self);
}

/// Simulation state plus the per-tick orchestration of input, resizing,
/// stepping and drawing.
#[derive(Debug)]
pub struct FrameLoop {
    config: Config,
    grid: AgeGrid,
    clock: StepClock,
    input: InputMapper,
    surface: SurfaceSize,
    state: FrameState,
    generation: u64,
    pending_edits: Vec<CellEdit>,
}

impl FrameLoop {
    pub fn new(config: Config, surface: SurfaceSize, now: Instant, rand: &mut Random) -> Self {
        let config = config.sanitized();
        let mut grid = AgeGrid::new(config.grid_size(surface));
        grid.randomize(config.density, rand);
        info!(
            "Starting {}x{} grid on {}x{} surface with {} live cells",
            grid.width(),
            grid.height(),
            surface.width,
            surface.height,
            grid.num_live_cells()
        );
        Self {
            config,
            grid,
            clock: StepClock::new(config.step_interval, now),
            input: InputMapper::new(config.cell_px),
            surface,
            state: FrameState::Running,
            generation: 0,
            pending_edits: Vec::new(),
        }
    }

    pub fn grid(&self) -> &AgeGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut AgeGrid {
        &mut self.grid
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs one iteration. Once terminating, further ticks do nothing.
    pub fn tick<I, S>(&mut self, events: I, now: Instant, sink: &mut S) -> FrameState
    where
        I: IntoIterator<Item = FrameEvent>,
        S: DrawSink + ?Sized,
    {
        if self.state == FrameState::Terminating {
            return self.state;
        }

        let resized_to = self.drain_events(events);
        if self.state == FrameState::Terminating {
            info!("Terminating after {} generations", self.generation);
            self.pending_edits.clear();
            return self.state;
        }

        if let Some(surface) = resized_to {
            self.on_surface_resized(surface);
        }
        self.apply_pointer_edits();
        if self.clock.try_step(now) {
            self.grid.step(self.config.wrap, self.config.max_age);
            self.generation += 1;
        }
        self.render(sink);
        self.state
    }

    fn drain_events<I>(&mut self, events: I) -> Option<SurfaceSize>
    where
        I: IntoIterator<Item = FrameEvent>,
    {
        let mut resized_to = None;
        for event in events {
            match event {
                FrameEvent::QuitRequested | FrameEvent::KeyPressed(Key::Escape) => {
                    self.state = FrameState::Terminating;
                }
                FrameEvent::KeyPressed(Key::Other) => {}
                FrameEvent::SurfaceResized(surface) => resized_to = Some(surface),
                FrameEvent::PointerButton { button, pressed } => {
                    let edits = self.input.on_button(button, pressed);
                    self.pending_edits.extend(edits);
                }
                FrameEvent::PointerMoved { x, y } => {
                    let edits = self.input.on_moved(x, y);
                    self.pending_edits.extend(edits);
                }
            }
        }
        resized_to
    }

    fn on_surface_resized(&mut self, surface: SurfaceSize) {
        if surface == self.surface {
            return;
        }
        debug!(
            "Surface resized from {}x{} to {}x{}",
            self.surface.width, self.surface.height, surface.width, surface.height
        );
        self.surface = surface;
        self.grid.resize(self.config.grid_size(surface));
    }

    fn apply_pointer_edits(&mut self) {
        for edit in self.pending_edits.drain(..) {
            edit.apply(&mut self.grid);
        }
    }

    fn render<S>(&self, sink: &mut S)
    where
        S: DrawSink + ?Sized,
    {
        let cell_px = self.config.cell_px;
        sink.clear(BACKGROUND_RGBA);
        for (loc, age) in self.grid.live_cells() {
            sink.fill_rect(
                loc.col * cell_px,
                loc.row * cell_px,
                cell_px,
                cell_px,
                color_for_age(age, self.config.max_age),
            );
        }
        sink.present();
    }
}
