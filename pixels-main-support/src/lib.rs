#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod sink;

pub use sink::{PixelsSink, clear_rgba, fill_rect_rgba};

use life_grid::{
    Config, FrameEvent, FrameLoop, FrameState, Key, PointerButton, Random, SurfaceSize,
};
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::mem;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Fullscreen, Window, WindowId};

const WINDOW_TITLE: &str = "Conway Screen Saver";
const FRAME_SLEEP: Duration = Duration::from_millis(1);
const CLEAR_COLOR: Color = Color::BLACK;

#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("could not create the event loop")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create the window")]
    Window(#[from] OsError),
    #[error("could not create the pixel surface")]
    Pixels(#[from] pixels::Error),
}

/// Runs the simulation fullscreen until Escape or a close request.
pub fn animate(config: Config) -> Result<(), AnimateError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut handler = AppEventHandler::new(config);
    event_loop.run_app(&mut handler)?;
    handler.into_result()
}

struct App {
    frames: FrameLoop,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_size: SurfaceSize,
    pending_events: Vec<FrameEvent>,
}

impl App {
    fn new(event_loop: &ActiveEventLoop, config: Config) -> Result<Self, AnimateError> {
        let window = Arc::new(Self::build_window(event_loop)?);
        let buffer_size = Self::surface_size(window.inner_size());
        let pixels = Self::build_pixels(&window, buffer_size)?;
        let frames = FrameLoop::new(config, buffer_size, Instant::now(), &mut Random::new());
        Ok(Self {
            frames,
            window,
            pixels,
            buffer_size,
            pending_events: Vec::new(),
        })
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Result<Window, OsError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(
        window: &Arc<Window>,
        size: SurfaceSize,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        PixelsBuilder::new(size.width, size.height, surface_texture)
            .clear_color(CLEAR_COLOR)
            .build()
    }

    fn surface_size(size: PhysicalSize<u32>) -> SurfaceSize {
        SurfaceSize::new(size.width.max(1), size.height.max(1))
    }

    fn on_create(&mut self) {
        self.window.set_cursor_visible(true);
        self.window.set_visible(true);
    }

    fn on_resized(&mut self, size: PhysicalSize<u32>) {
        // Minimized windows report zero; keep the last usable size.
        if size.width == 0 || size.height == 0 {
            return;
        }
        let size = Self::surface_size(size);
        if let Err(err) = self.pixels.resize_surface(size.width, size.height) {
            error!("pixels.resize_surface() failed: {err}");
            return;
        }
        if let Err(err) = self.pixels.resize_buffer(size.width, size.height) {
            error!("pixels.resize_buffer() failed: {err}");
            return;
        }
        self.buffer_size = size;
        self.pending_events.push(FrameEvent::SurfaceResized(size));
    }

    fn on_tick(&mut self) -> FrameState {
        let events = mem::take(&mut self.pending_events);
        let mut sink = PixelsSink::new(&mut self.pixels, self.buffer_size);
        self.frames.tick(events, Instant::now(), &mut sink)
    }

    fn translate(event: &WindowEvent) -> Option<FrameEvent> {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(FrameEvent::QuitRequested),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => Some(FrameEvent::KeyPressed(match physical_key {
                PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
                _ => Key::Other,
            })),
            WindowEvent::MouseInput { state, button, .. } => Some(FrameEvent::PointerButton {
                button: match button {
                    MouseButton::Left => PointerButton::Left,
                    MouseButton::Right => PointerButton::Right,
                    _ => PointerButton::Other,
                },
                pressed: state.is_pressed(),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(FrameEvent::PointerMoved {
                x: position.x,
                y: position.y,
            }),
            _ => None,
        }
    }
}

struct AppEventHandler {
    config: Config,
    app: Option<App>,
    error: Option<AnimateError>,
}

impl AppEventHandler {
    fn new(config: Config) -> Self {
        Self {
            config,
            app: None,
            error: None,
        }
    }

    fn into_result(self) -> Result<(), AnimateError> {
        self.error.map_or(Ok(()), Err)
    }
}

impl ApplicationHandler for AppEventHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.error.is_some() {
            return;
        }
        match App::new(event_loop, self.config) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match event {
            WindowEvent::Resized(size) => app.on_resized(size),
            WindowEvent::ScaleFactorChanged { .. } => app.on_resized(app.window.inner_size()),
            event => {
                if let Some(frame_event) = App::translate(&event) {
                    app.pending_events.push(frame_event);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match app.on_tick() {
            FrameState::Running => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_SLEEP));
            }
            FrameState::Terminating => event_loop.exit(),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.take() {
            info!(
                "Released window and pixel surface after {} generations",
                app.frames.generation()
            );
        }
    }
}
