use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use cubeview_engine::device::GlowDriver;
use cubeview_engine::surface::{CubeSurface, GlSurface, RotationHandle};

use crate::context::GlWindow;
use crate::input::RotationControl;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cubeview".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            vsync: true,
        }
    }
}

/// Wake-up sent by producers outside the event loop.
#[derive(Debug, Clone, Copy)]
pub enum StudioEvent {
    RotationQueued,
}

const SPIN_TICK: Duration = Duration::from_millis(16);

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the surface fails.
    ///
    /// `spin` (radians per second) starts a background thread that feeds the
    /// surface through its [`RotationHandle`].
    pub fn run(
        config: RuntimeConfig,
        surface: CubeSurface<GlowDriver>,
        spin: Option<f64>,
    ) -> Result<()> {
        let event_loop = EventLoop::<StudioEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Some(speed) = spin {
            spawn_spinner(
                surface.rotation_handle(),
                surface.rotation(),
                speed,
                event_loop.create_proxy(),
            )?;
        }

        let mut state = AppState::new(config, surface);
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn spawn_spinner(
    handle: RotationHandle,
    start: f64,
    speed: f64,
    proxy: EventLoopProxy<StudioEvent>,
) -> Result<()> {
    thread::Builder::new()
        .name("cubeview-spin".to_string())
        .spawn(move || {
            let started = Instant::now();
            loop {
                thread::sleep(SPIN_TICK);
                let angle = (start + speed * started.elapsed().as_secs_f64()).rem_euclid(TAU);
                if !handle.set(angle) || proxy.send_event(StudioEvent::RotationQueued).is_err() {
                    break;
                }
            }
            log::debug!("spin thread stopped");
        })
        .context("failed to start the spin thread")?;
    Ok(())
}

struct AppState {
    config: RuntimeConfig,
    surface: CubeSurface<GlowDriver>,
    control: RotationControl,
    window: Option<GlWindow>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, surface: CubeSurface<GlowDriver>) -> Self {
        Self {
            config,
            surface,
            control: RotationControl::default(),
            window: None,
            failure: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = GlWindow::create(event_loop, &self.config)?;
        if let Err(err) = self.surface.on_context_init(window.driver()) {
            // Release whatever init allocated before the context is dropped.
            self.surface.on_context_deinit(window.driver());
            return Err(err).context("failed to initialize the cube surface");
        }

        window.window().set_title(&self.title());
        window.window().request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// Releases GPU objects while the context is still current, then drops it.
    fn close(&mut self) {
        if let Some(window) = self.window.take() {
            self.surface.on_context_deinit(window.driver());
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.close();
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn title(&self) -> String {
        format!(
            "{} | rotation {:.3} rad | {}",
            self.config.title,
            self.surface.rotation(),
            self.surface.background()
        )
    }

    fn set_rotation(&mut self, radians: Option<f64>) {
        if let Some(radians) = radians {
            self.surface.set_rotation(radians);
        }
        self.request_scheduled_render();
    }

    fn request_scheduled_render(&mut self) {
        if !self.surface.take_scheduled_render() {
            return;
        }
        if let Some(window) = &self.window {
            window.window().request_redraw();
        }
    }

    fn window_width(&self) -> u32 {
        self.window.as_ref().map_or(0, |w| w.window().inner_size().width)
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(window) = &self.window else {
            return Ok(());
        };

        let size = window.window().inner_size();
        self.surface
            .on_render_requested(window.driver(), None, size.width, size.height)
            .context("failed to render the cube")?;

        window.window().pre_present_notify();
        window.swap_buffers()?;
        window.window().set_title(&self.title());
        Ok(())
    }
}

impl ApplicationHandler<StudioEvent> for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: StudioEvent) {
        match event {
            StudioEvent::RotationQueued => {
                if self.surface.pump_rotation() {
                    self.request_scheduled_render();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close();
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    window.resize();
                    window.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let width = self.window_width();
                let rotation = self.control.cursor_moved(position.x, width);
                self.set_rotation(rotation);
            }

            WindowEvent::CursorLeft { .. } => self.control.cursor_left(),

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let width = self.window_width();
                let rotation = self.control.button(state == ElementState::Pressed, width);
                self.set_rotation(rotation);
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    self.close();
                    event_loop.exit();
                    return;
                }
                let rotation = self.control.key(code, self.surface.rotation());
                self.set_rotation(rotation);
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close();
    }
}
