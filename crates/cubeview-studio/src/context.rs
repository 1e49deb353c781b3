use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, NotCurrentGlContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface as _, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use cubeview_engine::device::GlowDriver;

use crate::runtime::RuntimeConfig;

/// Window plus a current GL context and its window surface.
///
/// Field order is drop order: the loader goes first, the window last.
pub struct GlWindow {
    driver: GlowDriver,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindow {
    /// Opens the window and makes a GL context current on this thread.
    ///
    /// Asks for a 3.3 core context first, then GLES 3.0, then whatever the
    /// display offers.
    pub fn create(event_loop: &ActiveEventLoop, config: &RuntimeConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to find a GL config: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let gl_display = gl_config.display();
        let not_current = create_context(&gl_display, &gl_config, raw_handle)?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create the window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("swap interval not applied: {e}");
        }

        // SAFETY: the context was made current above and stays current on this
        // thread for the lifetime of `GlWindow`.
        let driver = unsafe {
            GlowDriver::new(glow::Context::from_loader_function_cstr(|name| {
                gl_display.get_proc_address(name)
            }))
        };

        Ok(Self {
            driver,
            surface,
            context,
            window,
        })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn driver(&self) -> &GlowDriver {
        &self.driver
    }

    /// Matches the surface to the window's inner size; zero sizes are skipped.
    pub fn resize(&self) {
        self.window.resize_surface(&self.surface, &self.context);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to present the frame")
    }
}

/// Prefers the config with the deepest depth buffer.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, candidate| {
            if candidate.depth_size() > best.depth_size() {
                candidate
            } else {
                best
            }
        })
        // glutin only calls the picker with a non-empty set of configs.
        .expect("glutin reports at least one matching config")
}

fn create_context(
    display: &Display,
    config: &Config,
    raw_handle: RawWindowHandle,
) -> Result<NotCurrentContext> {
    let attempts = [
        (
            "OpenGL 3.3 core",
            ContextAttributesBuilder::new()
                .with_profile(GlProfile::Core)
                .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
                .build(Some(raw_handle)),
        ),
        (
            "OpenGL ES 3.0",
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
                .build(Some(raw_handle)),
        ),
        ("default", ContextAttributesBuilder::new().build(Some(raw_handle))),
    ];

    let mut last_error = None;
    for (label, attrs) in attempts {
        match unsafe { display.create_context(config, &attrs) } {
            Ok(context) => {
                log::info!("created {label} context");
                return Ok(context);
            }
            Err(e) => {
                log::debug!("{label} context unavailable: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => anyhow::Error::new(e).context("no GL context could be created"),
        None => anyhow!("no GL context could be created"),
    })
}
