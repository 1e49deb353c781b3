use crate::coords::{ColorRgba, Viewport};
use crate::device::{check, GlDriver};
use crate::error::{RenderError, Result};
use crate::mesh::MeshData;
use crate::render::{CameraConfig, GpuResources};
use crate::shader::{DriverCaps, PlatformFamily, ShaderDialect};

use super::{GlSurface, RotationHandle, RotationInput, SurfaceConfig, SurfaceState};

/// Orbiting-camera view of the colored cube.
pub struct CubeSurface<D: GlDriver> {
    state: SurfaceState,
    platform: PlatformFamily,
    config: SurfaceConfig,
    rotation: RotationInput,
    dialect: Option<ShaderDialect>,
    resources: GpuResources<D>,
}

impl<D: GlDriver> CubeSurface<D> {
    pub fn new(platform: PlatformFamily) -> Self {
        Self::with_config(platform, SurfaceConfig::default())
    }

    pub fn with_config(platform: PlatformFamily, config: SurfaceConfig) -> Self {
        Self {
            state: SurfaceState::Uninitialized,
            platform,
            config,
            rotation: RotationInput::default(),
            dialect: None,
            resources: GpuResources::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Dialect picked at init; `None` before a successful init.
    #[inline]
    pub fn dialect(&self) -> Option<ShaderDialect> {
        self.dialect
    }

    #[inline]
    pub fn camera(&self) -> &CameraConfig {
        &self.config.camera
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation.value()
    }

    /// Sets the rotation in radians; returns whether a render was scheduled.
    pub fn set_rotation(&mut self, radians: f64) -> bool {
        self.rotation.set(radians)
    }

    /// Sender for rotation values produced off the render thread.
    pub fn rotation_handle(&self) -> RotationHandle {
        self.rotation.handle()
    }

    /// Applies queued [`RotationHandle`] values; returns whether any changed the rotation.
    pub fn pump_rotation(&mut self) -> bool {
        self.rotation.pump() > 0
    }

    /// Returns `true` once per rotation change since the last call or frame.
    pub fn take_scheduled_render(&mut self) -> bool {
        self.rotation.take_scheduled()
    }

    // ── background ────────────────────────────────────────────────────────

    #[inline]
    pub fn background(&self) -> ColorRgba {
        self.config.background
    }

    /// Clear color used from the next frame on.
    pub fn set_background(&mut self, color: ColorRgba) {
        self.config.background = color;
    }

    pub fn set_background_bytes(&mut self, rgba: [u8; 4]) {
        self.set_background(ColorRgba::from_bytes(rgba));
    }

    // ── lifecycle internals ───────────────────────────────────────────────

    fn reject(&self, op: &'static str) -> RenderError {
        log::warn!("{op} ignored: surface is {:?}", self.state);
        RenderError::InvalidState { op, state: self.state }
    }

    fn fault(&mut self, err: RenderError) -> RenderError {
        log::error!("cube surface faulted: {err}");
        self.state = SurfaceState::Faulted;
        err
    }

    fn build(&mut self, gl: &D) -> Result<()> {
        let caps = DriverCaps::query(gl, self.platform);
        let dialect = ShaderDialect::negotiate(&caps);
        log::info!("GL version {:?}, shader dialect {dialect}", caps.version);

        self.resources.build_program(gl, dialect)?;
        self.resources.initialize(gl, MeshData::cube())?;

        gl.enable_depth_test();
        check(gl, "enable depth test")?;

        self.dialect = Some(dialect);
        Ok(())
    }

    fn draw_frame(
        &mut self,
        gl: &D,
        framebuffer: Option<D::Framebuffer>,
        viewport: Viewport,
    ) -> Result<()> {
        gl.bind_framebuffer(framebuffer);
        check(gl, "bind host framebuffer")?;
        gl.viewport(viewport);
        check(gl, "set viewport")?;

        let transforms = self.config.camera.transforms(self.rotation.value(), viewport);

        gl.clear_color(self.config.background);
        check(gl, "set clear color")?;
        gl.clear_color_and_depth();
        check(gl, "clear color and depth")?;

        self.resources.bind_for_draw(gl)?;
        self.resources.upload_transforms(gl, &transforms)?;
        self.resources.draw(gl)
    }
}

impl<D: GlDriver> GlSurface<D> for CubeSurface<D> {
    fn on_context_init(&mut self, gl: &D) -> Result<()> {
        if self.state != SurfaceState::Uninitialized {
            return Err(self.reject("context init"));
        }

        match self.build(gl) {
            Ok(()) => {
                self.state = SurfaceState::Ready;
                log::debug!("cube surface ready");
                Ok(())
            }
            Err(err) => Err(self.fault(err)),
        }
    }

    fn on_context_deinit(&mut self, gl: &D) {
        if self.state == SurfaceState::TornDown {
            return;
        }
        self.resources.teardown(gl);
        self.dialect = None;
        self.state = SurfaceState::TornDown;
    }

    fn on_render_requested(
        &mut self,
        gl: &D,
        framebuffer: Option<D::Framebuffer>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if !self.state.can_render() {
            return Err(self.reject("render"));
        }

        match self.draw_frame(gl, framebuffer, Viewport::new(width, height)) {
            Ok(()) => {
                self.state = SurfaceState::Rendering;
                // The frame shows the latest rotation.
                self.rotation.take_scheduled();
                Ok(())
            }
            Err(err) => Err(self.fault(err)),
        }
    }
}
