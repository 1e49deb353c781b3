mod context;
mod input;
mod runtime;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use cubeview_engine::coords::ColorRgba;
use cubeview_engine::logging::{init_logging, LoggingConfig};
use cubeview_engine::shader::PlatformFamily;
use cubeview_engine::surface::{CubeSurface, SurfaceConfig};

use runtime::{Runtime, RuntimeConfig};

/// Orbiting vertex-colored cube in an OpenGL window.
///
/// Drag with the left mouse button or use the arrow keys to rotate.
#[derive(Debug, Parser)]
#[command(name = "cubeview-studio", version)]
struct Args {
    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Clear color as RRGGBB or RRGGBBAA (default: dim gray).
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    background: Option<ColorRgba>,

    /// Initial rotation in radians.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,

    /// Rotate continuously at this many radians per second.
    #[arg(long, value_name = "RAD_PER_SEC", allow_negative_numbers = true)]
    spin: Option<f64>,

    /// Log filter in `env_logger` syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Present without waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,
}

fn parse_color(text: &str) -> Result<ColorRgba, String> {
    ColorRgba::from_hex(text).ok_or_else(|| format!("expected RRGGBB or RRGGBBAA, got {text:?}"))
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: LogicalSize::new(f64::from(self.width), f64::from(self.height)),
            vsync: !self.no_vsync,
            ..RuntimeConfig::default()
        }
    }

    fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            background: self.background.unwrap_or(ColorRgba::DIM_GRAY),
            ..SurfaceConfig::default()
        }
    }
}

fn platform() -> PlatformFamily {
    if cfg!(target_os = "macos") {
        PlatformFamily::MacOs
    } else {
        PlatformFamily::Desktop
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let mut surface = CubeSurface::with_config(platform(), args.surface_config());
    surface.set_rotation(args.rotation);
    log::info!("starting with background {}", surface.background());

    Runtime::run(args.runtime_config(), surface, args.spin)
}
