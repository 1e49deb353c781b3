use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::device::GlDriver;

/// Platform family the context was created on.
///
/// Supplied by the host; the negotiator never inspects the running OS.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PlatformFamily {
    #[default]
    Desktop,
    /// Desktop GL capped at the 3.2 core profile by the OS.
    MacOs,
}

/// Capability descriptor consumed by [`ShaderDialect::negotiate`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DriverCaps {
    pub platform: PlatformFamily,
    /// Raw `GL_VERSION` string.
    pub version: String,
    pub core_profile: bool,
}

impl DriverCaps {
    pub fn new(platform: PlatformFamily, version: impl Into<String>, core_profile: bool) -> Self {
        Self {
            platform,
            version: version.into(),
            core_profile,
        }
    }

    /// Reads the version string and profile flag from the driver.
    pub fn query<D: GlDriver + ?Sized>(gl: &D, platform: PlatformFamily) -> Self {
        Self::new(platform, gl.version_string(), gl.is_core_profile())
    }
}

/// GLSL dialect selected for the running driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderDialect {
    /// GLSL version number as written in the directive (`330`, `300`, `150`...).
    pub glsl: u32,
    pub es: bool,
    pub core: bool,
}

/// Used when the version string has no `major.minor` pair.
const FALLBACK_VERSION: (u32, u32) = (3, 3);

/// Oldest desktop version whose GLSL number follows `major * 100 + minor * 10`.
const MODERN_DESKTOP: (u32, u32) = (3, 3);

/// GLSL 1.50 is the newest dialect every macOS core context accepts.
const MACOS_SAFE_GLSL: u32 = 150;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)").expect("version pattern is valid"));

/// Extracts the first `major.minor` pair from a `GL_VERSION` string.
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let caps = VERSION_RE.captures(version)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    Some((major, minor))
}

impl ShaderDialect {
    /// Picks the `#version` dialect for `caps`.
    ///
    /// Never fails: an unparseable version string falls back to 3.3 (3.0 on
    /// ES, which has no 3.3).
    pub fn negotiate(caps: &DriverCaps) -> Self {
        let es = caps.version.contains("OpenGL ES");
        let parsed = parse_version(&caps.version);
        if parsed.is_none() {
            log::warn!(
                "unrecognized GL_VERSION {:?}; assuming {}.{}",
                caps.version,
                FALLBACK_VERSION.0,
                FALLBACK_VERSION.1
            );
        }

        if es {
            let (major, minor) = parsed.unwrap_or((3, 0));
            let glsl = if major >= 3 { major * 100 + minor * 10 } else { 100 };
            return Self { glsl, es: true, core: false };
        }

        let version = parsed.unwrap_or(FALLBACK_VERSION);
        let glsl = match caps.platform {
            PlatformFamily::MacOs if version < MODERN_DESKTOP => MACOS_SAFE_GLSL,
            _ => desktop_glsl(version),
        };

        Self {
            glsl,
            es: false,
            core: caps.core_profile && glsl >= 150,
        }
    }

    /// The `#version` line, without trailing newline.
    pub fn directive(&self) -> String {
        self.to_string()
    }

    /// Prefixes a GLSL body with the directive.
    pub fn prepend(&self, body: &str) -> String {
        format!("{self}\n{body}")
    }
}

impl fmt::Display for ShaderDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#version {}", self.glsl)?;
        if self.es && self.glsl >= 300 {
            f.write_str(" es")?;
        } else if self.core {
            f.write_str(" core")?;
        }
        Ok(())
    }
}

fn desktop_glsl((major, minor): (u32, u32)) -> u32 {
    match (major, minor) {
        (2, 0) => 110,
        (2, _) => 120,
        (3, 0) => 130,
        (3, 1) => 140,
        (3, 2) => 150,
        (0 | 1, _) => 110,
        _ => major * 100 + minor * 10,
    }
}
