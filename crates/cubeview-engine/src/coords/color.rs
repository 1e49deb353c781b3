use std::fmt;

/// Normalization factor between 8-bit host channels and normalized channels.
const CHANNEL_MAX: f32 = 255.0;

/// Normalized RGBA color.
///
/// Channels are straight (non-premultiplied) and expected in `[0, 1]`. Hosts
/// usually hand out 8-bit channels; convert with [`ColorRgba::from_bytes`] and
/// [`ColorRgba::to_bytes`] rather than casting.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    /// Opaque (105, 105, 105) gray; the surface default background.
    pub const DIM_GRAY: Self =
        Self::new(105.0 / CHANNEL_MAX, 105.0 / CHANNEL_MAX, 105.0 / CHANNEL_MAX, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels, dividing each by 255 exactly once.
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let [r, g, b, a] = bytes;
        Self::new(
            f32::from(r) / CHANNEL_MAX,
            f32::from(g) / CHANNEL_MAX,
            f32::from(b) / CHANNEL_MAX,
            f32::from(a) / CHANNEL_MAX,
        )
    }

    /// Converts back to 8-bit channels.
    ///
    /// Each channel is scaled by 255, rounded to nearest and clamped to
    /// `0..=255`, so `from_bytes(x).to_bytes() == x`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.a),
        ]
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
    ///
    /// A missing alpha pair means opaque.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }

        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let alpha = if hex.len() == 8 { pair(6)? } else { u8::MAX };
        Some(Self::from_bytes([pair(0)?, pair(2)?, pair(4)?, alpha]))
    }
}

#[inline]
fn channel_to_byte(v: f32) -> u8 {
    // NaN clamps to 0 through the saturating float-to-int cast.
    (v * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u8
}

impl From<[u8; 4]> for ColorRgba {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorRgba({}, {}, {}, {}) -> RGBA", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── bytes ─────────────────────────────────────────────────────────────

    #[test]
    fn byte_round_trip_every_channel_value() {
        for v in 0..=u8::MAX {
            let bytes = [v, u8::MAX - v, v / 2, v];
            assert_eq!(ColorRgba::from_bytes(bytes).to_bytes(), bytes, "value {v}");
        }
    }

    #[test]
    fn from_bytes_normalizes_once() {
        let c = ColorRgba::from_bytes([255, 0, 51, 255]);
        assert_eq!(c, ColorRgba::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn to_bytes_clamps_out_of_range() {
        let c = ColorRgba::new(1.5, -0.25, f32::NAN, 0.5);
        assert_eq!(c.to_bytes(), [255, 0, 0, 128]);
    }

    #[test]
    fn dim_gray_matches_host_bytes() {
        assert_eq!(ColorRgba::DIM_GRAY.to_bytes(), [105, 105, 105, 255]);
    }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn from_hex_rgb_is_opaque() {
        let c = ColorRgba::from_hex("#696969").unwrap();
        assert_eq!(c.to_bytes(), [105, 105, 105, 255]);
    }

    #[test]
    fn from_hex_rgba() {
        let c = ColorRgba::from_hex("ff000080").unwrap();
        assert_eq!(c.to_bytes(), [255, 0, 0, 128]);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(ColorRgba::from_hex("").is_none());
        assert!(ColorRgba::from_hex("#12345").is_none());
        assert!(ColorRgba::from_hex("zzzzzz").is_none());
        assert!(ColorRgba::from_hex("ééé").is_none());
    }

    // ── display ───────────────────────────────────────────────────────────

    #[test]
    fn display_lists_channels() {
        let c = ColorRgba::new(1.0, 0.5, 0.0, 1.0);
        assert_eq!(c.to_string(), "ColorRgba(1, 0.5, 0, 1) -> RGBA");
    }
}
