use serde::{Deserialize, Serialize};

use crate::foundation::error::{PollockError, PollockResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Largest edge the raster engine can address (`vello_cpu` surfaces are `u16`-sized).
pub const MAX_SURFACE_EDGE: u32 = u16::MAX as u32;

/// Pixel dimensions of an image or surface. Always at least 1x1 once constructed via [`Size::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Validated size; both edges must be non-zero.
    pub fn new(width: u32, height: u32) -> PollockResult<Self> {
        if width == 0 || height == 0 {
            return Err(PollockError::validation(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// `max(width, height)`.
    pub fn longer_edge(self) -> u32 {
        self.width.max(self.height)
    }

    /// Proportionally shrink so the longer edge equals `max_edge`.
    ///
    /// Sizes already within the bound pass through unchanged; the shorter edge is
    /// rounded to nearest and never drops below 1.
    pub fn fit_within(self, max_edge: u32) -> Self {
        let longer = self.longer_edge();
        if max_edge == 0 || longer <= max_edge {
            return self;
        }
        let scale = f64::from(max_edge) / f64::from(longer);
        let shrink = |v: u32| -> u32 {
            if v == longer {
                max_edge
            } else {
                ((f64::from(v) * scale).round() as u32).clamp(1, max_edge)
            }
        };
        Self {
            width: shrink(self.width),
            height: shrink(self.height),
        }
    }

    /// Dimensions as the raster engine's `u16` pair.
    pub fn to_u16(self) -> PollockResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| PollockError::validation("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| PollockError::validation("surface height exceeds u16"))?;
        Ok((w, h))
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serializes as `#RRGGBBAA` and accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default background.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color from `[r, g, b, a]`.
    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`; the `#` is optional.
    pub fn parse_hex(s: &str) -> PollockResult<Self> {
        parse_hex(s).map_err(PollockError::validation)
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            let nib = |i: usize| hex_byte(&s[i..i + 1]).map(|v| v * 17);
            Ok(Rgba8::new(nib(0)?, nib(1)?, nib(2)?, 255))
        }
        6 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
