//! Hex colors
//!
//! Colors travel through the scene as `#rrggbb` strings. [`Color`] is the parsed,
//! always-valid form; anything that fails to parse never becomes a `Color`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::math::Vec3;

/// An 8-bit RGBA color that is known to be well formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

/// Error returned when a string is not a `#`-prefixed hex color
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("not a hex color: {0:?}")]
pub struct ColorParseError(pub String);

impl Color {
    /// Color used whenever no valid color is available
    pub const FALLBACK: Self = Self::rgb(0x3b, 0x82, 0xf6);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 | 4 => {
                let expand = |n: u8| n * 0x11;
                let a = if digits.len() == 4 { expand(nibble(3)?) } else { 0xff };
                Some(Self { r: expand(nibble(0)?), g: expand(nibble(1)?), b: expand(nibble(2)?), a })
            }
            6 | 8 => {
                let a = if digits.len() == 8 { byte(6)? } else { 0xff };
                Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
            }
            _ => None,
        }
    }

    /// Parse `text`, substituting `fallback` when it is malformed
    pub fn parse_or(text: &str, fallback: Self) -> Self {
        Self::parse(text).unwrap_or(fallback)
    }

    /// A random opaque color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u32 = rng.gen_range(0..=0x00ff_ffff);
        let [_, r, g, b] = value.to_be_bytes();
        Self::rgb(r, g, b)
    }

    /// Lowercase hex form; alpha is only written when not opaque
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Linear 0..1 RGB components for the renderer
    pub fn to_rgb(&self) -> Vec3 {
        Vec3::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Alpha as 0..1
    pub fn alpha(&self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
