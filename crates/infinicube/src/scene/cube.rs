//! Cube data model
//!
//! A [`Cube`] is the canonical record kept by the store. Everything the store
//! hands out is a clone, so editing a returned cube never changes the scene.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::math::Vec3;
use crate::theme::ThemeRef;

/// Opaque cube identifier, unique within a store and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeId(String);

impl CubeId {
    /// Wrap an identifier, e.g. one reported by an input layer
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CubeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Edge length of a cube, uniform or per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CubeSize {
    /// Same length on every axis
    Uniform(f32),
    /// Length per axis `[x, y, z]`
    PerAxis([f32; 3]),
}

impl CubeSize {
    /// Per-axis lengths
    pub fn to_vec3(&self) -> Vec3 {
        match *self {
            Self::Uniform(s) => Vec3::new(s, s, s),
            Self::PerAxis([x, y, z]) => Vec3::new(x, y, z),
        }
    }

    /// Replace every length that is not finite and positive with 1
    pub fn sanitized(self) -> Self {
        let fix = |s: f32| if s.is_finite() && s > 0.0 { s } else { 1.0 };
        match self {
            Self::Uniform(s) => Self::Uniform(fix(s)),
            Self::PerAxis(axes) => Self::PerAxis(axes.map(fix)),
        }
    }

    /// Whether every length is finite and positive
    pub fn is_valid(&self) -> bool {
        *self == self.sanitized()
    }
}

impl Default for CubeSize {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl From<f32> for CubeSize {
    fn from(size: f32) -> Self {
        Self::Uniform(size)
    }
}

impl From<[f32; 3]> for CubeSize {
    fn from(axes: [f32; 3]) -> Self {
        Self::PerAxis(axes)
    }
}

/// A positioned, themeable cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Identifier assigned at creation
    pub id: CubeId,
    /// Position in world space
    pub position: Vec3,
    /// Edge length
    #[serde(default)]
    pub size: CubeSize,
    /// Base color; a malformed color in a scene file becomes [`Color::FALLBACK`]
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: Color,
    /// Theme reference; the default preset when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeRef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseColor {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let parsed = match LooseColor::deserialize(deserializer)? {
        LooseColor::Text(text) => Color::parse(&text).ok_or(text),
        LooseColor::Other(_) => Err(String::from("<non-string>")),
    };
    Ok(parsed.unwrap_or_else(|text| {
        log::warn!("Invalid cube color {text:?}, using {}", Color::FALLBACK);
        Color::FALLBACK
    }))
}

impl Cube {
    /// Create a cube with default size, fallback color and no theme
    pub fn new(id: impl Into<CubeId>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            size: CubeSize::default(),
            color: Color::FALLBACK,
            theme: None,
        }
    }
}

impl From<String> for CubeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Optional settings for a new cube
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubeOptions {
    /// Color text; a random color is generated when missing
    pub color: Option<String>,
    /// Size; 1 when missing
    pub size: Option<CubeSize>,
    /// Theme reference
    pub theme: Option<ThemeRef>,
}

impl CubeOptions {
    /// No options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color text (validated by the store)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size
    pub fn size(mut self, size: impl Into<CubeSize>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the theme
    pub fn theme(mut self, theme: impl Into<ThemeRef>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

/// Partial change to an existing cube
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubeUpdate {
    /// New position
    pub position: Option<Vec3>,
    /// New color text (validated by the store)
    pub color: Option<String>,
    /// New size
    pub size: Option<CubeSize>,
    /// New theme; `Some(None)` removes the theme
    pub theme: Option<Option<ThemeRef>>,
}

impl CubeUpdate {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cube
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Recolor the cube
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Resize the cube
    pub fn size(mut self, size: impl Into<CubeSize>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Change the theme
    pub fn theme(mut self, theme: impl Into<ThemeRef>) -> Self {
        self.theme = Some(Some(theme.into()));
        self
    }

    /// Go back to the default preset
    pub fn clear_theme(mut self) -> Self {
        self.theme = Some(None);
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.color.is_none() && self.size.is_none() && self.theme.is_none()
    }
}
