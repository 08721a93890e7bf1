//! Resolved, renderer-safe attributes
//!
//! Everything in here has already been validated. A renderer can consume these
//! values without further checks.

use serde::{Deserialize, Serialize};

use super::error::ThemeError;
use crate::foundation::color::Color;
use crate::foundation::math::{Vec2, Vec3};

/// Closed set of material types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Physically based, metalness/roughness workflow
    #[default]
    Standard,
    /// Unlit
    Basic,
    /// Extended physically based
    Physical,
    /// Blinn-Phong
    Phong,
    /// Lambertian
    Lambert,
}

impl MaterialKind {
    /// Parse a type tag; `None` for anything outside the closed set
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "standard" => Some(Self::Standard),
            "basic" => Some(Self::Basic),
            "physical" => Some(Self::Physical),
            "phong" => Some(Self::Phong),
            "lambert" => Some(Self::Lambert),
            _ => None,
        }
    }

    /// The type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Basic => "basic",
            Self::Physical => "physical",
            Self::Phong => "phong",
            Self::Lambert => "lambert",
        }
    }
}

/// Final box geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryAttributes {
    /// Edge lengths per axis
    pub dimensions: Vec3,
    /// Subdivisions per axis, each at least 1
    pub segments: [u32; 3],
    /// Bevel radius when bevelling is enabled
    pub bevel: Option<f32>,
}

/// Final material description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialAttributes {
    /// Material type
    pub kind: MaterialKind,
    /// Base color
    pub color: Color,
    /// Metalness in [0, 1]
    pub metalness: f32,
    /// Roughness in [0, 1]
    pub roughness: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Alpha blending; always on when `opacity < 1`
    pub transparent: bool,
    /// Emissive color
    pub emissive: Color,
    /// Emissive intensity in [0, 1]
    pub emissive_intensity: f32,
    /// Wireframe rendering
    pub wireframe: bool,
    /// Flat shading
    pub flat_shading: bool,
}

impl MaterialAttributes {
    /// Minimal material used when assembly fails
    pub fn safe_default(color: Color) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            wireframe: false,
            flat_shading: false,
        }
    }

    /// Check every invariant the renderer relies on
    pub fn validate(&self) -> Result<(), ThemeError> {
        let bounded = [
            ("metalness", self.metalness),
            ("roughness", self.roughness),
            ("opacity", self.opacity),
            ("emissiveIntensity", self.emissive_intensity),
        ];
        for (field, value) in bounded {
            if !(0.0..=1.0).contains(&value) {
                return Err(ThemeError::OutOfRange { field, value });
            }
        }
        if self.opacity < 1.0 && !self.transparent {
            return Err(ThemeError::OpaqueWithPartialAlpha { opacity: self.opacity });
        }
        Ok(())
    }
}

/// Opaque texture handles
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAttributes {
    /// Diffuse map
    pub map: Option<String>,
    /// Normal map
    pub normal_map: Option<String>,
    /// Roughness map
    pub roughness_map: Option<String>,
    /// Metalness map
    pub metalness_map: Option<String>,
    /// Repeat factors, each > 0
    pub repeat: Vec2,
}

/// Outline to draw around the cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineAttributes {
    /// Outline color
    pub color: Color,
    /// Line thickness, >= 0
    pub thickness: f32,
}

/// Particle effect parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleAttributes {
    /// Number of particles
    pub count: u32,
    /// Particle color
    pub color: Color,
    /// Particle size, >= 0
    pub size: f32,
    /// Particle speed, >= 0
    pub speed: f32,
}

/// Scale pulse parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseParams {
    /// Smallest scale
    pub min: f32,
    /// Largest scale
    pub max: f32,
    /// Angular speed
    pub speed: f32,
}

/// Float parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    /// Vertical amplitude
    pub amplitude: f32,
    /// Angular speed
    pub speed: f32,
}

/// Active animation behaviors; a `None` behavior is disabled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationAttributes {
    /// Per-frame rotation increment
    pub rotation: Option<Vec3>,
    /// Scale pulse
    pub pulse: Option<PulseParams>,
    /// Vertical float
    pub float: Option<FloatParams>,
    /// Scale target while selected; only set for selected cubes
    pub selection_scale: Option<f32>,
}

impl AnimationAttributes {
    /// Whether any behavior changes the transform
    pub fn is_static(&self) -> bool {
        self.rotation.is_none()
            && self.pulse.is_none()
            && self.float.is_none()
            && self.selection_scale.is_none()
    }
}

/// Everything the renderer needs for one cube
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    /// Geometry
    pub geometry: GeometryAttributes,
    /// Material
    pub material: MaterialAttributes,
    /// Textures, when any handle is set
    pub texture: Option<TextureAttributes>,
    /// Outline, when enabled
    pub outline: Option<OutlineAttributes>,
    /// Particles, when enabled
    pub particles: Option<ParticleAttributes>,
    /// Animation behaviors
    pub animation: AnimationAttributes,
}
