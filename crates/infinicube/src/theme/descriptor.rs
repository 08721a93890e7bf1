//! Theme descriptors
//!
//! A [`ThemeDescriptor`] is a tree of optional sections. Every section, and every
//! leaf inside a section, may be missing; the resolver fills gaps with defaults
//! section by section. Field names follow the camelCase spelling used by theme
//! files (`emissiveIntensity`, `flatShading`, ...).

use serde::{Deserialize, Serialize};

use super::value::AttrValue;

/// Declarative, partially specified visual and animation parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDescriptor {
    /// Geometry parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometrySection>,
    /// Material parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialSection>,
    /// Texture handles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSection>,
    /// Animation behaviors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSection>,
    /// Outline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineSection>,
    /// Particle effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleSection>,
    /// Overrides applied while the cube is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionSection>,
}

/// Geometry section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometrySection {
    /// Per-axis size multiplier `[x, y, z]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<AttrValue>,
    /// Subdivision segments `[x, y, z]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<AttrValue>,
    /// Whether edges are bevelled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bevel_enabled: Option<AttrValue>,
    /// Bevel radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bevel_size: Option<AttrValue>,
}

/// Material section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialSection {
    /// Material type tag
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttrValue>,
    /// Base color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<AttrValue>,
    /// Metalness in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness: Option<AttrValue>,
    /// Roughness in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<AttrValue>,
    /// Opacity in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<AttrValue>,
    /// Alpha blending flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<AttrValue>,
    /// Emissive color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<AttrValue>,
    /// Emissive intensity in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<AttrValue>,
    /// Wireframe rendering flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireframe: Option<AttrValue>,
    /// Flat shading flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_shading: Option<AttrValue>,
}

/// Texture section; handles are opaque to this crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureSection {
    /// Diffuse map handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<AttrValue>,
    /// Normal map handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_map: Option<AttrValue>,
    /// Roughness map handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness_map: Option<AttrValue>,
    /// Metalness map handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness_map: Option<AttrValue>,
    /// Texture repeat `[u, v]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<AttrValue>,
}

/// Animation section with three independent behaviors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSection {
    /// Continuous rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationSection>,
    /// Pulsing scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<PulseSection>,
    /// Vertical float
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float: Option<FloatSection>,
}

/// Rotation behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSection {
    /// Per-frame angle increment `[x, y, z]` in radians
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<AttrValue>,
    /// Must be boolean `true` for the behavior to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<AttrValue>,
}

/// Scale pulse behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseSection {
    /// Smallest scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<AttrValue>,
    /// Largest scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<AttrValue>,
    /// Angular speed of the pulse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<AttrValue>,
    /// Must be boolean `true` for the behavior to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<AttrValue>,
}

/// Float behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatSection {
    /// Vertical amplitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<AttrValue>,
    /// Angular speed of the float
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<AttrValue>,
    /// Must be boolean `true` for the behavior to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<AttrValue>,
}

/// Outline section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSection {
    /// Must be boolean `true` for an outline to be drawn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<AttrValue>,
    /// Outline color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<AttrValue>,
    /// Outline thickness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<AttrValue>,
}

/// Particle section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSection {
    /// Must be boolean `true` for particles to be emitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<AttrValue>,
    /// Particle count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<AttrValue>,
    /// Particle color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<AttrValue>,
    /// Particle size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<AttrValue>,
    /// Particle speed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<AttrValue>,
}

/// Overrides applied while the cube is selected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionSection {
    /// Emissive tint; the cube's own color when missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_color: Option<AttrValue>,
    /// Emissive intensity in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<AttrValue>,
    /// Scale the cube eases toward while selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<AttrValue>,
    /// Outline color while selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<AttrValue>,
    /// Outline thickness while selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_thickness: Option<AttrValue>,
}

/// How a cube refers to its theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeRef {
    /// Name of a preset; unknown names resolve to the default preset
    Preset(String),
    /// Descriptor carried by the cube itself
    Inline(Box<ThemeDescriptor>),
}

impl ThemeRef {
    /// Reference a preset by name
    pub fn preset(name: impl Into<String>) -> Self {
        Self::Preset(name.into())
    }

    /// Carry an inline descriptor
    pub fn inline(descriptor: ThemeDescriptor) -> Self {
        Self::Inline(Box::new(descriptor))
    }
}

impl From<&str> for ThemeRef {
    fn from(name: &str) -> Self {
        Self::preset(name)
    }
}

impl From<String> for ThemeRef {
    fn from(name: String) -> Self {
        Self::Preset(name)
    }
}

impl From<ThemeDescriptor> for ThemeRef {
    fn from(descriptor: ThemeDescriptor) -> Self {
        Self::inline(descriptor)
    }
}
