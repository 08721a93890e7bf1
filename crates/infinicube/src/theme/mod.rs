//! Theme descriptors, presets and resolution
//!
//! Descriptors are loosely typed on purpose at the leaves ([`AttrValue`]) so
//! that wrongly typed input survives parsing and is rejected field by field
//! during resolution instead of failing the whole theme.

pub mod attributes;
pub mod descriptor;
pub mod error;
pub mod library;
pub mod presets;
pub mod resolver;
pub mod sanitize;
pub mod value;

pub use attributes::{
    AnimationAttributes, FloatParams, GeometryAttributes, MaterialAttributes, MaterialKind,
    OutlineAttributes, ParticleAttributes, PulseParams, ResolvedAttributes, TextureAttributes,
};
pub use descriptor::{
    AnimationSection, FloatSection, GeometrySection, MaterialSection, OutlineSection,
    ParticleSection, PulseSection, RotationSection, SelectionSection, TextureSection,
    ThemeDescriptor, ThemeRef,
};
pub use error::ThemeError;
pub use library::ThemeLibrary;
pub use presets::{preset, PresetTable, BUILTIN_PRESETS, DEFAULT_PRESET};
pub use resolver::{ObjectBase, ThemeResolver};
pub use value::AttrValue;
