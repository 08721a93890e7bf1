//! Theme errors
//!
//! None of these reach the per-frame caller: material assembly failures collapse
//! to a safe material inside the resolver. They surface only from the theme
//! library when registering presets.

/// Errors raised while building theme output
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// A numeric attribute left its allowed range
    #[error("attribute `{field}` out of range: {value}")]
    OutOfRange {
        /// Attribute name
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Partial opacity without transparency enabled
    #[error("opacity {opacity} requires transparency")]
    OpaqueWithPartialAlpha {
        /// Opacity that was below 1
        opacity: f32,
    },

    /// A custom preset tried to replace a built-in one
    #[error("preset name `{0}` is reserved by a built-in preset")]
    ReservedPresetName(String),

    /// A custom preset name was empty
    #[error("preset name must not be empty")]
    EmptyPresetName,
}
