//! # Infinicube Configuration
//!
//! Top-level settings for a cube scene, loadable from TOML or RON through the
//! [`Config`] trait. Every section defaults when absent, so an empty file is a
//! valid configuration.
//!
//! ## Sections
//!
//! - **store**: fallback color and default cube size
//! - **animation**: selection easing factor
//! - **logging**: log level used when `RUST_LOG` is not set
//! - **themes**: custom presets, added next to the built-in ones
//! - **cubes**: cubes present when the scene starts

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::animation::{Animator, SELECTION_DAMPING};
use crate::config::{Config, ConfigError};
use crate::foundation::color::Color;
use crate::scene::{Cube, CubeStore, StoreConfig};
use crate::theme::{PresetTable, ThemeDescriptor, ThemeLibrary, ThemeResolver};

/// Store defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Color substituted for malformed cube colors
    pub fallback_color: String,
    /// Cube size used when none is given
    pub default_size: f32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            fallback_color: Color::FALLBACK.to_hex(),
            default_size: 1.0,
        }
    }
}

/// Animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Fraction of the remaining distance covered per frame when easing scale
    pub selection_damping: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            selection_damping: SELECTION_DAMPING,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfinicubeConfig {
    /// Store defaults
    pub store: StoreSettings,
    /// Animation settings
    pub animation: AnimationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Custom theme presets by name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub themes: BTreeMap<String, ThemeDescriptor>,
    /// Initial cubes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cubes: Vec<Cube>,
}

impl InfinicubeConfig {
    /// Check every setting, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Color::parse(&self.store.fallback_color).is_none() {
            return Err(ConfigError::Invalid(format!(
                "store.fallback_color {:?} is not a hex color",
                self.store.fallback_color
            )));
        }
        let size = self.store.default_size;
        if !(size.is_finite() && size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "store.default_size must be positive, got {size}"
            )));
        }
        let damping = self.animation.selection_damping;
        if !(damping.is_finite() && damping > 0.0 && damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "animation.selection_damping must be in (0, 1], got {damping}"
            )));
        }
        for name in self.themes.keys() {
            if name.trim().is_empty() || PresetTable::builtin().contains(name) {
                return Err(ConfigError::Invalid(format!(
                    "theme name {name:?} is empty or shadows a built-in preset"
                )));
            }
        }
        let mut ids = HashSet::new();
        for cube in &self.cubes {
            if !ids.insert(&cube.id) {
                return Err(ConfigError::Invalid(format!("duplicate cube id {}", cube.id)));
            }
        }
        Ok(())
    }

    /// Store defaults; an unparsable fallback color becomes the built-in one
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            fallback_color: Color::parse_or(&self.store.fallback_color, Color::FALLBACK),
            default_size: self.store.default_size,
        }
    }

    /// Theme library with the configured custom presets
    pub fn theme_library(&self) -> Result<ThemeLibrary, ConfigError> {
        let mut library = ThemeLibrary::new();
        for (name, descriptor) in &self.themes {
            library.register(name.clone(), descriptor.clone())?;
        }
        Ok(library)
    }

    /// Resolver over the configured library
    pub fn resolver(&self) -> Result<ThemeResolver, ConfigError> {
        Ok(ThemeResolver::with_library(self.theme_library()?)
            .with_fallback_color(self.store_config().fallback_color))
    }

    /// Animator with the configured easing
    pub fn animator(&self) -> Animator {
        Animator::new(self.animation.selection_damping)
    }

    /// Store holding the configured initial cubes
    pub fn build_store(&self) -> CubeStore {
        CubeStore::with_cubes(self.store_config(), self.cubes.iter().cloned())
    }
}

impl Config for InfinicubeConfig {}
