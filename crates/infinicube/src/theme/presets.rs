//! Built-in theme presets
//!
//! The table is built once and shared. Lookups never fail: an unknown name gets
//! the `default` preset.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::descriptor::{
    AnimationSection, FloatSection, GeometrySection, MaterialSection, OutlineSection,
    PulseSection, RotationSection, SelectionSection, ThemeDescriptor,
};
use super::value::AttrValue;

/// Name of the preset used for missing or unknown theme references
pub const DEFAULT_PRESET: &str = "default";

/// Names of all built-in presets
pub const BUILTIN_PRESETS: [&str; 8] =
    ["default", "metal", "glass", "neon", "wood", "crystal", "fire", "ice"];

fn some(value: impl Into<AttrValue>) -> Option<AttrValue> {
    Some(value.into())
}

/// Fixed name-to-descriptor table
#[derive(Debug, Clone)]
pub struct PresetTable {
    presets: HashMap<&'static str, ThemeDescriptor>,
    default: ThemeDescriptor,
}

impl PresetTable {
    /// The process-wide built-in table
    pub fn builtin() -> &'static Self {
        static TABLE: OnceLock<PresetTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    fn build() -> Self {
        let presets = BUILTIN_PRESETS
            .iter()
            .map(|&name| (name, build_preset(name)))
            .collect();
        Self {
            presets,
            default: build_preset(DEFAULT_PRESET),
        }
    }

    /// Look up a preset, falling back to `default`
    pub fn get(&self, name: &str) -> &ThemeDescriptor {
        self.find(name).unwrap_or(&self.default)
    }

    /// Look up a preset without fallback
    pub fn find(&self, name: &str) -> Option<&ThemeDescriptor> {
        self.presets.get(name)
    }

    /// Whether `name` is a built-in preset
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// The `default` preset
    pub fn default_preset(&self) -> &ThemeDescriptor {
        &self.default
    }
}

/// Look up a built-in preset by name, falling back to `default`
pub fn preset(name: &str) -> &'static ThemeDescriptor {
    PresetTable::builtin().get(name)
}

fn build_preset(name: &str) -> ThemeDescriptor {
    match name {
        "metal" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("physical"),
                metalness: some(0.9),
                roughness: some(0.1),
                color: some("#c0c0c0"),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#ffd700"),
                emissive_intensity: some(0.5),
                scale: some(1.1),
                ..Default::default()
            }),
            ..Default::default()
        },
        "glass" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("physical"),
                metalness: some(0.0),
                roughness: some(0.0),
                opacity: some(0.3),
                transparent: some(true),
                color: some("#87ceeb"),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#00ffff"),
                emissive_intensity: some(0.6),
                ..Default::default()
            }),
            ..Default::default()
        },
        "neon" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("basic"),
                color: some("#ff00ff"),
                emissive: some("#ff00ff"),
                emissive_intensity: some(0.5),
                ..Default::default()
            }),
            outline: Some(OutlineSection {
                enabled: some(true),
                color: some("#ff00ff"),
                thickness: some(2.0),
            }),
            animation: Some(AnimationSection {
                rotation: Some(RotationSection {
                    speed: some([0.0, 0.01, 0.0]),
                    enabled: some(true),
                }),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_intensity: some(1.0),
                scale: some(1.2),
                ..Default::default()
            }),
            ..Default::default()
        },
        "wood" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("standard"),
                color: some("#8b4513"),
                metalness: some(0.0),
                roughness: some(0.8),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#ffa500"),
                emissive_intensity: some(0.4),
                ..Default::default()
            }),
            ..Default::default()
        },
        "crystal" => ThemeDescriptor {
            geometry: Some(GeometrySection {
                segments: some([8, 8, 8]),
                ..Default::default()
            }),
            material: Some(MaterialSection {
                kind: some("physical"),
                color: some("#e6e6fa"),
                metalness: some(0.0),
                roughness: some(0.0),
                opacity: some(0.8),
                transparent: some(true),
                ..Default::default()
            }),
            animation: Some(AnimationSection {
                rotation: Some(RotationSection {
                    speed: some([0.005, 0.01, 0.005]),
                    enabled: some(true),
                }),
                float: Some(FloatSection {
                    amplitude: some(0.2),
                    speed: some(2.0),
                    enabled: some(true),
                }),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#9400d3"),
                emissive_intensity: some(0.7),
                ..Default::default()
            }),
            ..Default::default()
        },
        "fire" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("standard"),
                color: some("#ff4500"),
                emissive: some("#ff6600"),
                emissive_intensity: some(0.3),
                ..Default::default()
            }),
            animation: Some(AnimationSection {
                scale: Some(PulseSection {
                    min: some(0.9),
                    max: some(1.1),
                    speed: some(3.0),
                    enabled: some(true),
                }),
                float: Some(FloatSection {
                    amplitude: some(0.1),
                    speed: some(4.0),
                    enabled: some(true),
                }),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#ffff00"),
                emissive_intensity: some(0.8),
                ..Default::default()
            }),
            ..Default::default()
        },
        "ice" => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("physical"),
                color: some("#b0e0e6"),
                metalness: some(0.0),
                roughness: some(0.1),
                opacity: some(0.7),
                transparent: some(true),
                ..Default::default()
            }),
            outline: Some(OutlineSection {
                enabled: some(true),
                color: some("#87cefa"),
                thickness: some(1.0),
            }),
            selection: Some(SelectionSection {
                emissive_color: some("#00bfff"),
                emissive_intensity: some(0.5),
                ..Default::default()
            }),
            ..Default::default()
        },
        _ => ThemeDescriptor {
            material: Some(MaterialSection {
                kind: some("standard"),
                metalness: some(0.1),
                roughness: some(0.5),
                emissive: some("#000000"),
                emissive_intensity: some(0.0),
                ..Default::default()
            }),
            selection: Some(SelectionSection {
                emissive_intensity: some(0.3),
                emissive_color: some("#ffffff"),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_present() {
        let table = PresetTable::builtin();
        for name in BUILTIN_PRESETS {
            assert!(table.contains(name), "missing preset {name}");
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(preset("nonexistent"), preset(DEFAULT_PRESET));
        assert_eq!(preset(""), preset(DEFAULT_PRESET));
        assert_ne!(preset("metal"), preset(DEFAULT_PRESET));
    }

    #[test]
    fn test_presets_are_distinct() {
        for (i, a) in BUILTIN_PRESETS.iter().enumerate() {
            for b in &BUILTIN_PRESETS[i + 1..] {
                assert_ne!(preset(a), preset(b), "{a} and {b} should differ");
            }
        }
    }
}
