//! Named theme lookup with custom presets layered over the built-ins

use std::collections::HashMap;

use super::descriptor::{ThemeDescriptor, ThemeRef};
use super::error::ThemeError;
use super::presets::PresetTable;

/// Built-in presets plus presets registered at runtime
///
/// Custom presets can add names but never replace a built-in one, so
/// `"metal"` always means the same thing.
#[derive(Debug, Clone, Default)]
pub struct ThemeLibrary {
    custom: HashMap<String, ThemeDescriptor>,
}

impl ThemeLibrary {
    /// Library containing only the built-in presets
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom preset, replacing an earlier custom one of the same name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        descriptor: ThemeDescriptor,
    ) -> Result<(), ThemeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ThemeError::EmptyPresetName);
        }
        if PresetTable::builtin().contains(&name) {
            return Err(ThemeError::ReservedPresetName(name));
        }
        if self.custom.insert(name.clone(), descriptor).is_some() {
            log::debug!("Replaced custom preset {name}");
        } else {
            log::debug!("Registered custom preset {name}");
        }
        Ok(())
    }

    /// Look up a preset without fallback
    pub fn find(&self, name: &str) -> Option<&ThemeDescriptor> {
        PresetTable::builtin()
            .find(name)
            .or_else(|| self.custom.get(name))
    }

    /// Look up a preset, falling back to `default`
    pub fn get(&self, name: &str) -> &ThemeDescriptor {
        self.find(name).unwrap_or_else(|| {
            log::debug!("Unknown preset {name}, using default");
            PresetTable::builtin().default_preset()
        })
    }

    /// Whether `name` is a built-in or custom preset
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Names of the custom presets, sorted
    pub fn custom_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptor for a cube's theme reference
    pub fn lookup<'a>(&'a self, theme: Option<&'a ThemeRef>) -> &'a ThemeDescriptor {
        match theme {
            None => PresetTable::builtin().default_preset(),
            Some(ThemeRef::Preset(name)) => self.get(name),
            Some(ThemeRef::Inline(descriptor)) => descriptor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::descriptor::MaterialSection;
    use crate::theme::presets::{preset, DEFAULT_PRESET};

    fn matte() -> ThemeDescriptor {
        ThemeDescriptor {
            material: Some(MaterialSection {
                roughness: Some(1.0_f64.into()),
                ..MaterialSection::default()
            }),
            ..ThemeDescriptor::default()
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut library = ThemeLibrary::new();
        library.register("matte", matte()).unwrap();

        assert!(library.contains("matte"));
        assert_eq!(library.get("matte"), &matte());
        assert_eq!(library.custom_names(), vec!["matte"]);
        assert_eq!(library.lookup(Some(&ThemeRef::preset("matte"))), &matte());
    }

    #[test]
    fn test_builtin_names_are_reserved() {
        let mut library = ThemeLibrary::new();
        assert_eq!(
            library.register("metal", matte()),
            Err(ThemeError::ReservedPresetName("metal".to_string()))
        );
        assert_eq!(library.register("  ", matte()), Err(ThemeError::EmptyPresetName));
        assert_eq!(library.get("metal"), preset("metal"));
    }

    #[test]
    fn test_missing_and_unknown_fall_back_to_default() {
        let library = ThemeLibrary::new();
        let default = preset(DEFAULT_PRESET);
        assert_eq!(library.lookup(None), default);
        assert_eq!(library.lookup(Some(&ThemeRef::preset("nonexistent"))), default);
        assert!(library.find("nonexistent").is_none());
    }

    #[test]
    fn test_inline_is_used_directly() {
        let library = ThemeLibrary::new();
        let theme = ThemeRef::inline(matte());
        assert_eq!(library.lookup(Some(&theme)), &matte());
    }
}
