//! # Theme Resolver
//!
//! Turns a theme reference plus an object's own color and size into
//! [`ResolvedAttributes`]. Resolution is a pure merge: the descriptor, the
//! object and the resolver are only read, so the same inputs always give the
//! same output. Every leaf goes through [`sanitize`](super::sanitize) on the
//! way, and a material that still fails its invariants is replaced by
//! [`MaterialAttributes::safe_default`].

use super::attributes::{
    AnimationAttributes, FloatParams, GeometryAttributes, MaterialAttributes, OutlineAttributes,
    ParticleAttributes, PulseParams, ResolvedAttributes, TextureAttributes,
};
use super::descriptor::{
    AnimationSection, GeometrySection, MaterialSection, OutlineSection, ParticleSection,
    SelectionSection, TextureSection, ThemeDescriptor, ThemeRef,
};
use super::library::ThemeLibrary;
use super::sanitize::{self, MAX_PARTICLES, MAX_SEGMENTS};
use crate::foundation::color::Color;
use crate::foundation::math::{Vec2, Vec3};
use crate::scene::cube::Cube;

const DEFAULT_ROTATION_SPEED: [f32; 3] = [0.0, 0.01, 0.0];
const DEFAULT_PULSE: PulseParams = PulseParams { min: 0.9, max: 1.1, speed: 1.0 };
const DEFAULT_FLOAT: FloatParams = FloatParams { amplitude: 0.1, speed: 1.0 };
const DEFAULT_BEVEL: f32 = 0.05;
const DEFAULT_OUTLINE_THICKNESS: f32 = 1.0;
const DEFAULT_PARTICLE_COUNT: u32 = 50;
const DEFAULT_PARTICLE_SIZE: f32 = 0.05;
const DEFAULT_PARTICLE_SPEED: f32 = 1.0;

static NO_GEOMETRY: GeometrySection = GeometrySection {
    size: None,
    segments: None,
    bevel_enabled: None,
    bevel_size: None,
};

static NO_MATERIAL: MaterialSection = MaterialSection {
    kind: None,
    color: None,
    metalness: None,
    roughness: None,
    opacity: None,
    transparent: None,
    emissive: None,
    emissive_intensity: None,
    wireframe: None,
    flat_shading: None,
};

static NO_TEXTURE: TextureSection = TextureSection {
    map: None,
    normal_map: None,
    roughness_map: None,
    metalness_map: None,
    repeat: None,
};

/// The object's own contribution to resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBase {
    /// Base color
    pub color: Color,
    /// Per-axis size, each axis > 0
    pub size: Vec3,
}

impl ObjectBase {
    /// Build from a color and size; invalid axes become 1
    pub fn new(color: Color, size: Vec3) -> Self {
        Self {
            color,
            size: size.map(|axis| if axis.is_finite() && axis > 0.0 { axis } else { 1.0 }),
        }
    }

    /// Take color and size from a cube
    pub fn from_cube(cube: &Cube) -> Self {
        Self::new(cube.color, cube.size.to_vec3())
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new(Color::FALLBACK, Vec3::new(1.0, 1.0, 1.0))
    }
}

/// Maps (theme, object, selection) to renderer-safe attributes
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    library: ThemeLibrary,
    fallback_color: Color,
}

impl ThemeResolver {
    /// Resolver over the built-in presets
    pub fn new() -> Self {
        Self::with_library(ThemeLibrary::new())
    }

    /// Resolver over a library with custom presets
    pub fn with_library(library: ThemeLibrary) -> Self {
        Self {
            library,
            fallback_color: Color::FALLBACK,
        }
    }

    /// Color used by the safe material
    #[must_use]
    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    /// The preset library
    pub fn library(&self) -> &ThemeLibrary {
        &self.library
    }

    /// Resolve a cube in its current selection state
    pub fn resolve_cube(&self, cube: &Cube, is_selected: bool) -> ResolvedAttributes {
        self.resolve(cube.theme.as_ref(), &ObjectBase::from_cube(cube), is_selected)
    }

    /// Resolve a theme reference; a missing one means the default preset
    pub fn resolve(
        &self,
        theme: Option<&ThemeRef>,
        base: &ObjectBase,
        is_selected: bool,
    ) -> ResolvedAttributes {
        self.resolve_descriptor(self.library.lookup(theme), base, is_selected)
    }

    /// Resolve a descriptor directly
    pub fn resolve_descriptor(
        &self,
        descriptor: &ThemeDescriptor,
        base: &ObjectBase,
        is_selected: bool,
    ) -> ResolvedAttributes {
        let selection = descriptor.selection.as_ref().filter(|_| is_selected);

        let material = descriptor.material.as_ref().unwrap_or(&NO_MATERIAL);
        let material = checked_material(
            assemble_material(material, selection, base.color),
            self.fallback_color,
        );

        let mut animation = assemble_animation(descriptor.animation.as_ref());
        animation.selection_scale = selection.and_then(|s| sanitize::positive(s.scale.as_ref()));

        ResolvedAttributes {
            geometry: assemble_geometry(descriptor.geometry.as_ref().unwrap_or(&NO_GEOMETRY), base),
            material,
            texture: assemble_texture(descriptor.texture.as_ref().unwrap_or(&NO_TEXTURE)),
            outline: assemble_outline(descriptor.outline.as_ref(), selection, base.color),
            particles: assemble_particles(descriptor.particles.as_ref(), base.color),
            animation,
        }
    }
}

impl Default for ThemeResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble_geometry(section: &GeometrySection, base: &ObjectBase) -> GeometryAttributes {
    let multiplier = sanitize::vec3(section.size.as_ref(), Vec3::new(1.0, 1.0, 1.0), |v| v > 0.0);
    let bevel = sanitize::enabled(section.bevel_enabled.as_ref()).then(|| {
        sanitize::non_negative(section.bevel_size.as_ref()).unwrap_or(DEFAULT_BEVEL)
    });

    GeometryAttributes {
        dimensions: multiplier.component_mul(&base.size),
        segments: sanitize::counts3(section.segments.as_ref(), [1, 1, 1], 1, MAX_SEGMENTS),
        bevel,
    }
}

/// Collapse a material that breaks a renderer invariant to the safe material
fn checked_material(material: MaterialAttributes, fallback_color: Color) -> MaterialAttributes {
    match material.validate() {
        Ok(()) => material,
        Err(err) => {
            log::error!("Material assembly failed ({err}), using safe material");
            MaterialAttributes::safe_default(fallback_color)
        }
    }
}

fn assemble_material(
    section: &MaterialSection,
    selection: Option<&SelectionSection>,
    object_color: Color,
) -> MaterialAttributes {
    let declared_opacity = sanitize::unit(section.opacity.as_ref());
    let opacity = declared_opacity.unwrap_or(1.0);
    let transparent = sanitize::flag(section.transparent.as_ref()).unwrap_or(false)
        || declared_opacity.is_some()
        || opacity < 1.0;

    let mut material = MaterialAttributes {
        kind: sanitize::material_kind(section.kind.as_ref()),
        color: sanitize::color(section.color.as_ref()).unwrap_or(object_color),
        metalness: sanitize::unit(section.metalness.as_ref()).unwrap_or(0.0),
        roughness: sanitize::unit(section.roughness.as_ref()).unwrap_or(1.0),
        opacity,
        transparent,
        emissive: sanitize::color(section.emissive.as_ref()).unwrap_or(Color::BLACK),
        emissive_intensity: sanitize::unit(section.emissive_intensity.as_ref()).unwrap_or(0.0),
        wireframe: sanitize::flag(section.wireframe.as_ref()).unwrap_or(false),
        flat_shading: sanitize::flag(section.flat_shading.as_ref()).unwrap_or(false),
    };

    if let Some(selection) = selection {
        material.emissive =
            sanitize::color(selection.emissive_color.as_ref()).unwrap_or(object_color);
        if let Some(intensity) = sanitize::unit(selection.emissive_intensity.as_ref()) {
            material.emissive_intensity = intensity;
        }
    }

    material
}

fn assemble_texture(section: &TextureSection) -> Option<TextureAttributes> {
    let texture = TextureAttributes {
        map: sanitize::handle(section.map.as_ref()),
        normal_map: sanitize::handle(section.normal_map.as_ref()),
        roughness_map: sanitize::handle(section.roughness_map.as_ref()),
        metalness_map: sanitize::handle(section.metalness_map.as_ref()),
        repeat: sanitize::vec2(section.repeat.as_ref(), Vec2::new(1.0, 1.0), |v| v > 0.0),
    };
    let any_handle = texture.map.is_some()
        || texture.normal_map.is_some()
        || texture.roughness_map.is_some()
        || texture.metalness_map.is_some();
    any_handle.then_some(texture)
}

fn assemble_outline(
    section: Option<&OutlineSection>,
    selection: Option<&SelectionSection>,
    object_color: Color,
) -> Option<OutlineAttributes> {
    let section = section.filter(|s| sanitize::enabled(s.enabled.as_ref()))?;
    let mut outline = OutlineAttributes {
        color: sanitize::color(section.color.as_ref()).unwrap_or(object_color),
        thickness: sanitize::non_negative(section.thickness.as_ref())
            .unwrap_or(DEFAULT_OUTLINE_THICKNESS),
    };
    if let Some(selection) = selection {
        if let Some(color) = sanitize::color(selection.outline_color.as_ref()) {
            outline.color = color;
        }
        if let Some(thickness) = sanitize::non_negative(selection.outline_thickness.as_ref()) {
            outline.thickness = thickness;
        }
    }
    Some(outline)
}

fn assemble_particles(
    section: Option<&ParticleSection>,
    object_color: Color,
) -> Option<ParticleAttributes> {
    let section = section.filter(|s| sanitize::enabled(s.enabled.as_ref()))?;
    Some(ParticleAttributes {
        count: sanitize::integer_in(section.count.as_ref(), 0, MAX_PARTICLES)
            .unwrap_or(DEFAULT_PARTICLE_COUNT),
        color: sanitize::color(section.color.as_ref()).unwrap_or(object_color),
        size: sanitize::non_negative(section.size.as_ref()).unwrap_or(DEFAULT_PARTICLE_SIZE),
        speed: sanitize::non_negative(section.speed.as_ref()).unwrap_or(DEFAULT_PARTICLE_SPEED),
    })
}

fn assemble_animation(section: Option<&AnimationSection>) -> AnimationAttributes {
    let Some(section) = section else {
        return AnimationAttributes::default();
    };

    let rotation = section
        .rotation
        .as_ref()
        .filter(|r| sanitize::enabled(r.enabled.as_ref()))
        .map(|r| sanitize::vec3(r.speed.as_ref(), Vec3::from(DEFAULT_ROTATION_SPEED), |_| true));

    let pulse = section
        .scale
        .as_ref()
        .filter(|p| sanitize::enabled(p.enabled.as_ref()))
        .map(|p| PulseParams {
            min: sanitize::positive(p.min.as_ref()).unwrap_or(DEFAULT_PULSE.min),
            max: sanitize::positive(p.max.as_ref()).unwrap_or(DEFAULT_PULSE.max),
            speed: sanitize::finite(p.speed.as_ref()).unwrap_or(DEFAULT_PULSE.speed),
        });

    let float = section
        .float
        .as_ref()
        .filter(|f| sanitize::enabled(f.enabled.as_ref()))
        .map(|f| FloatParams {
            amplitude: sanitize::finite(f.amplitude.as_ref()).unwrap_or(DEFAULT_FLOAT.amplitude),
            speed: sanitize::finite(f.speed.as_ref()).unwrap_or(DEFAULT_FLOAT.speed),
        });

    AnimationAttributes {
        rotation,
        pulse,
        float,
        selection_scale: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::attributes::MaterialKind;
    use crate::theme::descriptor::FloatSection;
    use crate::theme::value::AttrValue;
    use approx::assert_relative_eq;

    fn base() -> ObjectBase {
        ObjectBase::new(Color::rgb(0x11, 0x22, 0x33), Vec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn test_broken_material_collapses_to_safe_default() {
        let fallback = Color::rgb(0x3b, 0x82, 0xf6);
        let valid = assemble_material(&MaterialSection::default(), None, base().color);
        assert_eq!(checked_material(valid, fallback), valid);

        let out_of_range = MaterialAttributes {
            metalness: 4.0,
            ..valid
        };
        assert_eq!(
            checked_material(out_of_range, fallback),
            MaterialAttributes::safe_default(fallback)
        );

        let opaque_but_faded = MaterialAttributes {
            opacity: 0.5,
            transparent: false,
            ..valid
        };
        let safe = checked_material(opaque_but_faded, fallback);
        assert_eq!(safe, MaterialAttributes::safe_default(fallback));
        assert!(safe.validate().is_ok());
    }

    fn with_material(material: MaterialSection) -> ThemeRef {
        ThemeRef::inline(ThemeDescriptor {
            material: Some(material),
            ..ThemeDescriptor::default()
        })
    }

    #[test]
    fn test_opacity_above_one_clamps_and_enables_blending() {
        let theme = with_material(MaterialSection {
            opacity: Some(1.5_f64.into()),
            ..MaterialSection::default()
        });
        let resolved = ThemeResolver::new().resolve(Some(&theme), &base(), false);

        assert_relative_eq!(resolved.material.opacity, 1.0);
        assert!(resolved.material.transparent);
    }

    #[test]
    fn test_negative_metalness_clamps_to_zero() {
        let theme = with_material(MaterialSection {
            metalness: Some((-3.0_f64).into()),
            ..MaterialSection::default()
        });
        let resolved = ThemeResolver::new().resolve(Some(&theme), &base(), false);
        assert_relative_eq!(resolved.material.metalness, 0.0);
    }

    #[test]
    fn test_partial_opacity_forces_transparency() {
        let theme = with_material(MaterialSection {
            opacity: Some(0.2_f64.into()),
            transparent: Some(false.into()),
            ..MaterialSection::default()
        });
        let resolved = ThemeResolver::new().resolve(Some(&theme), &base(), false);

        assert_relative_eq!(resolved.material.opacity, 0.2);
        assert!(resolved.material.transparent);
    }

    #[test]
    fn test_unknown_preset_matches_default() {
        let resolver = ThemeResolver::new();
        for selected in [false, true] {
            assert_eq!(
                resolver.resolve(Some(&ThemeRef::preset("nonexistent")), &base(), selected),
                resolver.resolve(Some(&ThemeRef::preset("default")), &base(), selected),
            );
            assert_eq!(
                resolver.resolve(None, &base(), selected),
                resolver.resolve(Some(&ThemeRef::preset("default")), &base(), selected),
            );
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = ThemeResolver::new();
        for name in crate::theme::BUILTIN_PRESETS {
            let theme = ThemeRef::preset(name);
            let first = resolver.resolve(Some(&theme), &base(), true);
            let second = resolver.resolve(Some(&theme), &base(), true);
            assert_eq!(first, second, "preset {name}");
        }
    }

    #[test]
    fn test_every_builtin_resolves_to_valid_material() {
        let resolver = ThemeResolver::new();
        for name in crate::theme::BUILTIN_PRESETS {
            for selected in [false, true] {
                let resolved = resolver.resolve(Some(&ThemeRef::preset(name)), &base(), selected);
                assert!(resolved.material.validate().is_ok(), "preset {name}");
            }
        }
    }

    #[test]
    fn test_material_color_precedence() {
        let resolver = ThemeResolver::new();
        let metal = resolver.resolve(Some(&ThemeRef::preset("metal")), &base(), false);
        assert_eq!(metal.material.color, Color::rgb(0xc0, 0xc0, 0xc0));

        let default = resolver.resolve(None, &base(), false);
        assert_eq!(default.material.color, base().color);

        let bad = with_material(MaterialSection {
            color: Some("blue".into()),
            ..MaterialSection::default()
        });
        assert_eq!(resolver.resolve(Some(&bad), &base(), false).material.color, base().color);
    }

    #[test]
    fn test_selection_overlay() {
        let resolver = ThemeResolver::new();
        let metal = ThemeRef::preset("metal");

        let idle = resolver.resolve(Some(&metal), &base(), false);
        assert_eq!(idle.material.emissive, Color::BLACK);
        assert_eq!(idle.animation.selection_scale, None);

        let selected = resolver.resolve(Some(&metal), &base(), true);
        assert_eq!(selected.material.emissive, Color::rgb(0xff, 0xd7, 0x00));
        assert_relative_eq!(selected.material.emissive_intensity, 0.5);
        assert_eq!(selected.animation.selection_scale, Some(1.1));
    }

    #[test]
    fn test_selection_emissive_falls_back_to_object_color() {
        let resolved = ThemeResolver::new().resolve(Some(&ThemeRef::preset("neon")), &base(), true);
        assert_eq!(resolved.material.emissive, base().color);
        assert_relative_eq!(resolved.material.emissive_intensity, 1.0);
    }

    #[test]
    fn test_no_selection_section_means_no_overlay() {
        let theme = with_material(MaterialSection::default());
        let resolved = ThemeResolver::new().resolve(Some(&theme), &base(), true);
        assert_eq!(resolved.material.emissive, Color::BLACK);
        assert_eq!(resolved.animation.selection_scale, None);
    }

    #[test]
    fn test_unknown_material_type_is_standard() {
        let theme = with_material(MaterialSection {
            kind: Some("toon".into()),
            ..MaterialSection::default()
        });
        let resolved = ThemeResolver::new().resolve(Some(&theme), &base(), false);
        assert_eq!(resolved.material.kind, MaterialKind::Standard);
    }

    #[test]
    fn test_wrong_typed_flags_are_ignored() {
        let theme = with_material(MaterialSection {
            wireframe: Some("true".into()),
            flat_shading: Some(1.0_f64.into()),
            transparent: Some("yes".into()),
            ..MaterialSection::default()
        });
        let material = ThemeResolver::new().resolve(Some(&theme), &base(), false).material;
        assert!(!material.wireframe);
        assert!(!material.flat_shading);
        assert!(!material.transparent);
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let theme = with_material(MaterialSection {
            roughness: Some(f64::NAN.into()),
            emissive_intensity: Some(f64::INFINITY.into()),
            ..MaterialSection::default()
        });
        let material = ThemeResolver::new().resolve(Some(&theme), &base(), false).material;
        assert_relative_eq!(material.roughness, 1.0);
        assert_relative_eq!(material.emissive_intensity, 0.0);
    }

    #[test]
    fn test_geometry_multiplies_object_size() {
        let theme = ThemeRef::inline(ThemeDescriptor {
            geometry: Some(GeometrySection {
                size: Some([1.0_f64, 0.5, -1.0].into()),
                segments: Some([2.0_f64, 0.0, 1000.0].into()),
                bevel_enabled: Some(true.into()),
                ..GeometrySection::default()
            }),
            ..ThemeDescriptor::default()
        });
        let geometry = ThemeResolver::new().resolve(Some(&theme), &base(), false).geometry;

        assert_relative_eq!(geometry.dimensions, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(geometry.segments, [2, 1, 1]);
        assert_eq!(geometry.bevel, Some(DEFAULT_BEVEL));
    }

    #[test]
    fn test_per_axis_object_size() {
        let object = ObjectBase::new(Color::FALLBACK, Vec3::new(1.0, 2.0, f32::NAN));
        let geometry = ThemeResolver::new().resolve(None, &object, false).geometry;
        assert_relative_eq!(geometry.dimensions, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(geometry.segments, [1, 1, 1]);
        assert_eq!(geometry.bevel, None);
    }

    #[test]
    fn test_outline_and_particles() {
        let resolver = ThemeResolver::new();
        let neon = resolver.resolve(Some(&ThemeRef::preset("neon")), &base(), false);
        assert_eq!(
            neon.outline,
            Some(OutlineAttributes {
                color: Color::rgb(0xff, 0x00, 0xff),
                thickness: 2.0,
            })
        );

        let theme = ThemeRef::inline(ThemeDescriptor {
            outline: Some(OutlineSection {
                enabled: Some(true.into()),
                thickness: Some((-1.0_f64).into()),
                ..OutlineSection::default()
            }),
            particles: Some(ParticleSection {
                enabled: Some(true.into()),
                count: Some(20_000.0_f64.into()),
                size: Some(0.2_f64.into()),
                ..ParticleSection::default()
            }),
            selection: Some(SelectionSection {
                outline_color: Some("#00ff00".into()),
                ..SelectionSection::default()
            }),
            ..ThemeDescriptor::default()
        });

        let idle = resolver.resolve(Some(&theme), &base(), false);
        let outline = idle.outline.expect("outline enabled");
        assert_eq!(outline.color, base().color);
        assert_relative_eq!(outline.thickness, DEFAULT_OUTLINE_THICKNESS);
        let particles = idle.particles.expect("particles enabled");
        assert_eq!(particles.count, DEFAULT_PARTICLE_COUNT);
        assert_relative_eq!(particles.size, 0.2);

        let selected = resolver.resolve(Some(&theme), &base(), true);
        assert_eq!(selected.outline.map(|o| o.color), Some(Color::rgb(0, 0xff, 0)));
    }

    #[test]
    fn test_disabled_or_string_enabled_outline_is_absent() {
        let theme = ThemeRef::inline(ThemeDescriptor {
            outline: Some(OutlineSection {
                enabled: Some("true".into()),
                ..OutlineSection::default()
            }),
            ..ThemeDescriptor::default()
        });
        assert_eq!(ThemeResolver::new().resolve(Some(&theme), &base(), false).outline, None);
    }

    #[test]
    fn test_texture_handles() {
        let theme = ThemeRef::inline(ThemeDescriptor {
            texture: Some(TextureSection {
                map: Some("textures/wood.png".into()),
                normal_map: Some("".into()),
                roughness_map: Some(AttrValue::Number(3.0)),
                repeat: Some([2.0_f64, 0.0].into()),
                ..TextureSection::default()
            }),
            ..ThemeDescriptor::default()
        });
        let texture = ThemeResolver::new()
            .resolve(Some(&theme), &base(), false)
            .texture
            .expect("map set");
        assert_eq!(texture.map.as_deref(), Some("textures/wood.png"));
        assert_eq!(texture.normal_map, None);
        assert_eq!(texture.roughness_map, None);
        assert_relative_eq!(texture.repeat, Vec2::new(2.0, 1.0));

        assert_eq!(ThemeResolver::new().resolve(None, &base(), false).texture, None);
    }

    #[test]
    fn test_animation_behaviors() {
        let resolver = ThemeResolver::new();
        let fire = resolver.resolve(Some(&ThemeRef::preset("fire")), &base(), false).animation;
        assert_eq!(fire.rotation, None);
        assert_eq!(fire.pulse, Some(PulseParams { min: 0.9, max: 1.1, speed: 3.0 }));
        assert_eq!(fire.float, Some(FloatParams { amplitude: 0.1, speed: 4.0 }));

        let theme = ThemeRef::inline(ThemeDescriptor {
            animation: Some(AnimationSection {
                float: Some(FloatSection {
                    amplitude: Some("high".into()),
                    enabled: Some(true.into()),
                    ..FloatSection::default()
                }),
                ..AnimationSection::default()
            }),
            ..ThemeDescriptor::default()
        });
        let animation = resolver.resolve(Some(&theme), &base(), false).animation;
        assert_eq!(animation.float, Some(DEFAULT_FLOAT));
        assert!(resolver.resolve(None, &base(), false).animation.is_static());
    }

    #[test]
    fn test_custom_library_preset() {
        let mut library = ThemeLibrary::new();
        library
            .register(
                "matte",
                ThemeDescriptor {
                    material: Some(MaterialSection {
                        kind: Some("lambert".into()),
                        ..MaterialSection::default()
                    }),
                    ..ThemeDescriptor::default()
                },
            )
            .unwrap();
        let resolver = ThemeResolver::with_library(library);
        let resolved = resolver.resolve(Some(&ThemeRef::preset("matte")), &base(), false);
        assert_eq!(resolved.material.kind, MaterialKind::Lambert);
    }
}
