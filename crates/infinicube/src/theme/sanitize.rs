//! Per-attribute validation
//!
//! Each function looks at one optional descriptor leaf and either returns a
//! usable value or `None`. Callers substitute their own fallback for `None`.
//! Nothing here panics or fails.

use super::attributes::MaterialKind;
use super::value::AttrValue;
use crate::foundation::color::Color;
use crate::foundation::math::{Vec2, Vec3};

/// Largest subdivision count accepted per axis
pub const MAX_SEGMENTS: u32 = 512;

/// Largest particle count accepted
pub const MAX_PARTICLES: u32 = 10_000;

/// A finite number narrowed to `f32`
pub fn finite(value: Option<&AttrValue>) -> Option<f32> {
    #[allow(clippy::cast_possible_truncation)]
    let narrowed = value?.as_number()? as f32;
    narrowed.is_finite().then_some(narrowed)
}

/// A finite number clamped into [0, 1]
pub fn unit(value: Option<&AttrValue>) -> Option<f32> {
    finite(value).map(|v| v.clamp(0.0, 1.0))
}

/// A finite number strictly greater than zero
pub fn positive(value: Option<&AttrValue>) -> Option<f32> {
    finite(value).filter(|v| *v > 0.0)
}

/// A finite number greater than or equal to zero
pub fn non_negative(value: Option<&AttrValue>) -> Option<f32> {
    finite(value).filter(|v| *v >= 0.0)
}

/// A boolean; strings such as `"true"` are rejected
pub fn flag(value: Option<&AttrValue>) -> Option<bool> {
    value?.as_bool()
}

/// True only for a boolean `true`
pub fn enabled(value: Option<&AttrValue>) -> bool {
    flag(value) == Some(true)
}

/// A well-formed `#`-prefixed hex color
pub fn color(value: Option<&AttrValue>) -> Option<Color> {
    Color::parse(value?.as_text()?)
}

/// An integral number within `[min, max]`
pub fn integer_in(value: Option<&AttrValue>, min: u32, max: u32) -> Option<u32> {
    let number = value?.as_number()?;
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if number < f64::from(min) || number > f64::from(max) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = number as u32;
    Some(count)
}

/// A non-empty string handle
pub fn handle(value: Option<&AttrValue>) -> Option<String> {
    let text = value?.as_text()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// A material type tag; anything unknown is `Standard`
pub fn material_kind(value: Option<&AttrValue>) -> MaterialKind {
    value
        .and_then(AttrValue::as_text)
        .and_then(MaterialKind::from_tag)
        .unwrap_or_default()
}

/// A three-component vector where each element is checked on its own
///
/// A list of exactly three items is read element-wise and invalid elements take
/// the matching `fallback` component. A single number applies to every axis.
/// Anything else yields `fallback`.
pub fn vec3(value: Option<&AttrValue>, fallback: Vec3, accept: impl Fn(f32) -> bool) -> Vec3 {
    let pick = |item: Option<&AttrValue>, default: f32| {
        finite(item).filter(|v| accept(*v)).unwrap_or(default)
    };
    match value {
        Some(AttrValue::List(items)) if items.len() == 3 => Vec3::new(
            pick(items.first(), fallback.x),
            pick(items.get(1), fallback.y),
            pick(items.get(2), fallback.z),
        ),
        Some(scalar @ AttrValue::Number(_)) => match finite(Some(scalar)).filter(|v| accept(*v)) {
            Some(v) => Vec3::new(v, v, v),
            None => fallback,
        },
        _ => fallback,
    }
}

/// A two-component vector, same rules as [`vec3`]
pub fn vec2(value: Option<&AttrValue>, fallback: Vec2, accept: impl Fn(f32) -> bool) -> Vec2 {
    let pick = |item: Option<&AttrValue>, default: f32| {
        finite(item).filter(|v| accept(*v)).unwrap_or(default)
    };
    match value {
        Some(AttrValue::List(items)) if items.len() == 2 => {
            Vec2::new(pick(items.first(), fallback.x), pick(items.get(1), fallback.y))
        }
        Some(scalar @ AttrValue::Number(_)) => match finite(Some(scalar)).filter(|v| accept(*v)) {
            Some(v) => Vec2::new(v, v),
            None => fallback,
        },
        _ => fallback,
    }
}

/// Three integral counts within `[min, max]`, element-wise fallback
pub fn counts3(value: Option<&AttrValue>, fallback: [u32; 3], min: u32, max: u32) -> [u32; 3] {
    match value {
        Some(AttrValue::List(items)) if items.len() == 3 => {
            let mut out = fallback;
            for (slot, item) in out.iter_mut().zip(items) {
                if let Some(count) = integer_in(Some(item), min, max) {
                    *slot = count;
                }
            }
            out
        }
        Some(scalar @ AttrValue::Number(_)) => {
            integer_in(Some(scalar), min, max).map_or(fallback, |c| [c, c, c])
        }
        _ => fallback,
    }
}
