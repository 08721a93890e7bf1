//! Math utilities and types
//!
//! Provides the small set of vector types the scene and animation code needs.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi
    pub const PI: f32 = std::f32::consts::PI;
    /// Tau (2 * Pi)
    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Replace non-finite components with the matching component of `fallback`
pub fn finite_or(v: Vec3, fallback: Vec3) -> Vec3 {
    Vec3::new(
        if v.x.is_finite() { v.x } else { fallback.x },
        if v.y.is_finite() { v.y } else { fallback.y },
        if v.z.is_finite() { v.z } else { fallback.z },
    )
}

/// Exponential approach of `current` toward `target` by `factor`
///
/// `factor` of 0 never moves, 1 snaps.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
