//! Transient render-side transform of one cube
//!
//! Pure data, owned by the frame driver. It is created when a cube is first
//! shown and never written back into the store.

use crate::animation::TransformDelta;
use crate::foundation::math::{constants::TAU, Vec3};

/// Render node transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderNode {
    /// Position captured at mount
    pub rest_position: Vec3,
    /// Accumulated Euler rotation in radians, each axis wrapped into [0, 2π)
    pub rotation: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Current position
    pub position: Vec3,
}

impl RenderNode {
    /// Mount a node at `rest_position`
    pub fn new(rest_position: Vec3) -> Self {
        Self {
            rest_position,
            rotation: Vec3::zeros(),
            scale: 1.0,
            position: rest_position,
        }
    }

    /// Apply one frame of animation
    pub fn apply(&mut self, delta: &TransformDelta) {
        self.rotation = (self.rotation + delta.rotation).map(|angle| angle.rem_euclid(TAU));
        if let Some(scale) = delta.scale {
            self.scale = scale;
        }
        if let Some(y) = delta.position_y {
            self.position.y = y;
        }
    }
}
