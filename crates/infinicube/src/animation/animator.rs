//! Animator
//!
//! Computes one frame of transform changes per cube. Effects are applied in a
//! fixed order so the scale channel is deterministic:
//! - rotation (accumulating increment, one step per call)
//! - scale pulse (absolute)
//! - float (absolute Y)
//! - selection easing, which overrides the pulse when both are active
//! - release easing back to scale 1 when nothing else drives the scale

use crate::foundation::math::{approach, Vec3};
use crate::theme::attributes::AnimationAttributes;

/// Default fraction of the remaining distance covered per frame when easing
pub const SELECTION_DAMPING: f32 = 0.1;

/// Below this distance from 1 the release easing snaps to exactly 1
const SETTLE_EPSILON: f32 = 1e-4;

/// Live inputs for one frame of one cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the animation clock started
    pub elapsed: f32,
    /// Position captured when the cube was first shown
    pub rest_position: Vec3,
    /// Uniform scale the render node currently has
    pub current_scale: f32,
    /// Whether the cube is selected
    pub is_selected: bool,
}

impl FrameInput {
    /// Input for a node at rest with scale 1
    pub fn new(elapsed: f32, rest_position: Vec3) -> Self {
        Self {
            elapsed,
            rest_position,
            current_scale: 1.0,
            is_selected: false,
        }
    }

    /// Builder pattern: set the current scale
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.current_scale = scale;
        self
    }

    /// Builder pattern: set the selection flag
    #[must_use]
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}

/// Transform changes for one frame
///
/// `rotation` is added to the node's accumulated rotation. `scale` and
/// `position_y` are absolute and only present when some effect drives them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDelta {
    /// Rotation increment in radians per axis
    pub rotation: Vec3,
    /// New uniform scale
    pub scale: Option<f32>,
    /// New vertical position
    pub position_y: Option<f32>,
}

impl TransformDelta {
    /// A delta that changes nothing
    pub fn none() -> Self {
        Self {
            rotation: Vec3::zeros(),
            scale: None,
            position_y: None,
        }
    }

    /// Whether applying this delta leaves the node unchanged
    pub fn is_none(&self) -> bool {
        self.rotation == Vec3::zeros() && self.scale.is_none() && self.position_y.is_none()
    }
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self::none()
    }
}

/// Stateless per-frame animation evaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    damping: f32,
}

impl Animator {
    /// Animator with a custom easing factor in (0, 1]
    ///
    /// Anything outside that range falls back to [`SELECTION_DAMPING`].
    pub fn new(damping: f32) -> Self {
        let damping = if damping.is_finite() && damping > 0.0 && damping <= 1.0 {
            damping
        } else {
            log::warn!("Invalid selection damping {damping}, using {SELECTION_DAMPING}");
            SELECTION_DAMPING
        };
        Self { damping }
    }

    /// Easing factor
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Evaluate one frame
    pub fn frame(&self, attributes: &AnimationAttributes, input: &FrameInput) -> TransformDelta {
        let t = if input.elapsed.is_finite() { input.elapsed } else { 0.0 };
        let current_scale = if input.current_scale.is_finite() {
            input.current_scale
        } else {
            1.0
        };

        let mut delta = TransformDelta::none();

        if let Some(speed) = attributes.rotation {
            delta.rotation = speed;
        }

        if let Some(pulse) = attributes.pulse {
            let phase = 0.5 + 0.5 * (t * pulse.speed).sin();
            delta.scale = finite(pulse.min + (pulse.max - pulse.min) * phase);
        }

        if let Some(float) = attributes.float {
            delta.position_y = finite(input.rest_position.y + float.amplitude * (t * float.speed).sin());
        }

        match attributes.selection_scale {
            Some(target) if input.is_selected => {
                delta.scale = finite(approach(current_scale, target, self.damping));
            }
            _ if !input.is_selected && attributes.pulse.is_none() => {
                if (current_scale - 1.0).abs() > f32::EPSILON {
                    let next = approach(current_scale, 1.0, self.damping);
                    delta.scale = if (next - 1.0).abs() < SETTLE_EPSILON { Some(1.0) } else { finite(next) };
                }
            }
            _ => {}
        }

        delta
    }
}

/// Channels whose value overflowed are left untouched for this frame
fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            damping: SELECTION_DAMPING,
        }
    }
}
