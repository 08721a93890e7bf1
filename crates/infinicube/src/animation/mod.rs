//! Per-frame animation
//!
//! The animator is a pure function of resolved animation attributes, elapsed
//! time and the render node's current state. It never touches the store.

pub mod animator;

pub use animator::{Animator, FrameInput, TransformDelta, SELECTION_DAMPING};
