//! # Infinicube
//!
//! Themeable, animated cube collections for real-time 3D scenes.
//!
//! ## Features
//!
//! - **Cube Store**: Ordered cube collection with single selection and change notifications
//! - **Themes**: Built-in and custom presets, inline descriptors, strict sanitization
//! - **Animation**: Rotation, scale pulse, float and selection easing as pure per-frame functions
//! - **Frame Driver**: Render-node bookkeeping that never writes back into the store
//! - **Configuration**: TOML and RON scene files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use infinicube::prelude::*;
//!
//! let mut store = CubeStore::new();
//! let id = store.create(Vec3::new(0.0, 0.0, 0.0), CubeOptions::new().theme("neon"));
//! store.select(&id);
//!
//! let mut driver = FrameDriver::default();
//! for item in driver.tick(&store, 0.016) {
//!     println!("{} scale {}", item.id, item.node.scale);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod config;
pub mod events;
pub mod foundation;
pub mod scene;
pub mod settings;
pub mod theme;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        animation::{Animator, FrameInput, TransformDelta},
        config::{Config, ConfigError},
        events::{EventHandler, EventType, HandlerId, StoreEvent},
        foundation::{
            color::Color,
            math::Vec3,
            time::FrameClock,
        },
        scene::{
            Cube, CubeId, CubeOptions, CubeSize, CubeStore, CubeUpdate, FrameDriver, FrameItem,
            RenderNode, SharedCubeStore, StoreConfig,
        },
        settings::InfinicubeConfig,
        theme::{ResolvedAttributes, ThemeDescriptor, ThemeLibrary, ThemeRef, ThemeResolver},
    };
}
