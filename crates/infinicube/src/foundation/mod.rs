//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types
//! - Hex colors
//! - Frame clock
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
pub mod color;
