//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - 8-bit vertex colours
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;

pub use color::Color32;
pub use math::{Rect, Vec2, Vec3};
