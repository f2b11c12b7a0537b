//! Glyph shaping adapter
//!
//! The shaping engine is an external collaborator. It turns the
//! placeholder-substituted markup into a flat list of quads and measures
//! single strings. Everything downstream relies on its vertex layout:
//!
//! - exactly one quad (4 vertices) per `char` of the input, in reading order,
//!   so vertex `i` belongs to character `i / 4`;
//! - markup characters of tags the engine understands produce zero-area quads;
//! - one trailing terminator quad, which callers drop;
//! - positions in pixels relative to the container pivot, +Y up;
//! - corners in the order given by the `TOP_LEFT`..`BOTTOM_LEFT` constants.

use crate::foundation::{Color32, Vec2, Vec3};

/// Corner index of the top-left vertex within a quad
pub const TOP_LEFT: usize = 0;
/// Corner index of the top-right vertex within a quad
pub const TOP_RIGHT: usize = 1;
/// Corner index of the bottom-right vertex within a quad
pub const BOTTOM_RIGHT: usize = 2;
/// Corner index of the bottom-left vertex within a quad
pub const BOTTOM_LEFT: usize = 3;

/// Vertices per character quad
pub const QUAD_VERTICES: usize = 4;

/// Vertex data for text rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UIVertex {
    /// Position in pixels (local units after the final transform)
    pub position: Vec3,
    /// Vertex colour
    pub color: Color32,
    /// UV texture coordinates
    pub uv: Vec2,
}

impl UIVertex {
    /// Create a vertex
    pub const fn new(position: Vec3, color: Color32, uv: Vec2) -> Self {
        Self { position, color, uv }
    }

    /// Copy of this vertex translated in the XY plane
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.position.x += offset.x;
        self.position.y += offset.y;
        self
    }

    /// Position projected onto the XY plane
    pub fn xy(&self) -> Vec2 {
        self.position.xy()
    }
}

/// Settings handed to the shaping engine for one pass
///
/// This is the font data the host exposes to the layout engine; nothing
/// else about the host text component is read.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Layout extents in pixels
    pub extents: Vec2,
    /// Container pivot
    pub pivot: Vec2,
    /// Font size in pixels
    pub font_size: f32,
    /// Base text colour
    pub color: Color32,
    /// Canvas pixels per local unit
    pub scale_factor: f32,
    /// Line spacing multiplier
    pub line_spacing: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            extents: Vec2::new(160.0, 30.0),
            pivot: Vec2::new(0.5, 0.5),
            font_size: 14.0,
            color: Color32::WHITE,
            scale_factor: 1.0,
            line_spacing: 1.0,
        }
    }
}

/// Errors reported by a shaping engine
#[derive(Debug, thiserror::Error)]
pub enum ShapingError {
    /// The font could not produce geometry
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    /// Shaping failed for the given text
    #[error("Failed to shape text: {0}")]
    Failed(String),
}

/// Text shaping collaborator
pub trait ShapingEngine {
    /// Lay out `text` and return its quads, including the trailing terminator
    fn shape(&mut self, text: &str, settings: &GenerationSettings) -> Result<Vec<UIVertex>, ShapingError>;

    /// Unwrapped advance width of `text` in pixels
    fn preferred_width(&mut self, text: &str, settings: &GenerationSettings) -> Result<f32, ShapingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_keeps_color_and_uv() {
        let vertex = UIVertex::new(Vec3::new(1.0, 2.0, 0.0), Color32::BLACK, Vec2::new(0.5, 0.5));
        let moved = vertex.translated(Vec2::new(3.0, -1.0));

        assert_eq!(moved.position, Vec3::new(4.0, 1.0, 0.0));
        assert_eq!(moved.color, Color32::BLACK);
        assert_eq!(moved.uv, vertex.uv);
        assert_eq!(moved.xy(), Vec2::new(4.0, 1.0));
    }
}
