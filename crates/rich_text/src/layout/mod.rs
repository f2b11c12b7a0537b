//! Text layout
//!
//! Shaping adapter, reference shaper, icon line-wrap correction, icon
//! positioning, mesh output and the pass that strings them together.

pub mod shaping;
pub mod monospace;
pub mod wrap;
pub mod positioner;
pub mod mesh;
pub mod pipeline;

pub use mesh::TextMesh;
pub use monospace::MonospaceShaper;
pub use pipeline::{LayoutOutput, LayoutPass, PassParams};
pub use shaping::{GenerationSettings, ShapingEngine, ShapingError, UIVertex};

/// Errors that abort a layout pass
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The shaping engine failed
    #[error("Shaping failed: {0}")]
    Shaping(#[from] ShapingError),

    /// The filler character measured to a non-positive width
    #[error("Filler character {0:?} has no usable width ({1})")]
    InvalidFillerWidth(char, f32),

    /// A computed vertex index fell outside the shaped buffer
    #[error("Vertex {index} out of range ({len} vertices)")]
    VertexOutOfRange {
        /// Requested index
        index: usize,
        /// Buffer length
        len: usize,
    },
}

/// Bounds-checked vertex access
pub(crate) fn vertex_at(verts: &[UIVertex], index: usize) -> Result<&UIVertex, LayoutError> {
    verts.get(index).ok_or(LayoutError::VertexOutOfRange { index, len: verts.len() })
}
