//! Final mesh output
//!
//! Converts the effect-expanded vertex buffer to local units and builds the
//! triangle list handed to the mesh-fill consumer.

use super::shaping::{UIVertex, QUAD_VERTICES};
use crate::foundation::Vec2;

/// Vertices and triangle indices ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    /// Quad vertices in local units
    pub vertices: Vec<UIVertex>,
    /// Two triangles per quad
    pub indices: Vec<u32>,
}

impl TextMesh {
    /// Build a mesh from pixel-space quads
    ///
    /// Positions are scaled by `units_per_pixel` and shifted by the
    /// sub-pixel `rounding_offset`. Each quad generates 6 indices
    /// (top-left, top-right, bottom-right / bottom-right, bottom-left, top-left).
    pub fn from_quads(mut vertices: Vec<UIVertex>, units_per_pixel: f32, rounding_offset: Vec2) -> Self {
        for vertex in &mut vertices {
            vertex.position *= units_per_pixel;
            vertex.position.x += rounding_offset.x;
            vertex.position.y += rounding_offset.y;
        }

        let quad_count = vertices.len() / QUAD_VERTICES;
        let mut indices = Vec::with_capacity(quad_count * 6);
        for quad in 0..quad_count {
            let base = (quad * QUAD_VERTICES) as u32;
            indices.extend_from_slice(&[
                base, base + 1, base + 2,  // First triangle
                base + 2, base + 3, base,  // Second triangle
            ]);
        }

        Self { vertices, indices }
    }

    /// Number of quads in the mesh
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / QUAD_VERTICES
    }

    /// Check if the mesh has no geometry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Color32, Vec3};

    #[test]
    fn test_indices_and_scaling() {
        let vertices: Vec<UIVertex> = (0..8)
            .map(|i| UIVertex::new(Vec3::new(i as f32 * 2.0, 4.0, 0.0), Color32::WHITE, Vec2::zeros()))
            .collect();

        let mesh = TextMesh::from_quads(vertices, 0.5, Vec2::new(0.25, 0.0));

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.vertices[1].position, Vec3::new(1.25, 2.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TextMesh::from_quads(Vec::new(), 1.0, Vec2::zeros());
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
