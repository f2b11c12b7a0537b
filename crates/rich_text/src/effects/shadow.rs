//! Shadow and outline effects
//!
//! Both duplicate vertices. The shadow rewrites the range in place and
//! appends the untouched glyph, so the glyph draws over its shadow. The
//! outline appends four diagonal copies and then the untouched glyph.

use std::ops::Range;

use crate::foundation::Vec2;
use crate::layout::shaping::UIVertex;
use crate::markup::ShadowParams;

/// Outline passes, in draw order
const OUTLINE_DIRECTIONS: [(f32, f32); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];

fn shadow_vertex(source: UIVertex, params: &ShadowParams, offset: Vec2) -> UIVertex {
    let mut vertex = source.translated(offset);
    vertex.color = params.color.with_alpha_scaled(source.color.a);
    vertex
}

/// Apply a drop shadow to `range`
///
/// Adds `range.len()` vertices.
pub fn apply_shadow(params: &ShadowParams, range: Range<usize>, verts: &mut Vec<UIVertex>) {
    for index in range {
        let source = verts[index];
        verts.push(source);
        verts[index] = shadow_vertex(source, params, params.offset);
    }
}

/// Apply a four-way outline to `range`
///
/// Adds `5 * range.len()` vertices; the final copy is the unmodified glyph.
pub fn apply_outline(params: &ShadowParams, range: Range<usize>, verts: &mut Vec<UIVertex>) {
    for (dx, dy) in OUTLINE_DIRECTIONS {
        let offset = Vec2::new(params.offset.x * dx, params.offset.y * dy);
        for index in range.clone() {
            let copy = shadow_vertex(verts[index], params, offset);
            verts.push(copy);
        }
    }
    verts.extend_from_within(range);
}
