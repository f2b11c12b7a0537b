//! Vertex effects for `<material>` regions
//!
//! Effects operate on the shaped vertex buffer (terminator already dropped)
//! in region order. A region covers vertices `[start * 4, end * 4 + 4)`,
//! clamped to the shaped quads, so truncated or trailing regions degrade to
//! shorter or empty ranges instead of failing.

pub mod shadow;
pub mod gradient;
pub mod underline;

use std::ops::Range;

pub use gradient::apply_gradient;
pub use shadow::{apply_outline, apply_shadow};
pub use underline::apply_underline;

use crate::events::EventRect;
use crate::foundation::Color32;
use crate::geometry::ContainerGeometry;
use crate::layout::shaping::{UIVertex, QUAD_VERTICES};
use crate::markup::{Effect, IconPlaceholder, TagRegion};

/// Minimum extra capacity reserved when any region duplicates vertices
const MIN_RESERVE: usize = 16;

/// Per-pass values the effects read
#[derive(Debug, Clone)]
pub struct EffectContext {
    /// Font size in pixels
    pub font_size: f32,
    /// Base text colour, used by underlines left at white
    pub text_color: Color32,
    /// Container geometry
    pub geometry: ContainerGeometry,
}

/// Still icons and event rectangles produced by effects
#[derive(Debug, Default)]
pub struct EffectOutput {
    /// Underline bars
    pub icons: Vec<IconPlaceholder>,
    /// Underline click regions
    pub events: Vec<EventRect>,
}

/// Clamped vertex range of a region
pub fn vertex_range(region: &TagRegion, len: usize) -> Range<usize> {
    let start = region.start.saturating_mul(QUAD_VERTICES);
    let end = region
        .end
        .saturating_mul(QUAD_VERTICES)
        .saturating_add(QUAD_VERTICES)
        .min(len);
    if start >= end {
        return start.min(len)..start.min(len);
    }
    start..end
}

/// Extra vertices the duplicating effects will append
pub fn extra_vertices(regions: &[TagRegion], len: usize) -> usize {
    regions
        .iter()
        .map(|region| {
            let count = vertex_range(region, len).len();
            match region.effect {
                Effect::Shadow(_) => count,
                Effect::Outline(_) => count * 5,
                Effect::Gradient(_) | Effect::Underline(_) => 0,
            }
        })
        .sum()
}

/// Apply every region to `verts`, in order
pub fn apply_effects(
    regions: &[TagRegion],
    verts: &mut Vec<UIVertex>,
    context: &EffectContext,
) -> EffectOutput {
    let mut output = EffectOutput::default();

    let extra = extra_vertices(regions, verts.len());
    if extra > 0 {
        verts.reserve(extra.max(MIN_RESERVE));
    }

    // Regions address characters, never the duplicates appended below
    let shaped_len = verts.len();
    for region in regions {
        let range = vertex_range(region, shaped_len);
        match &region.effect {
            Effect::Shadow(params) => apply_shadow(params, range, verts),
            Effect::Outline(params) => apply_outline(params, range, verts),
            Effect::Gradient(params) => apply_gradient(params, range, verts),
            Effect::Underline(params) => apply_underline(
                params,
                range,
                verts,
                context,
                &mut output.icons,
                &mut output.events,
            ),
        }
    }

    log::debug!(
        "Applied {} effect region(s): {} vertices, {} underline bar(s)",
        regions.len(),
        verts.len(),
        output.icons.len()
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Vec2, Vec3};
    use crate::markup::{GradientParams, ShadowParams, UnderlineParams};

    fn buffer(len: usize) -> Vec<UIVertex> {
        (0..len)
            .map(|i| UIVertex::new(Vec3::new(i as f32, 0.0, 0.0), Color32::WHITE, Vec2::zeros()))
            .collect()
    }

    fn context() -> EffectContext {
        EffectContext {
            font_size: 10.0,
            text_color: Color32::WHITE,
            geometry: ContainerGeometry::default(),
        }
    }

    fn region(start: usize, end: usize, effect: Effect) -> TagRegion {
        TagRegion { start, end, effect }
    }

    #[test]
    fn test_vertex_range_clamps() {
        let shadow = Effect::Shadow(ShadowParams::default());
        assert_eq!(vertex_range(&region(2, 3, shadow.clone()), 40), 8..16);
        assert_eq!(vertex_range(&region(8, 12, shadow.clone()), 40), 32..40);
        assert_eq!(vertex_range(&region(20, 25, shadow), 40), 40..40);
    }

    #[test]
    fn test_outline_on_two_characters() {
        let mut verts = buffer(40);
        let regions = vec![region(2, 3, Effect::Outline(ShadowParams::default()))];

        assert_eq!(extra_vertices(&regions, verts.len()), 40);
        apply_effects(&regions, &mut verts, &context());

        assert_eq!(verts.len(), 80);
        assert_eq!(&verts[72..80], &verts[8..16]);
    }

    #[test]
    fn test_shadow_count() {
        let mut verts = buffer(40);
        let regions = vec![region(0, 2, Effect::Shadow(ShadowParams::default()))];

        apply_effects(&regions, &mut verts, &context());
        assert_eq!(verts.len(), 40 + 12);
    }

    #[test]
    fn test_out_of_range_regions_are_no_ops() {
        let mut verts = buffer(8);
        let regions = vec![
            region(5, 9, Effect::Shadow(ShadowParams::default())),
            region(5, 9, Effect::Gradient(GradientParams::default())),
            region(5, 9, Effect::Underline(UnderlineParams::default())),
        ];

        let output = apply_effects(&regions, &mut verts, &context());
        assert_eq!(verts.len(), 8);
        assert!(output.icons.is_empty());
    }

    #[test]
    fn test_underline_adds_no_vertices() {
        let mut verts = buffer(16);
        let params = UnderlineParams { event: Some("go".into()), ..UnderlineParams::default() };
        let regions = vec![region(0, 3, Effect::Underline(params))];

        let output = apply_effects(&regions, &mut verts, &context());
        assert_eq!(verts.len(), 16);
        assert_eq!(output.icons.len(), 1);
        assert_eq!(output.events.len(), 1);
        assert_eq!(output.events[0].name, "go");
    }
}
