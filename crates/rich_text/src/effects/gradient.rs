//! Linear gradient effect

use std::ops::Range;

use crate::foundation::Color32;
use crate::layout::shaping::UIVertex;
use crate::markup::GradientParams;

/// Recolour `range` along the gradient direction
///
/// Each vertex position is projected onto the direction; the projection,
/// normalised over the range, selects between `from` and `to`. A range
/// with no spread along the direction is painted `from`.
pub fn apply_gradient(params: &GradientParams, range: Range<usize>, verts: &mut [UIVertex]) {
    let project = |vertex: &UIVertex| vertex.xy().dot(&params.direction);

    let (min, max) = verts[range.clone()]
        .iter()
        .map(project)
        .fold((f32::MAX, f32::MIN), |(min, max), dot| (min.min(dot), max.max(dot)));
    let spread = max - min;

    for vertex in &mut verts[range] {
        vertex.color = if spread.is_finite() && spread > f32::EPSILON {
            Color32::lerp(params.from, params.to, (project(vertex) - min) / spread)
        } else {
            params.from
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Vec2, Vec3};

    fn column(ys: &[f32]) -> Vec<UIVertex> {
        ys.iter()
            .map(|&y| UIVertex::new(Vec3::new(0.0, y, 0.0), Color32::WHITE, Vec2::zeros()))
            .collect()
    }

    #[test]
    fn test_top_to_bottom_gradient() {
        let mut verts = column(&[10.0, 10.0, 0.0, 0.0, 5.0]);
        let params = GradientParams {
            from: Color32::WHITE,
            to: Color32::BLACK,
            direction: Vec2::new(0.0, -1.0),
        };

        apply_gradient(&params, 0..5, &mut verts);

        // Direction points down: the top projects lowest and gets `from`
        assert_eq!(verts[0].color, Color32::WHITE);
        assert_eq!(verts[2].color, Color32::BLACK);
        assert_eq!(verts[4].color, Color32::rgb(128, 128, 128));
    }

    #[test]
    fn test_degenerate_spread_uses_from() {
        let mut verts = column(&[3.0, 3.0, 3.0, 3.0]);
        let params = GradientParams { from: Color32::rgb(255, 0, 0), ..GradientParams::default() };

        apply_gradient(&params, 0..4, &mut verts);
        assert!(verts.iter().all(|v| v.color == Color32::rgb(255, 0, 0)));

        // A zero direction projects everything to 0
        let mut verts = column(&[0.0, 9.0]);
        let params = GradientParams { direction: Vec2::zeros(), ..params };
        apply_gradient(&params, 0..2, &mut verts);
        assert!(verts.iter().all(|v| v.color == Color32::rgb(255, 0, 0)));
    }

    #[test]
    fn test_empty_range_is_a_no_op() {
        let mut verts = column(&[1.0]);
        apply_gradient(&GradientParams::default(), 1..1, &mut verts);
        assert_eq!(verts[0].color, Color32::WHITE);
    }
}
