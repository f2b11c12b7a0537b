//! Underline effect
//!
//! The underline adds no glyph quads. It splits the tagged run into visual
//! lines and emits one still icon (a bar) per line, plus a clickable
//! rectangle per line when the tag carries an event.
//!
//! Lines are told apart by a vertical jump of more than half the font size
//! between the bottom of the line's first quad and the current quad. Very
//! large glyphs or mixed sizes inside one run can fool this.

use std::ops::Range;

use super::EffectContext;
use crate::events::EventRect;
use crate::foundation::{Color32, Rect, Vec2};
use crate::layout::shaping::{UIVertex, BOTTOM_LEFT, BOTTOM_RIGHT, QUAD_VERTICES, TOP_LEFT, TOP_RIGHT};
use crate::markup::{IconPlaceholder, UnderlineParams};

/// Quads `first..=last` forming one visual line of the run
struct LineSegment {
    first: usize,
    last: usize,
}

impl LineSegment {
    fn vertex(verts: &[UIVertex], quad: usize, corner: usize) -> UIVertex {
        verts[quad * QUAD_VERTICES + corner]
    }

    /// Left edge, right edge, lowest bottom and highest top in pixels
    fn bounds(&self, verts: &[UIVertex]) -> (f32, f32, f32, f32) {
        let left = Self::vertex(verts, self.first, BOTTOM_LEFT).position.x;
        let right = Self::vertex(verts, self.last, BOTTOM_RIGHT).position.x;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for quad in self.first..=self.last {
            let bottom_left = Self::vertex(verts, quad, BOTTOM_LEFT).position.y;
            let bottom_right = Self::vertex(verts, quad, BOTTOM_RIGHT).position.y;
            let top_left = Self::vertex(verts, quad, TOP_LEFT).position.y;
            let top_right = Self::vertex(verts, quad, TOP_RIGHT).position.y;
            min_y = min_y.min(bottom_left).min(bottom_right);
            max_y = max_y.max(top_left).max(top_right);
        }
        (left, right, min_y, max_y)
    }
}

/// Split the quads of `range` into visual lines
fn line_segments(range: &Range<usize>, verts: &[UIVertex], font_size: f32) -> Vec<LineSegment> {
    let first_quad = range.start / QUAD_VERTICES;
    let quad_count = range.len() / QUAD_VERTICES;
    if quad_count == 0 {
        return Vec::new();
    }
    let last_quad = first_quad + quad_count - 1;
    let half_font = font_size * 0.5;

    let mut segments = Vec::new();
    let mut segment_start = first_quad;
    for quad in first_quad + 1..=last_quad {
        let line_bottom = LineSegment::vertex(verts, segment_start, BOTTOM_LEFT).position.y;
        let bottom = LineSegment::vertex(verts, quad, BOTTOM_RIGHT).position.y;
        if (bottom - line_bottom).abs() > half_font {
            segments.push(LineSegment { first: segment_start, last: quad - 1 });
            segment_start = quad;
        }
    }
    segments.push(LineSegment { first: segment_start, last: last_quad });
    segments
}

/// Underline `range`, emitting one bar per visual line
pub fn apply_underline(
    params: &UnderlineParams,
    range: Range<usize>,
    verts: &[UIVertex],
    context: &EffectContext,
    icons: &mut Vec<IconPlaceholder>,
    events: &mut Vec<EventRect>,
) {
    let units_per_pixel = context.geometry.units_per_pixel();
    let correction = context.geometry.pivot_correction();
    let color = if params.color == Color32::WHITE {
        context.text_color
    } else {
        params.color
    };

    for segment in line_segments(&range, verts, context.font_size) {
        let (left, right, min_y, max_y) = segment.bounds(verts);
        let width = (right - left) * units_per_pixel;
        let size = Vec2::new(width, params.thickness);
        let position = Vec2::new(left, min_y) * units_per_pixel
            + Vec2::new(width * 0.5, -params.thickness * 0.5)
            + correction;
        icons.push(IconPlaceholder::still(size, position, color));

        if let Some(name) = &params.event {
            events.push(EventRect::new(
                name.as_str(),
                params.args.as_deref(),
                Rect::new(
                    left * units_per_pixel,
                    min_y * units_per_pixel,
                    width,
                    (max_y - min_y) * units_per_pixel,
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Vec3;
    use crate::geometry::ContainerGeometry;
    use approx::assert_relative_eq;

    /// Glyph quad from x0 to x1 with its bottom at `bottom` and top at `bottom + 10`
    fn quad(x0: f32, x1: f32, bottom: f32) -> [UIVertex; 4] {
        let v = |x: f32, y: f32| UIVertex::new(Vec3::new(x, y, 0.0), Color32::WHITE, Vec2::zeros());
        [v(x0, bottom + 10.0), v(x1, bottom + 10.0), v(x1, bottom), v(x0, bottom)]
    }

    fn context() -> EffectContext {
        EffectContext {
            font_size: 10.0,
            text_color: Color32::rgb(10, 20, 30),
            geometry: ContainerGeometry::new(Vec2::new(100.0, 100.0), Vec2::new(0.5, 0.5)),
        }
    }

    #[test]
    fn test_single_line_bar() {
        let verts: Vec<UIVertex> = [quad(0.0, 5.0, -10.0), quad(5.0, 10.0, -10.0), quad(10.0, 15.0, -10.0)]
            .into_iter()
            .flatten()
            .collect();
        let params = UnderlineParams { event: Some("link".into()), ..UnderlineParams::default() };
        let (mut icons, mut events) = (Vec::new(), Vec::new());

        apply_underline(&params, 0..12, &verts, &context(), &mut icons, &mut events);

        assert_eq!(icons.len(), 1);
        let bar = &icons[0];
        assert!(bar.still);
        assert!(bar.sprite_name.is_none());
        assert_relative_eq!(bar.size, Vec2::new(15.0, 1.5));
        assert_relative_eq!(bar.position, Vec2::new(7.5, -10.75));
        // White means unset: the text colour is used
        assert_eq!(bar.color, Color32::rgb(10, 20, 30));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].rect, Rect::new(0.0, -10.0, 15.0, 10.0));
    }

    #[test]
    fn test_wrapped_run_gets_one_bar_per_line() {
        let verts: Vec<UIVertex> = [
            quad(80.0, 85.0, -10.0),
            quad(85.0, 90.0, -10.0),
            quad(0.0, 5.0, -22.0),
            quad(5.0, 10.0, -22.0),
            quad(10.0, 15.0, -22.0),
        ]
        .into_iter()
        .flatten()
        .collect();
        let params = UnderlineParams { color: Color32::rgb(255, 0, 0), ..UnderlineParams::default() };
        let (mut icons, mut events) = (Vec::new(), Vec::new());

        apply_underline(&params, 0..20, &verts, &context(), &mut icons, &mut events);

        assert_eq!(icons.len(), 2);
        assert_relative_eq!(icons[0].size.x, 10.0);
        assert_relative_eq!(icons[1].size.x, 15.0);
        assert_eq!(icons[1].color, Color32::rgb(255, 0, 0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_last_quad_alone_on_new_line() {
        let verts: Vec<UIVertex> = [quad(0.0, 5.0, -10.0), quad(0.0, 5.0, -22.0)]
            .into_iter()
            .flatten()
            .collect();
        let (mut icons, mut events) = (Vec::new(), Vec::new());

        apply_underline(&UnderlineParams::default(), 0..8, &verts, &context(), &mut icons, &mut events);

        assert_eq!(icons.len(), 2);
        assert_relative_eq!(icons[1].position.y, -22.75);
    }

    #[test]
    fn test_empty_range_emits_nothing() {
        let (mut icons, mut events) = (Vec::new(), Vec::new());
        apply_underline(&UnderlineParams::default(), 4..4, &[], &context(), &mut icons, &mut events);
        assert!(icons.is_empty());
    }
}
