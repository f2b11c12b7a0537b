//! Icon positioning
//!
//! Converts each icon's anchor vertex (top-left of its first filler quad)
//! into a centre position in container child space and, for icons with an
//! event, a clickable rectangle.

use super::shaping::UIVertex;
use super::{vertex_at, LayoutError};
use crate::events::EventRect;
use crate::foundation::{Color32, Rect, Vec2};
use crate::geometry::ContainerGeometry;
use crate::markup::IconPlaceholder;

/// Position icons against the shaped vertices
///
/// Walks the icons last to first so removals do not disturb the indices
/// still to be visited. An icon whose anchor lies at or past `vertex_count`
/// lost its placeholder and is dropped.
///
/// # Returns
/// Event rectangles of the surviving icons, in visiting order
pub fn position_icons(
    icons: &mut Vec<IconPlaceholder>,
    verts: &[UIVertex],
    vertex_count: usize,
    font_size: f32,
    geometry: &ContainerGeometry,
) -> Result<Vec<EventRect>, LayoutError> {
    let units_per_pixel = geometry.units_per_pixel();
    let correction = geometry.pivot_correction();
    let mut events = Vec::new();

    for index in (0..icons.len()).rev() {
        let anchor_index = icons[index].first_vertex();
        if anchor_index >= vertex_count {
            log::debug!("Dropping icon {} (anchor vertex {} >= {})", index, anchor_index, vertex_count);
            icons.remove(index);
            continue;
        }

        let anchor = vertex_at(verts, anchor_index)?.xy() * units_per_pixel;
        let icon = &mut icons[index];
        let offset = icon.align.offset(font_size, icon.size.y);

        icon.position = anchor + correction + Vec2::new(icon.size.x * 0.5, offset);
        icon.color = Color32::WHITE;

        if let Some(name) = &icon.event {
            events.push(EventRect::new(
                name.as_str(),
                icon.args.as_deref(),
                Rect::new(anchor.x, anchor.y + offset - icon.size.y * 0.5, icon.size.x, icon.size.y),
            ));
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Vec3;
    use crate::markup::IconAlign;
    use approx::assert_relative_eq;

    fn icon(char_offset: usize, align: IconAlign, event: Option<&str>) -> IconPlaceholder {
        IconPlaceholder {
            sprite_name: Some("star".to_string()),
            size: Vec2::new(16.0, 16.0),
            align,
            event: event.map(str::to_string),
            args: Some("1".to_string()),
            char_offset,
            placeholder_len: 2,
            position: Vec2::zeros(),
            color: Color32::BLACK,
            still: false,
        }
    }

    fn verts(count: usize) -> Vec<UIVertex> {
        (0..count)
            .map(|i| UIVertex::new(Vec3::new(i as f32 * 10.0, -8.0, 0.0), Color32::WHITE, Vec2::zeros()))
            .collect()
    }

    #[test]
    fn test_center_aligned_position_and_rect() {
        let geometry = ContainerGeometry::new(Vec2::new(100.0, 40.0), Vec2::new(0.5, 0.5));
        let mut icons = vec![icon(1, IconAlign::Center, Some("click"))];

        let events = position_icons(&mut icons, &verts(16), 12, 20.0, &geometry).unwrap();

        // Anchor is vertex 4 at (40, -8); centre offset is a quarter font size
        assert_relative_eq!(icons[0].position, Vec2::new(48.0, -3.0));
        assert_eq!(icons[0].color, Color32::WHITE);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "click");
        assert_eq!(events[0].args, "1");
        assert_relative_eq!(events[0].rect.x, 40.0);
        assert_relative_eq!(events[0].rect.y, -11.0);
        assert!(events[0].rect.contains(icons[0].position));
    }

    #[test]
    fn test_pivot_correction_and_scale() {
        let mut geometry = ContainerGeometry::new(Vec2::new(100.0, 40.0), Vec2::new(0.0, 1.0));
        geometry.pixels_per_unit = 2.0;
        let mut icons = vec![icon(0, IconAlign::Bottom, None)];

        let events = position_icons(&mut icons, &verts(8), 8, 20.0, &geometry).unwrap();

        // Anchor (0, -4) in units, correction (-50, 20), bottom offset (16 - 10) / 2
        assert_relative_eq!(icons[0].position, Vec2::new(-42.0, 19.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_icons_past_vertex_range_are_dropped() {
        let geometry = ContainerGeometry::default();
        let mut icons = vec![
            icon(0, IconAlign::Center, Some("a")),
            icon(5, IconAlign::Center, Some("b")),
            icon(1, IconAlign::Top, Some("c")),
        ];

        let events = position_icons(&mut icons, &verts(24), 20, 20.0, &geometry).unwrap();

        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].event.as_deref(), Some("a"));
        assert_eq!(icons[1].event.as_deref(), Some("c"));
        // Visited last to first
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }
}
