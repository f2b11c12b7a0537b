//! Line-wrap correction for inline icons
//!
//! Filler characters are whitespace, so the shaper lets an icon's
//! placeholder hang past the right edge instead of wrapping it. This pass
//! finds such icons, inserts a line break in front of them and re-shapes.

use super::shaping::{GenerationSettings, ShapingEngine, UIVertex, QUAD_VERTICES};
use super::{vertex_at, LayoutError};
use crate::geometry::ContainerGeometry;
use crate::markup::{byte_index, IconPlaceholder};

/// Break sequence inserted before an overflowing icon
pub const LINE_BREAK: &str = "\r\n";

/// Characters in [`LINE_BREAK`]
const LINE_BREAK_CHARS: usize = 2;

/// Check whether the character at `char_offset` begins a visual line
fn starts_line(text: &str, char_offset: usize) -> bool {
    char_offset == 0 || text.chars().nth(char_offset - 1) == Some('\n')
}

/// Break lines in front of icons that overflow the container
///
/// Icons are checked first to last. After an insertion every icon at or
/// after the broken one shifts by two characters, the text is re-shaped and
/// the same icon is checked again. An icon that already starts a line is
/// never broken again, so a corrected layout is a fixed point.
///
/// # Returns
/// Number of line breaks inserted
pub fn correct_wraps<S: ShapingEngine + ?Sized>(
    text: &mut String,
    icons: &mut [IconPlaceholder],
    verts: &mut Vec<UIVertex>,
    shaper: &mut S,
    settings: &GenerationSettings,
    geometry: &ContainerGeometry,
) -> Result<usize, LayoutError> {
    let units_per_pixel = geometry.units_per_pixel();
    let right_edge = geometry.rect().x_max();
    let mut insertions = 0;
    let mut index = 0;

    while index < icons.len() {
        let vertex_count = verts.len().saturating_sub(QUAD_VERTICES);
        let icon = &icons[index];
        let max_vertex = (icon.first_vertex() + icon.vertex_len()).min(vertex_count);
        if max_vertex < 2 {
            index += 1;
            continue;
        }

        let right = vertex_at(verts, max_vertex - 2)?.position.x * units_per_pixel;
        let offset = icon.char_offset;
        if right <= right_edge || starts_line(text, offset) {
            index += 1;
            continue;
        }

        let byte = byte_index(text, offset);
        text.insert_str(byte, LINE_BREAK);
        for icon in icons.iter_mut().filter(|icon| icon.char_offset >= offset) {
            icon.char_offset += LINE_BREAK_CHARS;
        }
        *verts = shaper.shape(text, settings)?;
        insertions += 1;

        log::debug!(
            "Icon {} overflowed the right edge ({:.1} > {:.1}), broke line at char {}",
            index, right, right_edge, offset
        );
    }

    Ok(insertions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Vec2;
    use crate::layout::monospace::MonospaceShaper;
    use crate::markup::IconResolver;
    use std::collections::HashMap;

    /// 10px font (5px advance) in a 50x100 box with a top-left pivot
    fn setup() -> (GenerationSettings, ContainerGeometry, HashMap<String, Vec2>) {
        let geometry = ContainerGeometry::new(Vec2::new(50.0, 100.0), Vec2::new(0.0, 1.0));
        let settings = GenerationSettings {
            extents: geometry.size,
            pivot: geometry.pivot,
            font_size: 10.0,
            ..GenerationSettings::default()
        };
        let mut sprites = HashMap::new();
        sprites.insert("star".to_string(), Vec2::new(20.0, 20.0));
        (settings, geometry, sprites)
    }

    fn run(markup: &str) -> (String, Vec<IconPlaceholder>, Vec<UIVertex>, usize) {
        let (settings, geometry, sprites) = setup();
        let mut shaper = MonospaceShaper::new();
        let resolved = IconResolver::new(10.0, 5.0, ' ').resolve(markup, &sprites);
        let mut text = resolved.text;
        let mut icons = resolved.icons;
        let mut verts = shaper.shape(&text, &settings).unwrap();
        let inserted = correct_wraps(&mut text, &mut icons, &mut verts, &mut shaper, &settings, &geometry)
            .unwrap();
        (text, icons, verts, inserted)
    }

    #[test]
    fn test_overflowing_icon_moves_to_next_line() {
        // 8 chars = 40px, the 4-filler icon would end at 60px
        let (text, icons, verts, inserted) = run("abcdefgh<icon name=star/>");

        assert_eq!(inserted, 1);
        assert_eq!(text, "abcdefgh\r\n    ");
        assert_eq!(icons[0].char_offset, 10);
        let anchor = verts[icons[0].first_vertex()].position;
        assert_eq!(anchor.x, 0.0);
    }

    #[test]
    fn test_fitting_icon_is_untouched() {
        let (text, icons, _, inserted) = run("ab<icon name=star/>");

        assert_eq!(inserted, 0);
        assert_eq!(text, "ab    ");
        assert_eq!(icons[0].char_offset, 2);
    }

    #[test]
    fn test_later_icons_shift_with_insertion() {
        let (_, icons, _, inserted) = run("abcdefgh<icon name=star/><icon name=star/>");

        // Second icon starts a line as well after the first moved
        assert!(inserted >= 1);
        assert_eq!(icons[1].char_offset, icons[0].char_offset + 4 + 2 * (inserted - 1));
    }

    #[test]
    fn test_correction_is_a_fixed_point() {
        let (settings, geometry, _) = setup();
        let (mut text, mut icons, mut verts, inserted) = run("abcdefgh<icon name=star/> and more");
        assert_eq!(inserted, 1);

        let mut shaper = MonospaceShaper::new();
        let again = correct_wraps(&mut text, &mut icons, &mut verts, &mut shaper, &settings, &geometry)
            .unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn test_icon_wider_than_container_breaks_once() {
        let (settings, geometry, _) = setup();
        let mut sprites = HashMap::new();
        sprites.insert("banner".to_string(), Vec2::new(80.0, 10.0));
        let mut shaper = MonospaceShaper::new();
        let resolved = IconResolver::new(10.0, 5.0, ' ').resolve("ab<icon name=banner/>", &sprites);
        let mut text = resolved.text;
        let mut icons = resolved.icons;
        let mut verts = shaper.shape(&text, &settings).unwrap();

        let inserted = correct_wraps(&mut text, &mut icons, &mut verts, &mut shaper, &settings, &geometry)
            .unwrap();
        assert_eq!(inserted, 1);
    }
}
