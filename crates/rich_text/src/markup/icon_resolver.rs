//! Inline icon placeholder resolution
//!
//! Every `<icon .../>` tag is replaced by enough filler characters to cover
//! the icon's width, and an [`IconPlaceholder`] records where those
//! characters start. The tags are spliced one at a time, rescanning after
//! each splice, because a splice shifts every later character offset.

use std::sync::LazyLock;

use regex::Regex;

use super::attributes::{attributes, parse_float_or};
use super::char_index;
use crate::foundation::{Color32, Vec2};

static ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<icon name=([^>\s]+)([^>]*)/>").expect("icon regex is valid")
});

/// Source of native sprite sizes for icon measurement
pub trait SpriteLookup {
    /// Native pixel size of the named sprite, if it is registered
    fn native_size(&self, name: &str) -> Option<Vec2>;
}

impl SpriteLookup for std::collections::HashMap<String, Vec2> {
    fn native_size(&self, name: &str) -> Option<Vec2> {
        self.get(name).copied()
    }
}

/// Vertical alignment of an icon against its text line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconAlign {
    /// Top aligned with the ascender
    Top,
    /// Centred on the x-height
    #[default]
    Center,
    /// Bottom hangs below the baseline
    Bottom,
}

impl IconAlign {
    /// Parse an `align=` value; anything unknown centres
    pub fn parse(value: &str) -> Self {
        match value {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            _ => Self::Center,
        }
    }

    /// Vertical offset of the icon centre from its anchor vertex
    pub fn offset(self, font_size: f32, icon_height: f32) -> f32 {
        let half_font = font_size * 0.5;
        match self {
            Self::Top => (half_font - icon_height) * 0.5 + half_font,
            Self::Bottom => (icon_height - half_font) * 0.5,
            Self::Center => half_font * 0.5,
        }
    }
}

/// Inline image (or decorative still bar) placed over reserved characters
#[derive(Debug, Clone, PartialEq)]
pub struct IconPlaceholder {
    /// Sprite to display; `None` for still icons
    pub sprite_name: Option<String>,
    /// Size in local units
    pub size: Vec2,
    /// Vertical alignment
    pub align: IconAlign,
    /// Click event name
    pub event: Option<String>,
    /// Click event arguments
    pub args: Option<String>,
    /// First filler character in the shaped text
    pub char_offset: usize,
    /// Number of filler characters reserved
    pub placeholder_len: usize,
    /// Centre position in container child space, set by positioning
    pub position: Vec2,
    /// Tint colour
    pub color: Color32,
    /// Still icons are shown even without a sprite (underline bars)
    pub still: bool,
}

impl IconPlaceholder {
    /// Decorative bar with no sprite and no reserved characters
    pub fn still(size: Vec2, position: Vec2, color: Color32) -> Self {
        Self {
            sprite_name: None,
            size,
            align: IconAlign::Center,
            event: None,
            args: None,
            char_offset: 0,
            placeholder_len: 0,
            position,
            color,
            still: true,
        }
    }

    /// Index of the first vertex of the placeholder quads
    pub const fn first_vertex(&self) -> usize {
        self.char_offset * 4
    }

    /// Number of vertices covered by the placeholder quads
    pub const fn vertex_len(&self) -> usize {
        self.placeholder_len * 4
    }
}

/// Result of placeholder substitution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIcons {
    /// Markup with icon tags replaced by filler characters
    pub text: String,
    /// Icons in text order
    pub icons: Vec<IconPlaceholder>,
}

/// Upper bound on filler characters spliced for one icon
pub const MAX_PLACEHOLDER_LEN: usize = 1024;

/// Replaces icon tags with filler characters
#[derive(Debug, Clone, Copy)]
pub struct IconResolver {
    font_size: f32,
    filler_width: f32,
    filler_char: char,
    max_len: usize,
}

impl IconResolver {
    /// Create a resolver
    ///
    /// `filler_width` is the advance of one filler character in local units
    /// and must be positive.
    pub fn new(font_size: f32, filler_width: f32, filler_char: char) -> Self {
        debug_assert!(filler_width > 0.0, "filler width must be positive");
        Self { font_size, filler_width, filler_char, max_len: MAX_PLACEHOLDER_LEN }
    }

    /// Cap placeholders at the fillers needed to span `width` local units
    pub fn with_max_width(mut self, width: f32) -> Self {
        let fit = (width / self.filler_width).ceil();
        self.max_len = if fit.is_nan() || fit < 1.0 {
            1
        } else if fit >= MAX_PLACEHOLDER_LEN as f32 {
            MAX_PLACEHOLDER_LEN
        } else {
            fit as usize
        };
        self
    }

    /// Number of filler characters needed to cover `width`
    ///
    /// At least one, at most the resolver's cap.
    pub fn placeholder_len(&self, width: f32) -> usize {
        let count = (width / self.filler_width).ceil();
        if count.is_nan() || count < 1.0 {
            1
        } else if count >= self.max_len as f32 {
            self.max_len
        } else {
            count as usize
        }
    }

    /// Substitute every icon tag in `text`
    pub fn resolve(&self, text: &str, sprites: &dyn SpriteLookup) -> ResolvedIcons {
        let mut text = text.to_string();
        let mut icons = Vec::new();

        while let Some(caps) = ICON_RE.captures(&text) {
            let Some(whole) = caps.get(0) else { break };
            let name = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let attrs = caps.get(2).map_or("", |m| m.as_str());

            let mut icon = self.build_icon(name, attrs, sprites);
            icon.char_offset = char_index(&text, whole.start());
            icon.placeholder_len = self.placeholder_len(icon.size.x);

            let filler: String = std::iter::repeat(self.filler_char)
                .take(icon.placeholder_len)
                .collect();
            let range = whole.range();
            text.replace_range(range, &filler);
            icons.push(icon);
        }

        ResolvedIcons { text, icons }
    }

    fn build_icon(&self, name: String, attrs: &str, sprites: &dyn SpriteLookup) -> IconPlaceholder {
        let mut scale = Vec2::new(1.0, 1.0);
        let mut event = None;
        let mut args = None;
        let mut align = IconAlign::Center;

        for (key, value) in attributes(attrs) {
            match key {
                "w" => scale.x = parse_float_or(value, scale.x),
                "h" => scale.y = parse_float_or(value, scale.y),
                "event" => event = Some(value.to_string()),
                "args" => args = Some(value.to_string()),
                "align" => align = IconAlign::parse(value),
                _ => {}
            }
        }

        let size = sprites.native_size(&name).map_or_else(
            || {
                log::debug!("Icon '{}' has no sprite, reserving half font size", name);
                let half_font = self.font_size * 0.5;
                Vec2::new(half_font, half_font)
            },
            |native| native.component_mul(&scale),
        );

        IconPlaceholder {
            sprite_name: Some(name),
            size,
            align,
            event,
            args,
            char_offset: 0,
            placeholder_len: 0,
            position: Vec2::zeros(),
            color: Color32::WHITE,
            still: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sprites() -> HashMap<String, Vec2> {
        let mut map = HashMap::new();
        map.insert("star".to_string(), Vec2::new(16.0, 16.0));
        map.insert("wide".to_string(), Vec2::new(25.0, 10.0));
        map
    }

    #[test]
    fn test_placeholder_count_rounds_up() {
        let resolver = IconResolver::new(20.0, 10.0, ' ');
        let resolved = resolver.resolve("<icon name=wide/>", &sprites());

        // 25 / 10 = 2.5 filler characters -> 3
        assert_eq!(resolved.icons[0].placeholder_len, 3);
        assert_eq!(resolved.text, "   ");
    }

    #[test]
    fn test_huge_scale_is_capped() {
        let resolver = IconResolver::new(20.0, 5.0, ' ').with_max_width(100.0);
        let resolved = resolver.resolve("a<icon name=star w=1e30/>b", &sprites());

        assert_eq!(resolved.icons[0].placeholder_len, 20);
        assert_eq!(resolved.text.chars().count(), 22);
        assert!(resolved.icons[0].size.x.is_finite());

        let uncapped = IconResolver::new(20.0, 5.0, ' ');
        assert_eq!(uncapped.placeholder_len(f32::MAX), MAX_PLACEHOLDER_LEN);
        assert_eq!(uncapped.placeholder_len(f32::INFINITY), MAX_PLACEHOLDER_LEN);
        assert_eq!(uncapped.placeholder_len(f32::NAN), 1);
    }

    #[test]
    fn test_attributes_and_scale() {
        let resolver = IconResolver::new(20.0, 8.0, ' ');
        let resolved = resolver.resolve(
            "Hi<icon name=star w=2 h=0.5 event=click args=1 align=top/>!",
            &sprites(),
        );

        let icon = &resolved.icons[0];
        assert_eq!(icon.sprite_name.as_deref(), Some("star"));
        assert_eq!(icon.size, Vec2::new(32.0, 8.0));
        assert_eq!(icon.align, IconAlign::Top);
        assert_eq!(icon.event.as_deref(), Some("click"));
        assert_eq!(icon.args.as_deref(), Some("1"));
        assert_eq!(icon.char_offset, 2);
        assert_eq!(icon.placeholder_len, 4);
        assert_eq!(resolved.text, "Hi    !");
    }

    #[test]
    fn test_missing_sprite_uses_half_font_size() {
        let resolver = IconResolver::new(20.0, 5.0, '_');
        let resolved = resolver.resolve("<icon name=ghost/>", &sprites());

        assert_eq!(resolved.icons[0].size, Vec2::new(10.0, 10.0));
        assert_eq!(resolved.text, "__");
    }

    #[test]
    fn test_offsets_follow_earlier_splices() {
        let resolver = IconResolver::new(20.0, 8.0, ' ');
        let resolved = resolver.resolve("a<icon name=star/>b<icon name=star/>c", &sprites());

        assert_eq!(resolved.icons.len(), 2);
        assert_eq!(resolved.icons[0].char_offset, 1);
        // 'a' + 2 fillers + 'b'
        assert_eq!(resolved.icons[1].char_offset, 4);
        assert_eq!(resolved.icons[1].first_vertex(), 16);
        assert_eq!(resolved.text, "a  b  c");
    }

    #[test]
    fn test_align_offsets() {
        assert_eq!(IconAlign::Center.offset(20.0, 16.0), 5.0);
        assert_eq!(IconAlign::Top.offset(20.0, 16.0), 7.0);
        assert_eq!(IconAlign::Bottom.offset(20.0, 16.0), 3.0);
        assert_eq!(IconAlign::parse("middle"), IconAlign::Center);
    }
}
