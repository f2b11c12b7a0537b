//! Markup scanning
//!
//! Two tag families are recognised:
//!
//! - `<icon name=IDENT [w=F] [h=F] [event=S] [args=S] [align=top|center|bottom]/>`
//!   is replaced by filler characters before shaping ([`icon_resolver`]).
//! - `<material=shadow|outline|gradient|underline ...>...</material>` is left in
//!   the text (the shaper collapses it) and parsed into effect regions after
//!   shaping ([`tag_parser`]).
//!
//! All offsets are character indices, matching the shaper's one quad per
//! character contract.

pub mod attributes;
pub mod tag_parser;
pub mod icon_resolver;

pub use tag_parser::{
    Effect, EffectKind, GradientParams, ShadowParams, TagParser, TagRegion, UnderlineParams,
};
pub use icon_resolver::{IconAlign, IconPlaceholder, IconResolver, ResolvedIcons, SpriteLookup};

/// Converts increasing byte offsets of one string into character indices
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    /// Character index of `byte`, which must lie on a char boundary
    fn char_index(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Character index of a byte offset
pub fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Byte offset of a character index, or the string length past the end
pub fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_and_byte_indices() {
        let text = "aé<b>";
        assert_eq!(char_index(text, 3), 2);
        assert_eq!(byte_index(text, 2), 3);
        assert_eq!(byte_index(text, 99), text.len());
    }

    #[test]
    fn test_cursor_rewinds() {
        let text = "añb";
        let mut cursor = CharCursor::new(text);
        assert_eq!(cursor.char_index(3), 2);
        assert_eq!(cursor.char_index(1), 1);
        assert_eq!(cursor.char_index(4), 3);
    }
}
