//! Nested `<material>` tag parser
//!
//! Scans the markup once, pairing every `</material>` with the most recently
//! opened `<material=...>` (LIFO; all effect tags share one closing token).
//! Regions are emitted in closure order, so an inner tag comes before the tag
//! that encloses it.
//!
//! Malformed input never fails: unmatched closers and unknown effect types
//! are ignored, unclosed openers are dropped when the scan ends.

use std::sync::LazyLock;

use regex::Regex;

use super::attributes::{attributes, parse_color_or, parse_float_or};
use super::CharCursor;
use crate::foundation::{Color32, Vec2};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</*material[^>]*>").expect("material tag regex is valid")
});

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<material=([^>\s]+)([^>]*)>").expect("material open regex is valid")
});

const CLOSE_TAG: &str = "</material>";

/// Parameters shared by shadow and outline
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowParams {
    /// Shadow colour; its alpha is scaled by the glyph alpha
    pub color: Color32,
    /// Translation in pixels
    pub offset: Vec2,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            offset: Vec2::new(1.0, -1.0),
        }
    }
}

/// Linear gradient parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GradientParams {
    /// Colour at the minimum projection
    pub from: Color32,
    /// Colour at the maximum projection
    pub to: Color32,
    /// Direction the positions are projected onto
    pub direction: Vec2,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            from: Color32::WHITE,
            to: Color32::BLACK,
            direction: Vec2::new(0.0, -1.0),
        }
    }
}

/// Underline parameters
#[derive(Debug, Clone, PartialEq)]
pub struct UnderlineParams {
    /// Bar colour; white means "use the text colour"
    pub color: Color32,
    /// Bar thickness in local units
    pub thickness: f32,
    /// Click event name
    pub event: Option<String>,
    /// Click event arguments
    pub args: Option<String>,
}

impl Default for UnderlineParams {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            thickness: 1.5,
            event: None,
            args: None,
        }
    }
}

/// Effect kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Offset drop shadow
    Shadow,
    /// Four-way outline
    Outline,
    /// Linear colour gradient
    Gradient,
    /// Underline bar with optional click event
    Underline,
}

/// Effect with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `<material=shadow>`
    Shadow(ShadowParams),
    /// `<material=outline>`
    Outline(ShadowParams),
    /// `<material=gradient>`
    Gradient(GradientParams),
    /// `<material=underline>`
    Underline(UnderlineParams),
}

impl Effect {
    /// Kind tag of this effect
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Shadow(_) => EffectKind::Shadow,
            Self::Outline(_) => EffectKind::Outline,
            Self::Gradient(_) => EffectKind::Gradient,
            Self::Underline(_) => EffectKind::Underline,
        }
    }

    fn from_type(type_name: &str, attrs: &str) -> Option<Self> {
        let effect = match type_name {
            "shadow" => Self::Shadow(shadow_params(attrs)),
            "outline" => Self::Outline(shadow_params(attrs)),
            "gradient" => Self::Gradient(gradient_params(attrs)),
            "underline" => Self::Underline(underline_params(attrs)),
            _ => return None,
        };
        Some(effect)
    }
}

fn shadow_params(attrs: &str) -> ShadowParams {
    let mut params = ShadowParams::default();
    for (key, value) in attributes(attrs) {
        match key {
            "c" => params.color = parse_color_or(value, params.color),
            "x" => params.offset.x = parse_float_or(value, params.offset.x),
            "y" => params.offset.y = parse_float_or(value, params.offset.y),
            _ => {}
        }
    }
    params
}

fn gradient_params(attrs: &str) -> GradientParams {
    let mut params = GradientParams::default();
    for (key, value) in attributes(attrs) {
        match key {
            "from" => params.from = parse_color_or(value, params.from),
            "to" => params.to = parse_color_or(value, params.to),
            "x" => params.direction.x = parse_float_or(value, params.direction.x),
            "y" => params.direction.y = parse_float_or(value, params.direction.y),
            _ => {}
        }
    }
    params
}

fn underline_params(attrs: &str) -> UnderlineParams {
    let mut params = UnderlineParams::default();
    for (key, value) in attributes(attrs) {
        match key {
            "c" => params.color = parse_color_or(value, params.color),
            "h" => params.thickness = parse_float_or(value, params.thickness),
            "event" => params.event = Some(value.to_string()),
            "args" => params.args = Some(value.to_string()),
            _ => {}
        }
    }
    params
}

/// Closed effect region over the inclusive character range `[start, end]`
#[derive(Debug, Clone, PartialEq)]
pub struct TagRegion {
    /// First character covered
    pub start: usize,
    /// Last character covered (inclusive)
    pub end: usize,
    /// Effect applied to the range
    pub effect: Effect,
}

impl TagRegion {
    /// Kind tag of the region's effect
    pub const fn kind(&self) -> EffectKind {
        self.effect.kind()
    }

    /// Number of characters covered
    pub const fn char_len(&self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug)]
struct OpenTag {
    text: String,
    start: usize,
}

impl OpenTag {
    fn close(self, end: usize) -> Option<TagRegion> {
        let caps = OPEN_TAG_RE.captures(&self.text)?;
        let type_name = caps.get(1)?.as_str();
        // `<material=#...>` is host colour shorthand, not an effect
        if type_name.starts_with('#') {
            return None;
        }
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let effect = Effect::from_type(type_name, attrs)?;
        Some(TagRegion { start: self.start, end, effect })
    }
}

/// Stack-based `<material>` tag parser
///
/// Holds its scratch stack between calls so repeated passes reuse the
/// allocation; every call starts from an empty stack.
#[derive(Debug, Default)]
pub struct TagParser {
    open: Vec<OpenTag>,
}

impl TagParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into closed regions, ordered by closure
    pub fn parse(&mut self, text: &str) -> Vec<TagRegion> {
        self.open.clear();
        let mut regions = Vec::new();
        let mut cursor = CharCursor::new(text);

        for m in TAG_RE.find_iter(text) {
            if m.as_str() == CLOSE_TAG {
                let Some(open) = self.open.pop() else {
                    log::trace!("Ignoring unmatched </material> at byte {}", m.start());
                    continue;
                };
                let match_start = cursor.char_index(m.start());
                // Empty body: the closer sits right at the opener's end
                if match_start <= open.start {
                    continue;
                }
                if let Some(region) = open.close(match_start - 1) {
                    regions.push(region);
                }
            } else {
                let start = cursor.char_index(m.end());
                self.open.push(OpenTag { text: m.as_str().to_string(), start });
            }
        }

        if !self.open.is_empty() {
            log::trace!("Dropping {} unclosed material tag(s)", self.open.len());
            self.open.clear();
        }
        regions
    }
}
