//! Monospace reference shaper
//!
//! A headless [`ShapingEngine`] with fixed glyph metrics. Hosts plug in their
//! real font engine; this one drives the demo and the tests and follows the
//! same vertex contract:
//!
//! - host tags (`material`, `color`, `size`, `b`, `i`) become zero-area quads,
//!   `<color=...>` also tints the glyphs it encloses;
//! - words wrap at the container's right edge, whitespace never wraps and may
//!   hang past it;
//! - `\n` starts a new line, `\r` is a zero-width quad;
//! - a terminator quad follows the last character.

use std::sync::LazyLock;

use regex::Regex;

use super::shaping::{GenerationSettings, ShapingEngine, ShapingError, UIVertex};
use crate::foundation::{Color32, Vec2, Vec3};
use crate::markup::char_index;

static HOST_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)(material|color|size|b|i)\b([^>]*)>").expect("host tag regex is valid")
});

const WRAP_EPSILON: f32 = 1e-3;

/// What a collapsed tag does to the running style
#[derive(Debug, Clone, Copy, PartialEq)]
enum StyleAction {
    None,
    PushColor(Color32),
    PopColor,
}

/// Per-character markup classification
#[derive(Debug, Clone, Copy, PartialEq)]
enum CharClass {
    Text,
    Markup(StyleAction),
}

/// Monospace shaping engine
#[derive(Debug, Clone)]
pub struct MonospaceShaper {
    /// Advance as a fraction of the font size
    pub advance_ratio: f32,
    /// Ascent as a fraction of the font size
    pub ascent_ratio: f32,
    /// Descent as a fraction of the font size
    pub descent_ratio: f32,
    /// Line height as a fraction of the font size
    pub line_height_ratio: f32,
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
            line_height_ratio: 1.2,
        }
    }
}

/// Running layout state for one shape call
struct LineCursor {
    left: f32,
    right: f32,
    x: f32,
    baseline: f32,
    line_height: f32,
    /// First quad of the word being laid out
    word_start: Option<usize>,
}

impl LineCursor {
    fn new_line(&mut self) {
        self.x = self.left;
        self.baseline -= self.line_height;
        self.word_start = None;
    }

    fn at_line_start(&self) -> bool {
        self.x <= self.left + WRAP_EPSILON
    }
}

impl MonospaceShaper {
    /// Create a shaper with default metrics
    pub fn new() -> Self {
        Self::default()
    }

    fn classify(text: &str) -> Vec<CharClass> {
        let mut classes = vec![CharClass::Text; text.chars().count()];
        for caps in HOST_TAG_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let name = caps.get(2).map_or("", |m| m.as_str());
            let value = caps.get(3).map_or("", |m| m.as_str());

            let action = match (name, closing) {
                ("color", false) => value
                    .trim()
                    .strip_prefix('=')
                    .and_then(Color32::parse_html)
                    .map_or(StyleAction::None, StyleAction::PushColor),
                ("color", true) => StyleAction::PopColor,
                _ => StyleAction::None,
            };

            let start = char_index(text, whole.start());
            let end = start + whole.as_str().chars().count();
            classes[start] = CharClass::Markup(action);
            for class in &mut classes[start + 1..end] {
                *class = CharClass::Markup(StyleAction::None);
            }
        }
        classes
    }

    fn degenerate_quad(x: f32, y: f32, color: Color32) -> [UIVertex; 4] {
        let position = Vec3::new(x, y, 0.0);
        [UIVertex::new(position, color, Vec2::zeros()); 4]
    }

    fn glyph_quad(x_min: f32, x_max: f32, y_min: f32, y_max: f32, color: Color32) -> [UIVertex; 4] {
        [
            // Top-left
            UIVertex::new(Vec3::new(x_min, y_max, 0.0), color, Vec2::new(0.0, 0.0)),
            // Top-right
            UIVertex::new(Vec3::new(x_max, y_max, 0.0), color, Vec2::new(1.0, 0.0)),
            // Bottom-right
            UIVertex::new(Vec3::new(x_max, y_min, 0.0), color, Vec2::new(1.0, 1.0)),
            // Bottom-left
            UIVertex::new(Vec3::new(x_min, y_min, 0.0), color, Vec2::new(0.0, 1.0)),
        ]
    }

    /// Move the quads of the current word onto a fresh line
    fn wrap_word(quads: &mut [[UIVertex; 4]], cursor: &mut LineCursor, word_start: usize) {
        let word_x = quads[word_start][0].position.x;
        let shift = Vec2::new(cursor.left - word_x, -cursor.line_height);
        for quad in &mut quads[word_start..] {
            for vertex in quad.iter_mut() {
                *vertex = vertex.translated(shift);
            }
        }
        cursor.x += shift.x;
        cursor.baseline -= cursor.line_height;
    }
}

impl ShapingEngine for MonospaceShaper {
    fn shape(&mut self, text: &str, settings: &GenerationSettings) -> Result<Vec<UIVertex>, ShapingError> {
        if settings.font_size.is_nan() || settings.font_size <= 0.0 {
            return Err(ShapingError::FontUnavailable(format!(
                "font size {} is not positive",
                settings.font_size
            )));
        }

        let scale = settings.scale_factor.max(f32::EPSILON);
        let font_px = settings.font_size * scale;
        let advance = font_px * self.advance_ratio;
        let ascent = font_px * self.ascent_ratio;
        let descent = font_px * self.descent_ratio;
        let width = settings.extents.x * scale;
        let height = settings.extents.y * scale;

        let left = -width * settings.pivot.x;
        let top = height * (1.0 - settings.pivot.y);
        let mut cursor = LineCursor {
            left,
            right: left + width,
            x: left,
            baseline: top - ascent,
            line_height: font_px * self.line_height_ratio * settings.line_spacing,
            word_start: None,
        };

        let classes = Self::classify(text);
        let mut colors = vec![settings.color];
        let mut quads: Vec<[UIVertex; 4]> = Vec::with_capacity(classes.len() + 1);

        for (index, ch) in text.chars().enumerate() {
            let color = colors.last().copied().unwrap_or(settings.color);

            if let CharClass::Markup(action) = classes[index] {
                match action {
                    StyleAction::PushColor(c) => colors.push(c),
                    StyleAction::PopColor if colors.len() > 1 => {
                        colors.pop();
                    }
                    _ => {}
                }
                quads.push(Self::degenerate_quad(cursor.x, cursor.baseline, color));
                continue;
            }

            match ch {
                '\n' => {
                    quads.push(Self::degenerate_quad(cursor.x, cursor.baseline, color));
                    cursor.new_line();
                }
                '\r' => {
                    quads.push(Self::degenerate_quad(cursor.x, cursor.baseline, color));
                }
                c if c.is_whitespace() => {
                    quads.push(Self::glyph_quad(
                        cursor.x,
                        cursor.x + advance,
                        cursor.baseline,
                        cursor.baseline,
                        color,
                    ));
                    cursor.x += advance;
                    cursor.word_start = None;
                }
                _ => {
                    if cursor.x + advance > cursor.right + WRAP_EPSILON && !cursor.at_line_start() {
                        match cursor.word_start {
                            Some(word_start)
                                if quads[word_start][0].position.x > cursor.left + WRAP_EPSILON =>
                            {
                                Self::wrap_word(&mut quads, &mut cursor, word_start);
                            }
                            _ => cursor.new_line(),
                        }
                    }
                    quads.push(Self::glyph_quad(
                        cursor.x,
                        cursor.x + advance,
                        cursor.baseline - descent,
                        cursor.baseline + ascent,
                        color,
                    ));
                    cursor.word_start.get_or_insert(index);
                    cursor.x += advance;
                }
            }
        }

        // Line terminator
        quads.push(Self::degenerate_quad(cursor.x, cursor.baseline, settings.color));

        Ok(quads.into_iter().flatten().collect())
    }

    fn preferred_width(&mut self, text: &str, settings: &GenerationSettings) -> Result<f32, ShapingError> {
        let scale = settings.scale_factor.max(f32::EPSILON);
        let advance = settings.font_size * scale * self.advance_ratio;
        let classes = Self::classify(text);

        let mut widest = 0.0f32;
        let mut line = 0.0f32;
        for (index, ch) in text.chars().enumerate() {
            if classes[index] != CharClass::Text || ch == '\r' {
                continue;
            }
            if ch == '\n' {
                widest = widest.max(line);
                line = 0.0;
            } else {
                line += advance;
            }
        }
        Ok(widest.max(line))
    }
}
