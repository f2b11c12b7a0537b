//! 8-bit RGBA colour
//!
//! Vertex colours are stored per channel as `u8`, which is what the shadow
//! and outline alpha blending (`a * source_a / 255`) operates on.

use super::math::utils::lerp;

/// RGBA colour with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color32 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Default for Color32 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color32 {
    /// Opaque white, also the "unset" sentinel for underline colours
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent black
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0);

    /// Create a colour from its channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parse an HTML colour string
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` and the common named
    /// colours. Returns `None` for anything else.
    pub fn parse_html(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        Self::named(&value.to_ascii_lowercase())
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "red" => Self::rgb(255, 0, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "blue" => Self::rgb(0, 0, 255),
            "darkblue" => Self::rgb(0, 0, 160),
            "lightblue" => Self::rgb(173, 216, 230),
            "purple" => Self::rgb(128, 0, 128),
            "yellow" => Self::rgb(255, 255, 0),
            "lime" => Self::rgb(0, 255, 0),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "white" => Self::WHITE,
            "silver" => Self::rgb(192, 192, 192),
            "grey" | "gray" => Self::rgb(128, 128, 128),
            "black" => Self::BLACK,
            "orange" => Self::rgb(255, 165, 0),
            "brown" => Self::rgb(165, 42, 42),
            "maroon" => Self::rgb(128, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "olive" => Self::rgb(128, 128, 0),
            "navy" => Self::rgb(0, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    /// Copy of this colour with alpha multiplied by `source_alpha / 255`
    pub fn with_alpha_scaled(self, source_alpha: u8) -> Self {
        let a = (u16::from(self.a) * u16::from(source_alpha)) / 255;
        Self { a: a as u8, ..self }
    }

    /// Linear interpolation between two colours, `t` clamped to `[0, 1]`
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| lerp(f32::from(a), f32::from(b), t).round() as u8;
        Self {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: channel(from.a, to.a),
        }
    }
}
