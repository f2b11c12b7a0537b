//! `key=value` attribute scanning shared by `<icon>` and `<material>` tags

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::Color32;

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)=([^\s]+)").expect("attribute regex is valid")
});

/// Iterate over the `key=value` pairs in an attribute string
pub fn attributes(source: &str) -> impl Iterator<Item = (&str, &str)> {
    ATTRIBUTE_RE.captures_iter(source).filter_map(|caps| {
        let key = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        Some((key, value))
    })
}

/// Parse a float, keeping `default` when the value is not a number
pub fn parse_float_or(value: &str, default: f32) -> f32 {
    match value.parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            log::trace!("Ignoring non-numeric attribute value '{}'", value);
            default
        }
    }
}

/// Parse an HTML colour, keeping `default` when the value does not parse
pub fn parse_color_or(value: &str, default: Color32) -> Color32 {
    Color32::parse_html(value).unwrap_or(default)
}
