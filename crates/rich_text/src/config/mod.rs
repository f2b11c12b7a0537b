//! Configuration system
//!
//! Serializable settings for a rich-text instance: the markup itself, font
//! size and colour, the sprite list, container geometry and layout tuning.
//! Files are loaded as TOML or RON depending on their extension.

pub use serde::{Serialize, Deserialize};

use crate::foundation::Color32;
use crate::geometry::ContainerGeometry;
use crate::foundation::Vec2;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// A named sprite and its native pixel size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Name referenced by `<icon name=...>`
    pub name: String,
    /// Native width in pixels
    pub width: f32,
    /// Native height in pixels
    pub height: f32,
}

/// Container rectangle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Width in local units
    pub width: f32,
    /// Height in local units
    pub height: f32,
    /// Horizontal pivot (0 = left, 1 = right)
    pub pivot_x: f32,
    /// Vertical pivot (0 = bottom, 1 = top)
    pub pivot_y: f32,
    /// Pixel density of the canvas
    pub pixels_per_unit: f32,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 30.0,
            pivot_x: 0.5,
            pivot_y: 0.5,
            pixels_per_unit: 1.0,
        }
    }
}

impl ContainerConfig {
    /// Convert into runtime container geometry
    pub fn to_geometry(&self) -> ContainerGeometry {
        ContainerGeometry {
            size: Vec2::new(self.width, self.height),
            pivot: Vec2::new(self.pivot_x, self.pivot_y),
            pixels_per_unit: self.pixels_per_unit,
            rounding_offset: Vec2::zeros(),
        }
    }
}

/// Layout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Character spliced in to reserve room for an inline image
    pub filler_char: char,
    /// Upper bound on display slots kept by the image pool
    pub max_pool_size: usize,
    /// Line spacing multiplier handed to the shaper
    pub line_spacing: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            filler_char: ' ',
            max_pool_size: 64,
            line_spacing: 1.0,
        }
    }
}

/// Complete configuration of one rich-text instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextConfig {
    /// Markup to render
    pub text: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Base text colour as an HTML colour string
    pub color: String,
    /// Sprites available to `<icon>` tags
    pub sprites: Vec<SpriteConfig>,
    /// Container rectangle
    pub container: ContainerConfig,
    /// Layout tuning
    pub layout: LayoutSettings,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 14.0,
            color: "#FFFFFF".to_string(),
            sprites: Vec::new(),
            container: ContainerConfig::default(),
            layout: LayoutSettings::default(),
        }
    }
}

impl Config for RichTextConfig {}

impl RichTextConfig {
    /// Base text colour, white when the configured string does not parse
    pub fn text_color(&self) -> Color32 {
        Color32::parse_html(&self.color).unwrap_or_else(|| {
            log::warn!("Unparsable text colour '{}', using white", self.color);
            Color32::WHITE
        })
    }
}
