//! One layout pass
//!
//! Runs the stages in their fixed order: icon substitution, shaping, icon
//! line-wrap correction, icon positioning, terminator removal, material tag
//! parsing, effects and the final transform into a [`TextMesh`].
//!
//! A pass either produces a complete [`LayoutOutput`] or an error; callers
//! keep their previous output on failure.

use super::mesh::TextMesh;
use super::positioner::position_icons;
use super::shaping::{GenerationSettings, ShapingEngine, QUAD_VERTICES};
use super::wrap::correct_wraps;
use super::LayoutError;
use crate::effects::{apply_effects, EffectContext};
use crate::events::EventRect;
use crate::foundation::Color32;
use crate::geometry::ContainerGeometry;
use crate::markup::{IconPlaceholder, IconResolver, SpriteLookup, TagParser, TagRegion};

/// Inputs of a pass besides the markup itself
#[derive(Debug, Clone, PartialEq)]
pub struct PassParams {
    /// Font size in pixels
    pub font_size: f32,
    /// Base text colour
    pub color: Color32,
    /// Container the text lays out into
    pub geometry: ContainerGeometry,
    /// Character repeated to reserve icon space
    pub filler_char: char,
    /// Line spacing multiplier
    pub line_spacing: f32,
}

impl Default for PassParams {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            color: Color32::WHITE,
            geometry: ContainerGeometry::default(),
            filler_char: ' ',
            line_spacing: 1.0,
        }
    }
}

impl PassParams {
    /// Settings handed to the shaping engine
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            extents: self.geometry.size,
            pivot: self.geometry.pivot,
            font_size: self.font_size,
            color: self.color,
            scale_factor: self.geometry.pixels_per_unit,
            line_spacing: self.line_spacing,
        }
    }
}

/// Result of a successful pass
#[derive(Debug, Clone, Default)]
pub struct LayoutOutput {
    /// Text after icon substitution and wrap correction
    pub text: String,
    /// Final mesh in local units
    pub mesh: TextMesh,
    /// Positioned icons followed by underline bars
    pub icons: Vec<IconPlaceholder>,
    /// Clickable rectangles: icons (last to first), then underlines
    pub events: Vec<EventRect>,
    /// Effect regions found in the text
    pub regions: Vec<TagRegion>,
    /// Line breaks inserted in front of overflowing icons
    pub wrap_insertions: usize,
}

/// Layout pass runner
///
/// Owns the tag parser scratch state so repeated passes reuse it.
#[derive(Debug, Default)]
pub struct LayoutPass {
    parser: TagParser,
}

impl LayoutPass {
    /// Create a pass runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `text`
    ///
    /// # Arguments
    /// * `text` - Markup with icon and material tags
    /// * `params` - Font, colour and container inputs
    /// * `sprites` - Native sizes of the available sprites
    /// * `shaper` - Engine producing one quad per character
    pub fn run<S: ShapingEngine + ?Sized>(
        &mut self,
        text: &str,
        params: &PassParams,
        sprites: &dyn SpriteLookup,
        shaper: &mut S,
    ) -> Result<LayoutOutput, LayoutError> {
        let geometry = &params.geometry;
        let settings = params.generation_settings();
        let units_per_pixel = geometry.units_per_pixel();

        let filler = params.filler_char.to_string();
        let filler_width = shaper.preferred_width(&filler, &settings)? * units_per_pixel;
        if !filler_width.is_finite() || filler_width <= 0.0 {
            return Err(LayoutError::InvalidFillerWidth(params.filler_char, filler_width));
        }

        let resolved = IconResolver::new(params.font_size, filler_width, params.filler_char)
            .with_max_width(geometry.size.x)
            .resolve(text, sprites);
        let mut text = resolved.text;
        let mut icons = resolved.icons;

        let mut verts = shaper.shape(&text, &settings)?;
        let wrap_insertions =
            correct_wraps(&mut text, &mut icons, &mut verts, shaper, &settings, geometry)?;

        let vertex_count = verts.len().saturating_sub(QUAD_VERTICES);
        let mut events = position_icons(&mut icons, &verts, vertex_count, params.font_size, geometry)?;
        verts.truncate(vertex_count);

        let regions = self.parser.parse(&text);
        let context = EffectContext {
            font_size: params.font_size,
            text_color: params.color,
            geometry: *geometry,
        };
        let effects = apply_effects(&regions, &mut verts, &context);
        icons.extend(effects.icons);
        events.extend(effects.events);

        let mesh = TextMesh::from_quads(verts, units_per_pixel, geometry.rounding_offset);

        log::debug!(
            "Layout pass: {} chars, {} quads, {} icon(s), {} event rect(s), {} wrap insertion(s)",
            text.chars().count(),
            mesh.quad_count(),
            icons.len(),
            events.len(),
            wrap_insertions
        );

        Ok(LayoutOutput { text, mesh, icons, events, regions, wrap_insertions })
    }
}
