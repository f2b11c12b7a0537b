//! Rich-text component
//!
//! Glue between the host and the layout pipeline. Setters mark the vertex
//! buffer dirty; [`RichText::populate_mesh`] runs a pass when needed and
//! [`RichText::update`] refreshes the image pool on the following idle tick,
//! so a vertex-only rebuild never touches display objects.

use bitflags::bitflags;

use super::image_pool::ImagePool;
use super::sprites::{Sprite, SpriteRegistry};
use crate::config::RichTextConfig;
use crate::events::{ClickEvent, ClickListener, ClickRouter, EventRect, ListenerHandle};
use crate::foundation::{Color32, Vec2};
use crate::geometry::ContainerGeometry;
use crate::layout::{LayoutError, LayoutPass, PassParams, ShapingEngine, TextMesh};
use crate::markup::IconPlaceholder;

bitflags! {
    /// Pending work for a rich-text instance
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// Text, style, geometry or sprites changed; a layout pass is needed
        const VERTICES = 1 << 0;
        /// A pass finished; the image pool must be rebuilt
        const ICON_LAYOUT = 1 << 1;
    }
}

/// A text instance with inline icons, effects and clickable regions
pub struct RichText<S: ShapingEngine> {
    text: String,
    params: PassParams,
    shaper: S,
    sprites: SpriteRegistry,
    router: ClickRouter,
    pool: ImagePool,
    pass: LayoutPass,
    icons: Vec<IconPlaceholder>,
    mesh: TextMesh,
    laid_out_text: String,
    dirty: DirtyFlags,
}

impl<S: ShapingEngine> std::fmt::Debug for RichText<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichText")
            .field("text", &self.text)
            .field("params", &self.params)
            .field("icons", &self.icons.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: ShapingEngine> RichText<S> {
    /// Create an empty instance with default parameters
    pub fn new(shaper: S) -> Self {
        Self {
            text: String::new(),
            params: PassParams::default(),
            shaper,
            sprites: SpriteRegistry::new(),
            router: ClickRouter::new(),
            pool: ImagePool::default(),
            pass: LayoutPass::new(),
            icons: Vec::new(),
            mesh: TextMesh::default(),
            laid_out_text: String::new(),
            dirty: DirtyFlags::VERTICES,
        }
    }

    /// Create an instance from configuration
    pub fn from_config(config: &RichTextConfig, shaper: S) -> Self {
        let mut rich_text = Self::new(shaper);
        rich_text.text = config.text.clone();
        rich_text.params = PassParams {
            font_size: config.font_size,
            color: config.text_color(),
            geometry: config.container.to_geometry(),
            filler_char: config.layout.filler_char,
            line_spacing: config.layout.line_spacing,
        };
        rich_text.sprites = SpriteRegistry::from_config(&config.sprites);
        rich_text.pool = ImagePool::new(config.layout.max_pool_size);
        rich_text
    }

    /// Replace the markup
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty.insert(DirtyFlags::VERTICES);
        }
    }

    /// Current markup
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text after icon substitution and wrap correction of the last pass
    pub fn laid_out_text(&self) -> &str {
        &self.laid_out_text
    }

    /// Set the base text colour
    pub fn set_color(&mut self, color: Color32) {
        self.params.color = color;
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Set the font size in pixels
    pub fn set_font_size(&mut self, font_size: f32) {
        self.params.font_size = font_size;
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Set the container geometry
    pub fn set_geometry(&mut self, geometry: ContainerGeometry) {
        self.params.geometry = geometry;
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Pass parameters
    pub fn params(&self) -> &PassParams {
        &self.params
    }

    /// Pending work
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Rebuild the mesh if anything changed
    ///
    /// Event rectangles and icons are cleared before the pass runs. On
    /// failure the previous mesh is kept, the vertex flag stays set and
    /// the error is returned.
    pub fn populate_mesh(&mut self) -> Result<&TextMesh, LayoutError> {
        if !self.dirty.contains(DirtyFlags::VERTICES) {
            return Ok(&self.mesh);
        }

        self.router.clear_rects();
        self.icons.clear();

        match self.pass.run(&self.text, &self.params, &self.sprites, &mut self.shaper) {
            Ok(output) => {
                self.mesh = output.mesh;
                self.icons = output.icons;
                self.laid_out_text = output.text;
                self.router.set_rects(output.events);
                self.dirty.remove(DirtyFlags::VERTICES);
                self.dirty.insert(DirtyFlags::ICON_LAYOUT);
                Ok(&self.mesh)
            }
            Err(err) => {
                log::warn!("Layout pass aborted, keeping previous mesh: {}", err);
                Err(err)
            }
        }
    }

    /// Idle tick: refresh display slots after a finished pass
    pub fn update(&mut self) {
        if self.dirty.contains(DirtyFlags::ICON_LAYOUT) {
            self.pool.rebuild(&self.icons, &self.sprites);
            self.dirty.remove(DirtyFlags::ICON_LAYOUT);
        }
    }

    /// Last committed mesh
    pub fn mesh(&self) -> &TextMesh {
        &self.mesh
    }

    /// Icons and underline bars of the last pass
    pub fn icons(&self) -> &[IconPlaceholder] {
        &self.icons
    }

    /// Clickable rectangles of the last pass
    pub fn event_rects(&self) -> &[EventRect] {
        self.router.rects()
    }

    /// Display slots
    pub fn image_pool(&self) -> &ImagePool {
        &self.pool
    }

    /// Sprite registry
    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    /// Mutable sprite registry; call [`RichText::update_sprite_list`] after editing its list
    pub fn sprites_mut(&mut self) -> &mut SpriteRegistry {
        &mut self.sprites
    }

    /// Rebuild the sprite map from its list and schedule a pass
    pub fn update_sprite_list(&mut self) {
        self.sprites.update_sprite_list();
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Add or replace a sprite and schedule a pass
    pub fn add_sprite(&mut self, name: impl Into<String>, sprite: Sprite) {
        self.sprites.add_sprite(name, sprite);
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Remove every sprite, detach them from the display slots and schedule a pass
    pub fn clear_sprites(&mut self) {
        self.sprites.clear_sprites();
        self.pool.clear_sprites();
        self.dirty.insert(DirtyFlags::VERTICES);
    }

    /// Register a click listener
    pub fn add_listener(&mut self, listener: impl ClickListener + 'static) -> ListenerHandle {
        self.router.add_listener(listener)
    }

    /// Unregister a click listener
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        self.router.remove_listener(handle)
    }

    /// Unregister every click listener
    pub fn clear_listeners(&mut self) {
        self.router.clear_listeners();
    }

    /// Route a click at a container-local point
    pub fn on_pointer_click(&mut self, point: Vec2) -> Option<ClickEvent> {
        self.router.on_pointer_click(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceShaper;
    use crate::ui::sprites::SpriteHandle;

    fn instance() -> RichText<MonospaceShaper> {
        let mut rich_text = RichText::new(MonospaceShaper::new());
        rich_text.set_font_size(10.0);
        rich_text.set_geometry(ContainerGeometry::new(Vec2::new(100.0, 40.0), Vec2::new(0.0, 1.0)));
        rich_text.add_sprite("star", Sprite { native_size: Vec2::new(20.0, 20.0), handle: SpriteHandle(9) });
        rich_text
    }

    #[test]
    fn test_populate_only_when_dirty() {
        let mut rich_text = instance();
        rich_text.set_text("abc");

        assert_eq!(rich_text.populate_mesh().unwrap().quad_count(), 3);
        assert!(!rich_text.dirty().contains(DirtyFlags::VERTICES));
        assert!(rich_text.dirty().contains(DirtyFlags::ICON_LAYOUT));

        // Same text is not a change
        rich_text.set_text("abc");
        assert!(!rich_text.dirty().contains(DirtyFlags::VERTICES));
    }

    #[test]
    fn test_update_rebuilds_pool_once() {
        let mut rich_text = instance();
        rich_text.set_text("a<icon name=star/>");
        rich_text.populate_mesh().unwrap();
        assert!(rich_text.image_pool().slots().is_empty());

        rich_text.update();
        assert_eq!(rich_text.image_pool().visible().count(), 1);
        assert_eq!(rich_text.image_pool().slots()[0].sprite, Some(SpriteHandle(9)));
        assert!(rich_text.dirty().is_empty());
    }

    #[test]
    fn test_failed_pass_keeps_previous_mesh() {
        let mut rich_text = instance();
        rich_text.set_text("go<icon name=star event=go/>");
        let before = rich_text.populate_mesh().unwrap().clone();
        assert_eq!(rich_text.event_rects().len(), 1);

        rich_text.set_font_size(0.0);
        assert!(rich_text.populate_mesh().is_err());

        assert_eq!(rich_text.mesh(), &before);
        assert!(rich_text.event_rects().is_empty());
        assert!(rich_text.dirty().contains(DirtyFlags::VERTICES));
    }

    #[test]
    fn test_sprite_changes_schedule_pass() {
        let mut rich_text = instance();
        rich_text.populate_mesh().unwrap();

        rich_text.clear_sprites();
        assert!(rich_text.dirty().contains(DirtyFlags::VERTICES));
        assert!(rich_text.sprites().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = RichTextConfig {
            text: "Hi".into(),
            font_size: 12.0,
            color: "#00FF00".into(),
            ..RichTextConfig::default()
        };
        let rich_text = RichText::from_config(&config, MonospaceShaper::new());

        assert_eq!(rich_text.text(), "Hi");
        assert_eq!(rich_text.params().color, Color32::rgb(0, 255, 0));
        assert_eq!(rich_text.image_pool().max_size(), 64);
    }
}
