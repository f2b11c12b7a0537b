//! # Rich Text
//!
//! Mesh layout for rich text: inline icons, nested vertex effects and
//! clickable regions on top of an external glyph shaper.
//!
//! ## Features
//!
//! - **Inline icons**: `<icon name=star w=2 align=top event=buy args=1/>`
//!   reserves filler characters and positions a sprite over them
//! - **Line-wrap correction**: icons overflowing the right edge move to the next line
//! - **Nested effects**: `<material=shadow|outline|gradient|underline ...>`
//!   regions rewrite and duplicate glyph quads without re-shaping
//! - **Click routing**: icon and underline rectangles dispatch named events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rich_text::prelude::*;
//!
//! let mut text = RichText::new(MonospaceShaper::new());
//! text.add_sprite("star", Sprite { native_size: Vec2::new(16.0, 16.0), handle: SpriteHandle(0) });
//! text.set_text("Buy<icon name=star event=buy args=1/> <material=underline event=help>help</material>");
//! text.add_listener(|event: &ClickEvent| -> Result<(), ListenerError> {
//!     println!("clicked {} ({})", event.name, event.args);
//!     Ok(())
//! });
//!
//! let mesh = text.populate_mesh()?;
//! println!("{} quads", mesh.quad_count());
//! text.update();
//! # Ok::<(), rich_text::layout::LayoutError>(())
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod config;
pub mod geometry;
pub mod markup;
pub mod layout;
pub mod effects;
pub mod events;
pub mod ui;

#[cfg(test)]
mod tests;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, RichTextConfig},
        events::{ClickEvent, ClickListener, ClickRouter, EventRect, ListenerError, ListenerHandle},
        foundation::{Color32, Rect, Vec2, Vec3},
        geometry::ContainerGeometry,
        layout::{
            GenerationSettings, LayoutError, LayoutOutput, LayoutPass, MonospaceShaper, PassParams,
            ShapingEngine, ShapingError, TextMesh, UIVertex,
        },
        markup::{IconPlaceholder, SpriteLookup, TagParser, TagRegion},
        ui::{DirtyFlags, RichText, Sprite, SpriteHandle, SpriteRegistry},
    };
}
