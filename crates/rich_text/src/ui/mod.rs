//! Component glue
//!
//! Sprite registry, image pool and the [`RichText`] instance that ties the
//! layout pipeline to click routing and display slots.

pub mod sprites;
pub mod image_pool;
pub mod rich_text;

pub use image_pool::{DisplaySlot, ImagePool};
pub use rich_text::{DirtyFlags, RichText};
pub use sprites::{Sprite, SpriteHandle, SpriteRegistry};
