//! Display list for icons and underline bars
//!
//! A fixed pool of display slots is reused between passes. The pool grows
//! on demand up to a cap and never shrinks; surplus slots are disabled.

use super::sprites::{SpriteHandle, SpriteRegistry};
use crate::foundation::{Color32, Vec2};
use crate::markup::IconPlaceholder;

/// Default cap on the number of display slots
pub const DEFAULT_MAX_POOL_SIZE: usize = 64;

/// One display object
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySlot {
    /// Sprite drawn by the slot; `None` draws a solid quad
    pub sprite: Option<SpriteHandle>,
    /// Centre position in container child space
    pub position: Vec2,
    /// Size in local units
    pub size: Vec2,
    /// Tint
    pub color: Color32,
    /// Whether the slot is visible
    pub enabled: bool,
}

impl Default for DisplaySlot {
    fn default() -> Self {
        Self {
            sprite: None,
            position: Vec2::zeros(),
            size: Vec2::zeros(),
            color: Color32::WHITE,
            enabled: false,
        }
    }
}

/// Pool of display slots
#[derive(Debug)]
pub struct ImagePool {
    slots: Vec<DisplaySlot>,
    max_size: usize,
}

impl Default for ImagePool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POOL_SIZE)
    }
}

impl ImagePool {
    /// Create an empty pool capped at `max_size` slots
    pub fn new(max_size: usize) -> Self {
        Self { slots: Vec::new(), max_size }
    }

    /// All slots, enabled or not
    pub fn slots(&self) -> &[DisplaySlot] {
        &self.slots
    }

    /// Enabled slots only
    pub fn visible(&self) -> impl Iterator<Item = &DisplaySlot> {
        self.slots.iter().filter(|slot| slot.enabled)
    }

    /// Slot cap
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Assign icons to slots
    ///
    /// A slot is enabled when its icon is still or its sprite resolves.
    /// Icons beyond the cap are not displayed.
    pub fn rebuild(&mut self, icons: &[IconPlaceholder], sprites: &SpriteRegistry) {
        let wanted = icons.len().min(self.max_size);
        if icons.len() > self.max_size {
            log::warn!(
                "Image pool full: showing {} of {} icons (max_pool_size = {})",
                self.max_size,
                icons.len(),
                self.max_size
            );
        }
        if self.slots.len() < wanted {
            self.slots.resize_with(wanted, DisplaySlot::default);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(icon) = icons.get(index).filter(|_| index < wanted) else {
                slot.enabled = false;
                slot.sprite = None;
                continue;
            };

            let sprite = icon.sprite_name.as_deref().and_then(|name| sprites.lookup(name));
            slot.sprite = sprite.map(|s| s.handle);
            slot.position = icon.position;
            slot.size = icon.size;
            slot.color = icon.color;
            slot.enabled = icon.still || sprite.is_some();
        }
    }

    /// Drop every slot's sprite reference
    pub fn clear_sprites(&mut self) {
        for slot in &mut self.slots {
            slot.sprite = None;
        }
    }
}
