//! Sprite registry
//!
//! The configured sprite list is a sequence of `(name, sprite)` pairs. Icon
//! resolution reads a name map rebuilt from that list on demand, so edits to
//! the list take effect only after [`SpriteRegistry::update_sprite_list`].

use std::collections::HashMap;

use crate::config::SpriteConfig;
use crate::foundation::Vec2;
use crate::markup::SpriteLookup;

/// Opaque render handle of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u64);

/// Sprite as seen by the layout engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Native size in local units
    pub native_size: Vec2,
    /// Render handle passed through to display slots
    pub handle: SpriteHandle,
}

/// Named sprites available to `<icon>` tags
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    /// Configured list, in declaration order; `None` is an unassigned entry
    entries: Vec<(String, Option<Sprite>)>,
    /// Lookup map built from `entries`
    by_name: HashMap<String, Sprite>,
    /// Next handle handed out by `from_config`
    next_handle: u64,
}

impl SpriteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration, allocating a handle per sprite
    pub fn from_config(sprites: &[SpriteConfig]) -> Self {
        let mut registry = Self::new();
        for config in sprites {
            let handle = registry.allocate_handle();
            registry.entries.push((
                config.name.clone(),
                Some(Sprite { native_size: Vec2::new(config.width, config.height), handle }),
            ));
        }
        registry.update_sprite_list();
        registry
    }

    /// Allocate a fresh render handle
    pub fn allocate_handle(&mut self) -> SpriteHandle {
        let handle = SpriteHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Rebuild the name map from the configured list
    ///
    /// Unassigned entries are skipped; on duplicate names the later entry wins.
    pub fn update_sprite_list(&mut self) {
        self.by_name.clear();
        for (name, sprite) in &self.entries {
            if let Some(sprite) = sprite {
                self.by_name.insert(name.clone(), *sprite);
            }
        }
        log::debug!("Sprite list updated: {} of {} entries usable", self.by_name.len(), self.entries.len());
    }

    /// Add or replace a sprite and refresh the name map
    pub fn add_sprite(&mut self, name: impl Into<String>, sprite: Sprite) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = Some(sprite),
            None => self.entries.push((name, Some(sprite))),
        }
        self.update_sprite_list();
    }

    /// Remove every sprite
    pub fn clear_sprites(&mut self) {
        self.entries.clear();
        self.by_name.clear();
    }

    /// Mutable access to the configured list; call `update_sprite_list` afterwards
    pub fn entries_mut(&mut self) -> &mut Vec<(String, Option<Sprite>)> {
        &mut self.entries
    }

    /// Look up a sprite by name
    pub fn lookup(&self, name: &str) -> Option<&Sprite> {
        self.by_name.get(name)
    }

    /// Number of usable sprites
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if no sprite is usable
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl SpriteLookup for SpriteRegistry {
    fn native_size(&self, name: &str) -> Option<Vec2> {
        self.lookup(name).map(|sprite| sprite.native_size)
    }
}
