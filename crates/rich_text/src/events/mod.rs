//! Click routing
//!
//! Key principles:
//! - Clickable rectangles are rebuilt by every layout pass and owned by the
//!   router until the next pass starts
//! - On overlap the most recently added rectangle wins
//! - Listeners form an ordered chain, invoked in registration order
//! - A failing listener is logged and never stops the rest of the chain

use slotmap::{new_key_type, SlotMap};

use crate::foundation::{Rect, Vec2};

new_key_type! {
    /// Handle returned by [`ClickRouter::add_listener`]
    pub struct ListenerHandle;
}

/// Clickable region in container-local units
#[derive(Debug, Clone, PartialEq)]
pub struct EventRect {
    /// Event name
    pub name: String,
    /// Event arguments, empty when none were given
    pub args: String,
    /// Region in container-local units
    pub rect: Rect,
}

impl EventRect {
    /// Create an event rectangle
    pub fn new(name: impl Into<String>, args: Option<&str>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            args: args.unwrap_or_default().to_string(),
            rect,
        }
    }
}

/// Payload delivered to click listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Event name
    pub name: String,
    /// Event arguments
    pub args: String,
}

/// Error reported by a click listener
#[derive(Debug, thiserror::Error)]
#[error("Click listener failed: {0}")]
pub struct ListenerError(pub String);

/// Receiver of click events
pub trait ClickListener {
    /// Handle a click on a region
    fn on_click(&mut self, event: &ClickEvent) -> Result<(), ListenerError>;
}

impl<F> ClickListener for F
where
    F: FnMut(&ClickEvent) -> Result<(), ListenerError>,
{
    fn on_click(&mut self, event: &ClickEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Event rectangles of the current layout plus the listener chain
#[derive(Default)]
pub struct ClickRouter {
    rects: Vec<EventRect>,
    listeners: SlotMap<ListenerHandle, Box<dyn ClickListener>>,
    order: Vec<ListenerHandle>,
}

impl std::fmt::Debug for ClickRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickRouter")
            .field("rects", &self.rects)
            .field("listeners", &self.order.len())
            .finish()
    }
}

impl ClickRouter {
    /// Create a router with no rectangles and no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every rectangle; called when a layout pass starts
    pub fn clear_rects(&mut self) {
        self.rects.clear();
    }

    /// Replace the rectangles with those of a finished pass
    pub fn set_rects(&mut self, rects: Vec<EventRect>) {
        self.rects = rects;
    }

    /// Append one rectangle
    pub fn push_rect(&mut self, rect: EventRect) {
        self.rects.push(rect);
    }

    /// Current rectangles, in insertion order
    pub fn rects(&self) -> &[EventRect] {
        &self.rects
    }

    /// Register a listener at the end of the chain
    pub fn add_listener(&mut self, listener: impl ClickListener + 'static) -> ListenerHandle {
        let handle = self.listeners.insert(Box::new(listener));
        self.order.push(handle);
        handle
    }

    /// Remove a listener; returns `false` when the handle is unknown
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        if self.listeners.remove(handle).is_none() {
            return false;
        }
        self.order.retain(|&h| h != handle);
        true
    }

    /// Remove every listener
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
        self.order.clear();
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.order.len()
    }

    /// Topmost rectangle containing `point`
    pub fn hit_test(&self, point: Vec2) -> Option<&EventRect> {
        self.rects.iter().rev().find(|event| event.rect.contains(point))
    }

    /// Route a click at a container-local point
    ///
    /// # Returns
    /// The dispatched event, or `None` when no rectangle contains the point
    pub fn on_pointer_click(&mut self, point: Vec2) -> Option<ClickEvent> {
        let hit = self.hit_test(point)?;
        let event = ClickEvent {
            name: hit.name.clone(),
            args: hit.args.clone(),
        };
        self.dispatch(&event);
        Some(event)
    }

    /// Invoke every listener in registration order
    pub fn dispatch(&mut self, event: &ClickEvent) {
        for handle in &self.order {
            let Some(listener) = self.listeners.get_mut(*handle) else {
                continue;
            };
            if let Err(err) = listener.on_click(event) {
                log::warn!("Listener for '{}' failed: {}", event.name, err);
            }
        }
    }
}
