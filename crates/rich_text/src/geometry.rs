//! Container geometry
//!
//! Read-only per pass: the rectangle the text lays out into, its pivot and
//! the canvas pixel density. Shaped vertices are in pixels relative to the
//! pivot; multiplying by [`ContainerGeometry::units_per_pixel`] converts them
//! to local units.

use crate::foundation::{Rect, Vec2};

/// Rectangle, pivot and pixel density of the text container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    /// Size of the container in local units
    pub size: Vec2,
    /// Pivot, `(0, 0)` bottom-left to `(1, 1)` top-right
    pub pivot: Vec2,
    /// Canvas pixels per local unit
    pub pixels_per_unit: f32,
    /// Sub-pixel snapping offset applied to the final mesh
    pub rounding_offset: Vec2,
}

impl Default for ContainerGeometry {
    fn default() -> Self {
        Self {
            size: Vec2::new(160.0, 30.0),
            pivot: Vec2::new(0.5, 0.5),
            pixels_per_unit: 1.0,
            rounding_offset: Vec2::zeros(),
        }
    }
}

impl ContainerGeometry {
    /// Create geometry with the given size and pivot at unit pixel density
    pub fn new(size: Vec2, pivot: Vec2) -> Self {
        Self { size, pivot, ..Self::default() }
    }

    /// Local rectangle relative to the pivot
    pub fn rect(&self) -> Rect {
        Rect::new(
            -self.size.x * self.pivot.x,
            -self.size.y * self.pivot.y,
            self.size.x,
            self.size.y,
        )
    }

    /// Size difference to the parent anchors
    ///
    /// Children are anchored at the container centre, so the size delta is
    /// the container size itself.
    pub fn size_delta(&self) -> Vec2 {
        self.size
    }

    /// Offset from pivot-relative space to centre-anchored child space
    pub fn pivot_correction(&self) -> Vec2 {
        let delta = self.size_delta();
        Vec2::new(delta.x * (self.pivot.x - 0.5), delta.y * (self.pivot.y - 0.5))
    }

    /// Local units per canvas pixel
    pub fn units_per_pixel(&self) -> f32 {
        if self.pixels_per_unit > 0.0 {
            1.0 / self.pixels_per_unit
        } else {
            1.0
        }
    }
}
