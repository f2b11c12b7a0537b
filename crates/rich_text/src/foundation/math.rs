//! Math utilities and types
//!
//! Vector aliases over `nalgebra` and the axis-aligned rectangle used for
//! container bounds and clickable regions.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Axis-aligned rectangle in local container units
///
/// `(x, y)` is the minimum corner; +Y points up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Minimum X coordinate
    pub x: f32,
    /// Minimum Y coordinate
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Minimum X coordinate
    pub const fn x_min(&self) -> f32 {
        self.x
    }

    /// Maximum X coordinate
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    /// Minimum Y coordinate
    pub const fn y_min(&self) -> f32 {
        self.y
    }

    /// Maximum Y coordinate
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_rect(point.x, point.y, self.x, self.y, self.width, self.height)
    }
}

/// Check if a point is inside a rectangular region
///
/// # Arguments
/// * `point_x` - X coordinate of the point
/// * `point_y` - Y coordinate of the point
/// * `rect_x` - X coordinate of rectangle's minimum corner
/// * `rect_y` - Y coordinate of rectangle's minimum corner
/// * `rect_width` - Width of the rectangle
/// * `rect_height` - Height of the rectangle
///
/// # Returns
/// `true` if the point is inside the rectangle
pub fn point_in_rect(
    point_x: f32,
    point_y: f32,
    rect_x: f32,
    rect_y: f32,
    rect_width: f32,
    rect_height: f32,
) -> bool {
    point_x >= rect_x &&
    point_x <= rect_x + rect_width &&
    point_y >= rect_y &&
    point_y <= rect_y + rect_height
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect() {
        // Point inside
        assert!(point_in_rect(150.0, 150.0, 100.0, 100.0, 200.0, 100.0));

        // Point on the edges
        assert!(point_in_rect(100.0, 100.0, 100.0, 100.0, 200.0, 100.0));
        assert!(point_in_rect(300.0, 200.0, 100.0, 100.0, 200.0, 100.0));

        // Point outside
        assert!(!point_in_rect(50.0, 150.0, 100.0, 100.0, 200.0, 100.0));
        assert!(!point_in_rect(150.0, 201.0, 100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn test_rect_extents() {
        let rect = Rect::new(-50.0, -20.0, 100.0, 40.0);

        assert_eq!(rect.x_min(), -50.0);
        assert_eq!(rect.x_max(), 50.0);
        assert_eq!(rect.y_min(), -20.0);
        assert_eq!(rect.y_max(), 20.0);
        assert!(rect.contains(Vec2::zeros()));
        assert!(!rect.contains(Vec2::new(51.0, 0.0)));
    }
}
