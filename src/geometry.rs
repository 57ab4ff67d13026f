//! Geometry primitives for layout, painting, and hit-testing.
//!
//! All coordinates are `f64` canvas units. Positions are relative to the
//! owning layer's parent; the tree walk in [`crate::scene`] resolves them
//! to root-relative ("global") coordinates.

/// A point in canvas coordinates.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin (0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Offset this point by a vector.
    #[inline]
    #[must_use]
    pub fn offset(&self, d: Vec2) -> Self {
        Self::new(self.x + d.x, self.y + d.y)
    }

    /// Vector from `other` to this point.
    #[inline]
    pub fn delta_from(&self, other: Self) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

/// A 2D displacement, e.g. the cumulative offset of a drag gesture.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero displacement.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl std::fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vec2({}, {})", self.x, self.y)
    }
}

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle at the origin from a size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle, bounds inclusive.
    ///
    /// Hit-testing treats both edges as inside, matching the containment
    /// contract of [`crate::scene::LayerTree::contains`].
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset_and_delta() {
        let p = Point::new(3.0, 4.0);
        let q = p.offset(Vec2::new(2.0, -1.0));
        assert_eq!(q, Point::new(5.0, 3.0));
        assert_eq!(q.delta_from(p), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_rect_contains_inclusive_bounds() {
        let r = Rect::from_size(10.0, 5.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(10.0, 5.0));
        assert!(r.contains(5.0, 2.5));
        assert!(!r.contains(10.1, 5.0));
        assert!(!r.contains(-0.1, 0.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(1.0, 1.0, 0.0, 3.0).is_empty());
        assert!(!Rect::from_size(1.0, 1.0).is_empty());
    }
}
