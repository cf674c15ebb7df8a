//! Core geometry types: Offset, Rect, Spacing, Extent.
//!
//! Coordinates are window-local pixels. Rectangles are stored corner-based
//! (`x1, y1` top-left inclusive, `x2, y2` bottom-right exclusive) because every
//! widget operation in the tree is phrased in terms of those four edges.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle given by its top-left and bottom-right corners.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// An empty rectangle at the origin.
    pub const EMPTY: Rect = Rect { x1: 0, y1: 0, x2: 0, y2: 0 };

    /// Create a rectangle from its corners.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a rectangle from a top-left corner and a size.
    #[inline]
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    /// `x2 - x1`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.x2 - self.x1
    }

    /// `y2 - y1`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.y2 - self.y1
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Offset {
        Offset { x: self.x1, y: self.y1 }
    }

    /// Whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges
    /// exclusive.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        !(x < self.x1 || x >= self.x2 || y < self.y1 || y >= self.y2)
    }

    /// Translate the rectangle without resizing it.
    #[inline]
    pub const fn translate(self, delta: Offset) -> Rect {
        Rect {
            x1: self.x1 + delta.x,
            y1: self.y1 + delta.y,
            x2: self.x2 + delta.x,
            y2: self.y2 + delta.y,
        }
    }

    /// Contract the rectangle inward by the given [`Spacing`].
    #[inline]
    pub const fn shrink(self, padding: Spacing) -> Rect {
        Rect {
            x1: self.x1 + padding.left,
            y1: self.y1 + padding.top,
            x2: self.x2 - padding.right,
            y2: self.y2 - padding.bottom,
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side (CSS order).
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// The furthest point reached by a layout pass, in window coordinates.
///
/// Containers compare it against their padded content edge to decide whether
/// an axis overflows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub x: i32,
    pub y: i32,
}

impl Extent {
    /// No content.
    pub const ZERO: Extent = Extent { x: 0, y: 0 };

    /// Create a new extent.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(3, 4);
        let b = Offset::new(1, 2);
        assert_eq!(a + b, Offset::new(4, 6));
        assert_eq!(a - b, Offset::new(2, 2));
        assert_eq!(-a, Offset::new(-3, -4));
    }

    #[test]
    fn rect_dimensions() {
        let r = Rect::new(10, 20, 40, 60);
        assert_eq!(r.width(), 30);
        assert_eq!(r.height(), 40);
        assert_eq!(r.origin(), Offset::new(10, 20));
    }

    #[test]
    fn rect_from_size() {
        assert_eq!(Rect::from_size(5, 5, 10, 20), Rect::new(5, 5, 15, 25));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0, 0, 20, 20);
        assert!(r.contains(0, 0));
        assert!(r.contains(19, 19));
        assert!(!r.contains(20, 10));
        assert!(!r.contains(10, 20));
        assert!(!r.contains(-1, 5));
    }

    #[test]
    fn rect_translate_keeps_size() {
        let r = Rect::new(0, 0, 10, 5).translate(Offset::new(3, -2));
        assert_eq!(r, Rect::new(3, -2, 13, 3));
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 5);
    }

    #[test]
    fn rect_shrink_by_padding() {
        let r = Rect::new(0, 0, 100, 50).shrink(Spacing::new(1, 2, 3, 4));
        assert_eq!(r, Rect::new(4, 1, 98, 47));
    }

    #[test]
    fn spacing_constructors() {
        assert_eq!(Spacing::all(5), Spacing::new(5, 5, 5, 5));
        assert_eq!(Spacing::symmetric(1, 2), Spacing::new(1, 2, 1, 2));
        assert_eq!(Spacing::new(1, 2, 3, 4).width(), 6);
        assert_eq!(Spacing::new(1, 2, 3, 4).height(), 4);
    }
}
