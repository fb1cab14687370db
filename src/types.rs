//! Geometry value types for calendar layout
//!
//! All coordinates are integers in scaled page units (millimetres times
//! [`UNIT_SCALE`](crate::canvas::UNIT_SCALE)) unless stated otherwise.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Point or offset on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `factor`, `None` on overflow
    pub fn checked_scaled(self, factor: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_mul(factor)?, self.y.checked_mul(factor)?))
    }

    /// Replace components of `self` with those of `other` that are `> 0`
    pub fn override_with(self, other: Pos) -> Self {
        Self {
            x: if other.x > 0 { other.x } else { self.x },
            y: if other.y > 0 { other.y } else { self.y },
        }
    }

    /// Translation descriptor moving the origin to this point
    pub fn transform(self) -> Transform {
        Transform::translate(self.x, self.y)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Extent with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Landscape ("album") orientation: wider than tall
    pub fn is_album(&self) -> bool {
        self.width > self.height
    }
}

/// Rectangle with position and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Pos,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: Pos::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn left(&self) -> i32 {
        self.pos.x
    }

    pub fn top(&self) -> i32 {
        self.pos.y
    }

    pub fn right(&self) -> i32 {
        self.pos.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.height
    }

    /// True if `other` lies fully inside `self` (edges included)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Translation transform applied to a group of elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    pub dx: i32,
    pub dy: i32,
}

impl Transform {
    pub const fn translate(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{})", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_with_ignores_non_positive() {
        let base = Pos::new(100, 200);
        assert_eq!(base.override_with(Pos::new(0, -5)), base);
        assert_eq!(base.override_with(Pos::new(7, 0)), Pos::new(7, 200));
    }

    #[test]
    fn test_checked_scaled_reports_overflow() {
        assert_eq!(Pos::new(12, -3).checked_scaled(10), Some(Pos::new(120, -30)));
        assert_eq!(Pos::new(300_000_000, 0).checked_scaled(10), None);
        assert_eq!(Pos::new(0, i32::MIN).checked_scaled(-1), None);
    }

    #[test]
    fn test_transform_display() {
        assert_eq!(Pos::new(15, -3).transform().to_string(), "translate(15,-3)");
    }

    #[test]
    fn test_rect_containment() {
        let outer = Rect::new(0, 0, 100, 50);
        assert!(outer.contains_rect(&Rect::new(0, 0, 100, 50)));
        assert!(outer.contains_rect(&Rect::new(10, 10, 20, 20)));
        assert!(!outer.contains_rect(&Rect::new(90, 0, 20, 10)));
        assert!(!outer.contains_rect(&Rect::new(-1, 0, 5, 5)));
    }
}
