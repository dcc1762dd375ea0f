//! Grid and geometry primitives

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Round `value` down to the nearest multiple of `grid`.
///
/// Negative values floor toward negative infinity, so `-1` snaps to `-grid`.
/// A zero grid leaves the value untouched.
pub fn snap_down(value: i32, grid: u32) -> i32 {
    if grid == 0 {
        return value;
    }
    let grid = grid as i32;
    value.div_euclid(grid) * grid
}

/// Unsigned variant of [`snap_down`].
pub fn snap_down_u32(value: u32, grid: u32) -> u32 {
    if grid == 0 {
        return value;
    }
    value / grid * grid
}

/// Signed 2D integer point (pixel or cell coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Snap both components down to a multiple of `grid`
    pub fn snapped(&self, grid: u32) -> Self {
        Self::new(snap_down(self.x, grid), snap_down(self.y, grid))
    }

    /// Grid cell containing this pixel position
    pub fn to_cell(&self, grid: u32) -> Self {
        if grid == 0 {
            return *self;
        }
        let grid = grid as i32;
        Self::new(self.x.div_euclid(grid), self.y.div_euclid(grid))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Unsigned 2D point, used for sizes and grid extents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UPoint {
    pub x: u32,
    pub y: u32,
}

impl UPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Number of cells in a grid of this extent
    pub fn area(&self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Convert a pixel size to grid extents (integer division)
    pub fn to_grid(&self, grid: u32) -> Self {
        if grid == 0 {
            return Self::default();
        }
        Self::new(self.x / grid, self.y / grid)
    }
}

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether `point` lies inside this rectangle (right/bottom edges exclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && (point.x as i64) < self.right()
            && (point.y as i64) < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_down() {
        assert_eq!(snap_down(37, 16), 32);
        assert_eq!(snap_down(32, 16), 32);
        assert_eq!(snap_down(-1, 16), -16);
        assert_eq!(snap_down(5, 0), 5);
        assert_eq!(snap_down_u32(47, 16), 32);
    }

    #[test]
    fn test_point_cell() {
        assert_eq!(Point::new(17, 33).to_cell(16), Point::new(1, 2));
        assert_eq!(Point::new(-3, 0).to_cell(16), Point::new(-1, 0));
        assert_eq!(Point::new(2, -1) * 16, Point::new(32, -16));
    }

    #[test]
    fn test_rect_contains_rect() {
        let level = Rect::new(0, 0, 64, 64);
        assert!(level.contains_rect(&Rect::new(48, 48, 16, 16)));
        assert!(!level.contains_rect(&Rect::new(100, 100, 16, 16)));
        assert!(!level.contains_rect(&Rect::new(-1, 0, 16, 16)));
        assert!(level.contains(Point::new(63, 0)));
        assert!(!level.contains(Point::new(64, 0)));
    }
}
