//! World-space layout of tile bodies.

use std::ops::{Add, Mul, Sub};

use tileslide_core::Coord;

/// A position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linearly interpolates towards `target`.
    ///
    /// `t` is clamped to `[0, 1]`, so the result never overshoots either end.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        self + (target - self) * t
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Returns the world position of the cell `coord` on a `size`×`size` grid.
///
/// Cells are one unit apart and the grid is centered on the origin.
#[must_use]
pub fn world_position(coord: Coord, size: u8) -> Point {
    let half = (f32::from(size) - 1.0) * 0.5;
    Point::new(f32::from(coord.x) - half, f32::from(coord.y) - half)
}

/// Returns the orthographic camera half-height that frames a `size`×`size` grid with
/// a small margin.
#[must_use]
pub fn orthographic_size(size: u8) -> f32 {
    f32::from(size) * 0.55
}
