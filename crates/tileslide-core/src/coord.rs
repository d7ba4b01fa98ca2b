//! Grid coordinates and unit offsets.

use std::{
    fmt::{self, Display},
    ops::Neg,
};

/// A cell coordinate on the puzzle grid.
///
/// `x` grows to the right and `y` grows upward, so `(0, 0)` is the bottom-left
/// cell. Coordinates are only meaningful relative to a grid size; use
/// [`Coord::is_within`] or [`Grid::contains`] to check bounds.
///
/// [`Grid::contains`]: crate::Grid::contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    /// Column, counted from the left.
    pub x: u8,
    /// Row, counted from the bottom.
    pub y: u8,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns `true` if the coordinate lies inside an `size`×`size` grid.
    #[must_use]
    pub const fn is_within(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Returns the Manhattan distance between two coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::Coord;
    ///
    /// assert_eq!(Coord::new(0, 0).manhattan_distance(Coord::new(2, 1)), 3);
    /// assert_eq!(Coord::new(1, 1).manhattan_distance(Coord::new(1, 2)), 1);
    /// ```
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        (self.x.abs_diff(other.x) as u32) + (self.y.abs_diff(other.y) as u32)
    }

    /// Returns `true` if the two coordinates are 4-neighbors.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Steps by `offset`, returning `None` if the result leaves an `size`×`size` grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Coord, Offset};
    ///
    /// assert_eq!(Coord::new(0, 0).checked_step(Offset::RIGHT, 3), Some(Coord::new(1, 0)));
    /// assert_eq!(Coord::new(0, 0).checked_step(Offset::LEFT, 3), None);
    /// assert_eq!(Coord::new(2, 2).checked_step(Offset::UP, 3), None);
    /// ```
    #[must_use]
    pub fn checked_step(self, offset: Offset, size: u8) -> Option<Self> {
        let x = self.x.checked_add_signed(offset.dx)?;
        let y = self.y.checked_add_signed(offset.dy)?;
        let coord = Self::new(x, y);
        coord.is_within(size).then_some(coord)
    }

    /// Returns the offset that leads from `self` to `other`.
    ///
    /// Only meaningful for adjacent coordinates, where the result is a unit offset.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn offset_to(self, other: Self) -> Offset {
        Offset::new(
            (i16::from(other.x) - i16::from(self.x)) as i8,
            (i16::from(other.y) - i16::from(self.y)) as i8,
        )
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A signed step between grid coordinates.
///
/// The shuffle walk moves the empty slot by one of the four [`Offset::UNITS`] per
/// step. [`Offset::ZERO`] stands for "no previous step": its negation equals no unit
/// offset, so it never forbids anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Horizontal component.
    pub dx: i8,
    /// Vertical component.
    pub dy: i8,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self::new(0, 0);
    /// One cell to the right.
    pub const RIGHT: Self = Self::new(1, 0);
    /// One cell to the left.
    pub const LEFT: Self = Self::new(-1, 0);
    /// One cell up.
    pub const UP: Self = Self::new(0, 1);
    /// One cell down.
    pub const DOWN: Self = Self::new(0, -1);

    /// The four unit offsets, in the cyclic order the shuffle walk scans them.
    pub const UNITS: [Self; 4] = [Self::RIGHT, Self::LEFT, Self::UP, Self::DOWN];

    /// Creates an offset.
    #[must_use]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Returns `true` for the four unit offsets.
    #[must_use]
    pub const fn is_unit(self) -> bool {
        self.dx.unsigned_abs() as u16 + self.dy.unsigned_abs() as u16 == 1
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

impl Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}
