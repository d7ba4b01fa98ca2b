//! Tile identities and cell occupants.

use std::fmt::{self, Display};

use crate::Coord;

/// Stable identity of a tile body.
///
/// A tile's id is the row-major index of its home cell (`y * size + x`), so the id
/// also says which region of the source image the tile shows. Every cell of a solved
/// grid holds the tile whose id equals the cell's index, including the cell reserved
/// for the empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u16);

impl TileId {
    /// Creates a tile id from its row-major home index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the id of the tile whose home is `coord` on a `size`×`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the grid.
    #[must_use]
    pub fn from_home(coord: Coord, size: u8) -> Self {
        assert!(
            coord.is_within(size),
            "coordinate {coord} is out of bounds for a {size}x{size} grid"
        );
        Self(u16::from(coord.y) * u16::from(size) + u16::from(coord.x))
    }

    /// Returns the row-major home index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the tile's home coordinate on a `size`×`size` grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Coord, TileId};
    ///
    /// assert_eq!(TileId::new(5).home(3), Coord::new(2, 1));
    /// assert_eq!(TileId::from_home(Coord::new(2, 1), 3), TileId::new(5));
    /// ```
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn home(self, size: u8) -> Coord {
        let size = size as u16;
        Coord::new((self.0 % size) as u8, (self.0 / size) as u8)
    }

    /// Returns the number shown on the tile in text renderings (`index + 1`).
    #[must_use]
    pub const fn label(self) -> u32 {
        self.0 as u32 + 1
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Occupant {
    /// A visible tile.
    Tile(TileId),
    /// The single empty slot.
    Empty,
}

impl Occupant {
    /// Returns the tile if the cell is occupied by one.
    #[must_use]
    pub const fn as_tile(self) -> Option<TileId> {
        match self {
            Self::Tile(tile) => Some(tile),
            Self::Empty => None,
        }
    }
}
