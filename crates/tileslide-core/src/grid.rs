//! The puzzle grid: cell occupancy, the empty slot, and legal slides.

use std::fmt::{self, Display};

use crate::{Coord, Occupant, Offset, TileId};

/// Errors raised by grid construction and bounds-checked access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// A coordinate outside the grid was accessed.
    #[display("coordinate {coord} is out of bounds for a {size}x{size} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Side length of the grid.
        size: u8,
    },
    /// The requested side length is below [`Grid::MIN_SIZE`].
    #[display("grid size {size} is too small (minimum is 2)")]
    SizeTooSmall {
        /// The requested side length.
        size: usize,
    },
    /// The requested side length is above [`Grid::MAX_SIZE`].
    #[display("grid size {size} is too large (maximum is 255)")]
    SizeTooLarge {
        /// The requested side length.
        size: usize,
    },
}

/// A slide that was applied to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideMove {
    /// The tile that moved.
    pub tile: TileId,
    /// The tile's coordinate before the slide (now the empty slot).
    pub from: Coord,
    /// The tile's coordinate after the slide (the empty slot's old position).
    pub to: Coord,
}

impl SlideMove {
    /// Returns the step the empty slot took during this slide.
    #[must_use]
    pub fn empty_offset(&self) -> Offset {
        self.to.offset_to(self.from)
    }
}

/// An N×N sliding-tile grid.
///
/// The grid is a bijection between the N² cells and N² tile bodies. One body, the
/// one whose home is [`Grid::empty_home`], stands for the empty slot and is reported
/// as [`Occupant::Empty`]. Both directions of the mapping are kept up to date on every
/// swap, so cell lookups, tile lookups and the empty slot position are all O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u8,
    cells: Vec<TileId>,
    coords: Vec<Coord>,
    empty: TileId,
}

impl Grid {
    /// Smallest supported side length.
    pub const MIN_SIZE: usize = 2;
    /// Largest supported side length.
    pub const MAX_SIZE: usize = u8::MAX as usize;

    /// Creates a solved `size`×`size` grid.
    ///
    /// Tiles are assigned home cells left to right, bottom to top; the empty slot
    /// starts at its home, the bottom-right cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SizeTooSmall`] or [`GridError::SizeTooLarge`] if `size` is
    /// outside `MIN_SIZE..=MAX_SIZE`.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size < Self::MIN_SIZE {
            return Err(GridError::SizeTooSmall { size });
        }
        let size = u8::try_from(size).map_err(|_| GridError::SizeTooLarge { size })?;
        let count = u16::from(size) * u16::from(size);
        let cells: Vec<TileId> = (0..count).map(TileId::new).collect();
        let coords = cells.iter().map(|tile| tile.home(size)).collect();
        let empty = TileId::from_home(Self::empty_home(size), size);
        Ok(Self {
            size,
            cells,
            coords,
            empty,
        })
    }

    /// Returns the home cell of the empty slot on a `size`×`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub const fn empty_home(size: u8) -> Coord {
        Coord::new(size - 1, 0)
    }

    /// Returns the side length.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns the number of cells (N²).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if `coord` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.is_within(self.size)
    }

    fn cell_index(&self, coord: Coord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(usize::from(coord.y) * usize::from(self.size) + usize::from(coord.x))
    }

    #[track_caller]
    fn expect_cell_index(&self, coord: Coord) -> usize {
        match self.cell_index(coord) {
            Ok(index) => index,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the occupant of `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `coord` lies outside the grid.
    pub fn try_cell_at(&self, coord: Coord) -> Result<Occupant, GridError> {
        let tile = self.cells[self.cell_index(coord)?];
        Ok(self.occupant(tile))
    }

    /// Returns the occupant of `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the grid. Out-of-bounds access is a programming
    /// error; use [`Grid::try_cell_at`] for untrusted coordinates.
    #[must_use]
    #[track_caller]
    pub fn cell_at(&self, coord: Coord) -> Occupant {
        self.occupant(self.tile_at(coord))
    }

    /// Returns the body stored at `coord`, including the empty slot's body.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the grid.
    #[must_use]
    #[track_caller]
    pub fn tile_at(&self, coord: Coord) -> TileId {
        self.cells[self.expect_cell_index(coord)]
    }

    fn occupant(&self, tile: TileId) -> Occupant {
        if tile == self.empty {
            Occupant::Empty
        } else {
            Occupant::Tile(tile)
        }
    }

    /// Returns the current coordinate of `tile`.
    ///
    /// # Panics
    ///
    /// Panics if `tile` does not belong to this grid.
    #[must_use]
    #[track_caller]
    pub fn coord_of(&self, tile: TileId) -> Coord {
        match self.coords.get(tile.index()) {
            Some(coord) => *coord,
            None => {
                let size = self.size;
                panic!("{tile} does not belong to a {size}x{size} grid")
            }
        }
    }

    /// Returns the current position of the empty slot.
    #[must_use]
    pub fn empty_slot_position(&self) -> Coord {
        self.coords[self.empty.index()]
    }

    /// Returns the body that represents the empty slot.
    #[must_use]
    pub const fn empty_tile(&self) -> TileId {
        self.empty
    }

    /// Returns `true` if `tile` is currently at its home cell.
    #[must_use]
    pub fn is_at_home(&self, tile: TileId) -> bool {
        self.coords
            .get(tile.index())
            .is_some_and(|coord| *coord == tile.home(self.size))
    }

    /// Returns `true` if every tile is at its home cell.
    ///
    /// The empty slot is not checked; with all N²−1 tiles at home it necessarily
    /// occupies its own home cell as well.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles().all(|tile| self.is_at_home(tile))
    }

    /// Iterates over the N²−1 tiles, excluding the empty slot's body.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bodies().filter(move |tile| *tile != self.empty)
    }

    /// Iterates over all N² bodies in id order, including the empty slot's body.
    pub fn bodies(&self) -> impl Iterator<Item = TileId> + use<> {
        let count = u16::from(self.size) * u16::from(self.size);
        (0..count).map(TileId::new)
    }

    /// Returns the cell one `offset` away from `coord`, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(&self, coord: Coord, offset: Offset) -> Option<Coord> {
        coord.checked_step(offset, self.size)
    }

    /// Exchanges the occupants of two cells.
    ///
    /// The swap is unconditional: callers are responsible for legality. Use
    /// [`Grid::move_tile`] for player and shuffle moves.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate lies outside the grid.
    #[track_caller]
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let a_index = self.expect_cell_index(a);
        let b_index = self.expect_cell_index(b);
        self.cells.swap(a_index, b_index);
        self.coords[self.cells[a_index].index()] = a;
        self.coords[self.cells[b_index].index()] = b;
    }

    /// Returns `true` if `tile` is 4-adjacent to the empty slot.
    ///
    /// Tiles that do not belong to the grid and the empty slot's own body can never
    /// move.
    #[must_use]
    pub fn can_move(&self, tile: TileId) -> bool {
        self.coords
            .get(tile.index())
            .is_some_and(|coord| coord.is_adjacent(self.empty_slot_position()))
    }

    /// Slides `tile` into the empty slot if the move is legal.
    ///
    /// Returns the applied slide, or `None` (leaving the grid untouched) when the tile
    /// is not adjacent to the empty slot. An illegal request is not an error: pressing
    /// a tile that cannot move is simply a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Coord, Grid};
    ///
    /// let mut grid = Grid::new(3)?;
    /// let far = grid.tile_at(Coord::new(0, 0));
    /// assert_eq!(grid.move_tile(far), None);
    /// assert!(grid.is_solved());
    /// # Ok::<(), tileslide_core::GridError>(())
    /// ```
    pub fn move_tile(&mut self, tile: TileId) -> Option<SlideMove> {
        if !self.can_move(tile) {
            return None;
        }
        let from = self.coord_of(tile);
        let to = self.empty_slot_position();
        self.swap(from, to);
        Some(SlideMove { tile, from, to })
    }

    /// Asserts that the cell and tile maps are mutually inverse.
    ///
    /// # Panics
    ///
    /// Panics if any cell is unoccupied or doubly occupied, or if the maps disagree.
    #[track_caller]
    pub fn check_invariants(&self) {
        let count = self.cell_count();
        assert_eq!(self.coords.len(), count, "tile map has the wrong length");
        let mut seen = vec![false; count];
        for (index, tile) in self.cells.iter().enumerate() {
            assert!(tile.index() < count, "{tile} is not a body of this grid");
            assert!(!seen[tile.index()], "{tile} occupies more than one cell");
            seen[tile.index()] = true;
            let coord = self.coords[tile.index()];
            assert_eq!(
                self.cell_index(coord),
                Ok(index),
                "{tile} is recorded at {coord} but stored in cell {index}"
            );
        }
        let empty_count = self
            .cells
            .iter()
            .filter(|tile| self.occupant(**tile).is_empty())
            .count();
        assert_eq!(empty_count, 1, "grid must hold exactly one empty slot");
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cell_count().to_string().len();
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                if x > 0 {
                    write!(f, " ")?;
                }
                match self.cell_at(Coord::new(x, y)) {
                    Occupant::Tile(tile) => write!(f, "{:>width$}", tile.label())?,
                    Occupant::Empty => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid(size: usize) -> Grid {
        Grid::new(size).unwrap()
    }

    #[test]
    fn test_new_grid_is_solved() {
        for size in 2..=6 {
            let grid = grid(size);
            grid.check_invariants();
            assert!(grid.is_solved());
            assert_eq!(grid.cell_count(), size * size);
            assert_eq!(grid.tiles().count(), size * size - 1);
            assert_eq!(grid.bodies().count(), size * size);
            assert_eq!(grid.empty_slot_position(), Grid::empty_home(grid.size()));
            assert!(grid.cell_at(grid.empty_slot_position()).is_empty());
        }
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert_eq!(Grid::new(0), Err(GridError::SizeTooSmall { size: 0 }));
        assert_eq!(Grid::new(1), Err(GridError::SizeTooSmall { size: 1 }));
        assert_eq!(Grid::new(256), Err(GridError::SizeTooLarge { size: 256 }));
        assert!(Grid::new(255).is_ok());
    }

    #[test]
    fn test_try_cell_at_out_of_bounds() {
        let grid = grid(3);
        assert_eq!(
            grid.try_cell_at(Coord::new(3, 1)),
            Err(GridError::OutOfBounds {
                coord: Coord::new(3, 1),
                size: 3,
            })
        );
        assert_eq!(
            grid.try_cell_at(Coord::new(0, 0)),
            Ok(Occupant::Tile(TileId::new(0)))
        );
        assert_eq!(
            GridError::OutOfBounds {
                coord: Coord::new(3, 1),
                size: 3
            }
            .to_string(),
            "coordinate (3, 1) is out of bounds for a 3x3 grid"
        );
    }

    #[test]
    #[should_panic(expected = "coordinate (0, 4) is out of bounds for a 4x4 grid")]
    fn test_cell_at_out_of_bounds_panics() {
        let _ = grid(4).cell_at(Coord::new(0, 4));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_swap_out_of_bounds_panics() {
        grid(2).swap(Coord::new(0, 0), Coord::new(2, 0));
    }

    #[test]
    fn test_swap_tracks_empty_slot() {
        let mut grid = grid(3);
        let tile = grid.tile_at(Coord::new(0, 2));
        grid.swap(Coord::new(0, 2), grid.empty_slot_position());
        grid.check_invariants();
        assert_eq!(grid.empty_slot_position(), Coord::new(0, 2));
        assert_eq!(grid.coord_of(tile), Coord::new(2, 0));
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_press_and_press_back_restores_solved() {
        // 3x3 grid, empty slot at (2, 0); the tile above it is adjacent.
        let mut grid = grid(3);
        let tile = grid.tile_at(Coord::new(2, 1));
        assert_eq!(tile.home(3), Coord::new(2, 1));

        let slide = grid.move_tile(tile).unwrap();
        assert_eq!(
            slide,
            SlideMove {
                tile,
                from: Coord::new(2, 1),
                to: Coord::new(2, 0),
            }
        );
        assert_eq!(slide.empty_offset(), Offset::UP);
        assert_eq!(grid.coord_of(tile), Coord::new(2, 0));
        assert_eq!(grid.empty_slot_position(), Coord::new(2, 1));
        assert!(!grid.is_solved());

        grid.move_tile(tile).unwrap();
        assert!(grid.is_solved());
    }

    #[test]
    fn test_non_adjacent_move_is_noop() {
        let mut grid = grid(3);
        let before = grid.clone();
        // Distance 2 from the empty slot at (2, 0).
        let tile = grid.tile_at(Coord::new(0, 0));
        assert!(!grid.can_move(tile));
        assert_eq!(grid.move_tile(tile), None);
        // Diagonal neighbor.
        let tile = grid.tile_at(Coord::new(1, 1));
        assert_eq!(grid.move_tile(tile), None);
        // The empty body itself and foreign ids.
        assert_eq!(grid.move_tile(grid.empty_tile()), None);
        assert_eq!(grid.move_tile(TileId::new(200)), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_display() {
        let mut grid = grid(3);
        assert_eq!(grid.to_string(), "7 8 9\n4 5 6\n1 2 .\n");
        let tile = grid.tile_at(Coord::new(1, 0));
        grid.move_tile(tile);
        assert_eq!(grid.to_string(), "7 8 9\n4 5 6\n1 . 2\n");

        let grid = Grid::new(4).unwrap();
        assert_eq!(
            grid.to_string(),
            "13 14 15 16\n 9 10 11 12\n 5  6  7  8\n 1  2  3  .\n"
        );
    }

    proptest! {
        #[test]
        fn test_bijection_holds_for_any_press_sequence(
            size in 2usize..=6,
            presses in prop::collection::vec(0u16..40, 0..200),
        ) {
            let mut grid = Grid::new(size).unwrap();
            for press in presses {
                let tile = TileId::new(press);
                let before = grid.clone();
                let legal = tile.index() < grid.cell_count()
                    && tile != grid.empty_tile()
                    && grid.coord_of(tile).manhattan_distance(grid.empty_slot_position()) == 1;
                let slide = grid.move_tile(tile);
                prop_assert_eq!(slide.is_some(), legal);
                if !legal {
                    prop_assert_eq!(&grid, &before);
                }
                grid.check_invariants();
            }
        }

        #[test]
        fn test_reversing_slides_restores_solved(
            size in 2usize..=5,
            presses in prop::collection::vec(0u16..25, 0..100),
        ) {
            let mut grid = Grid::new(size).unwrap();
            let slides: Vec<SlideMove> = presses
                .into_iter()
                .filter_map(|press| grid.move_tile(TileId::new(press)))
                .collect();
            for slide in slides.iter().rev() {
                let undone = grid.move_tile(slide.tile);
                prop_assert_eq!(undone.map(|s| s.to), Some(slide.from));
            }
            prop_assert!(grid.is_solved());
        }
    }
}
