//! Core data structures for sliding-tile puzzles.
//!
//! This crate models the logical state of an N×N sliding-tile puzzle: which tile
//! occupies which cell, where the empty slot is, and whether every tile is back at
//! its home cell. It has no notion of time or animation; those live in
//! `tileslide-game`.
//!
//! # Overview
//!
//! - [`coord`]: Grid coordinates ([`Coord`]) and unit steps between them ([`Offset`])
//! - [`tile`]: Tile identities ([`TileId`]) and cell occupants ([`Occupant`])
//! - [`grid`]: The [`Grid`] itself, including move validation and the swap primitive
//!
//! # Examples
//!
//! ```
//! use tileslide_core::{Coord, Grid};
//!
//! let mut grid = Grid::new(3)?;
//! assert_eq!(grid.empty_slot_position(), Coord::new(2, 0));
//!
//! // The tile directly above the empty slot can slide down into it.
//! let tile = grid.tile_at(Coord::new(2, 1));
//! let slide = grid.move_tile(tile).expect("tile is adjacent to the empty slot");
//! assert_eq!(slide.to, Coord::new(2, 0));
//! assert!(!grid.is_solved());
//!
//! // Sliding it back restores the solved arrangement.
//! grid.move_tile(tile);
//! assert!(grid.is_solved());
//! # Ok::<(), tileslide_core::GridError>(())
//! ```

pub mod coord;
pub mod grid;
pub mod tile;

pub use self::{
    coord::{Coord, Offset},
    grid::{Grid, GridError, SlideMove},
    tile::{Occupant, TileId},
};
