//! Random scrambling for sliding-tile grids.
//!
//! A scramble is a random walk of the empty slot: each step slides one of the empty
//! slot's neighbors into it. The walk never immediately undoes its previous step, so
//! every step makes progress away from the previous arrangement. Because every step
//! is an ordinary legal slide, any scrambled grid is solvable by construction.
//!
//! Walks are driven by a [`ShuffleSeed`], which makes them reproducible.
//!
//! # Examples
//!
//! Stepping a walk one slide at a time, the way an animated session does:
//!
//! ```
//! use tileslide_core::Grid;
//! use tileslide_shuffle::{ShuffleSeed, ShuffleWalk};
//!
//! let mut grid = Grid::new(4)?;
//! let mut walk = ShuffleWalk::new(20, ShuffleSeed::from(7));
//! while let Some(step) = walk.next_step(&grid) {
//!     grid.move_tile(step.tile).expect("shuffle steps are legal slides");
//! }
//! assert_eq!(walk.remaining(), 0);
//! # Ok::<(), tileslide_core::GridError>(())
//! ```
//!
//! Or all at once:
//!
//! ```
//! use tileslide_core::Grid;
//! use tileslide_shuffle::{ShuffleSeed, scramble};
//!
//! let mut grid = Grid::new(4)?;
//! let steps = scramble(&mut grid, 20, ShuffleSeed::random());
//! assert_eq!(steps.len(), 20);
//! # Ok::<(), tileslide_core::GridError>(())
//! ```

pub use self::{
    seed::{SeedSource, ShuffleSeed, ShuffleSeedError},
    walk::{ShuffleStep, ShuffleWalk, scramble},
};

mod seed;
mod walk;
