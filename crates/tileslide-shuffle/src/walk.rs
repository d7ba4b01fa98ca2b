use rand::Rng as _;
use rand_pcg::Pcg64;
use tileslide_core::{Grid, Offset, TileId};

use crate::ShuffleSeed;

/// One step of a shuffle walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShuffleStep {
    /// The step the empty slot takes.
    pub offset: Offset,
    /// The tile that slides into the empty slot.
    pub tile: TileId,
}

/// A non-reversing random walk of the empty slot.
///
/// Each call to [`ShuffleWalk::next_step`] picks a random starting point in
/// [`Offset::UNITS`] and scans them cyclically for the first offset that
///
/// 1. is not the exact reverse of the previous step, and
/// 2. keeps the empty slot inside the grid.
///
/// The previous offset starts out as [`Offset::ZERO`], whose reverse matches no unit
/// offset, so the first step is unconstrained.
///
/// The walk only chooses steps; the caller applies each one, so that an animated
/// session can wait for the previous slide to finish before asking for the next.
#[derive(Debug, Clone)]
pub struct ShuffleWalk {
    remaining: usize,
    previous: Offset,
    seed: ShuffleSeed,
    rng: Pcg64,
}

impl ShuffleWalk {
    /// Creates a walk of `steps` slides.
    #[must_use]
    pub fn new(steps: usize, seed: ShuffleSeed) -> Self {
        Self {
            remaining: steps,
            previous: Offset::ZERO,
            seed,
            rng: seed.rng(),
        }
    }

    /// Returns the seed driving this walk.
    #[must_use]
    pub const fn seed(&self) -> ShuffleSeed {
        self.seed
    }

    /// Returns the number of steps still to take.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns `true` once every step has been taken.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the offset of the last step taken, or [`Offset::ZERO`] before the first.
    #[must_use]
    pub const fn previous_offset(&self) -> Offset {
        self.previous
    }

    /// Chooses the next step for `grid`, or returns `None` when the walk is finished.
    ///
    /// The returned tile is adjacent to the empty slot, so sliding it is always legal.
    /// The grid is not modified.
    ///
    /// # Panics
    ///
    /// Panics if no non-reversing in-bounds offset exists. Every cell of a grid with
    /// side 2 or more has at least two in-bounds neighbors, so at most one of them can
    /// be forbidden.
    pub fn next_step(&mut self, grid: &Grid) -> Option<ShuffleStep> {
        if self.remaining == 0 {
            return None;
        }

        let empty = grid.empty_slot_position();
        let forbidden = -self.previous;
        let start = self.rng.random_range(0..Offset::UNITS.len());
        let Some((offset, coord)) = (0..Offset::UNITS.len())
            .map(|i| Offset::UNITS[(start + i) % Offset::UNITS.len()])
            .filter(|offset| *offset != forbidden)
            .find_map(|offset| grid.neighbor(empty, offset).map(|coord| (offset, coord)))
        else {
            let size = grid.size();
            panic!("no non-reversing step from {empty} on a {size}x{size} grid");
        };

        self.remaining -= 1;
        self.previous = offset;
        let tile = grid.tile_at(coord);
        log::trace!("shuffle step {offset}: slide {tile} from {coord} into {empty}");
        Some(ShuffleStep { offset, tile })
    }
}

/// Applies a whole walk of `steps` slides to `grid` at once.
///
/// Returns the steps in the order they were applied. Sliding the same tiles again in
/// reverse order restores the original arrangement.
///
/// # Panics
///
/// Panics if the walk produces an illegal slide, which would indicate a bug in
/// [`ShuffleWalk`].
pub fn scramble(grid: &mut Grid, steps: usize, seed: ShuffleSeed) -> Vec<ShuffleStep> {
    let mut walk = ShuffleWalk::new(steps, seed);
    let mut applied = Vec::with_capacity(steps);
    while let Some(step) = walk.next_step(grid) {
        let slide = grid.move_tile(step.tile);
        assert!(slide.is_some(), "shuffle step {step:?} is not a legal slide");
        applied.push(step);
    }
    let size = grid.size();
    log::debug!("scrambled {size}x{size} grid with {steps} steps, seed {seed}");
    applied
}
