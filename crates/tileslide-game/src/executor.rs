use std::time::Duration;

use tileslide_core::{Grid, SlideMove, TileId};

use crate::{Command, MotionScheduler, Point};

/// Visual state of one tile body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TileBody {
    pub(crate) position: Point,
    pub(crate) visible: bool,
}

/// Result of asking the executor to slide a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The slide was applied and its motion started.
    Started(SlideMove),
    /// The tile is not adjacent to the empty slot; nothing changed.
    Illegal,
    /// Another motion is still in flight; nothing changed.
    Busy,
}

/// Validates and applies slides, handing the moved tile to the motion scheduler.
///
/// Borrows exactly the session state a slide touches, so the grid and the in-flight
/// flag are only ever changed through [`MoveExecutor::execute`].
#[derive(Debug)]
pub(crate) struct MoveExecutor<'a> {
    pub(crate) grid: &'a mut Grid,
    pub(crate) bodies: &'a mut [TileBody],
    pub(crate) motion: &'a mut MotionScheduler,
    pub(crate) outbox: &'a mut Vec<Command>,
}

impl MoveExecutor<'_> {
    /// Slides `tile` into the empty slot over `duration`.
    ///
    /// On success the empty slot's body jumps to the tile's old position and the tile
    /// animates towards the empty slot's old position; the motion is in flight when
    /// this returns.
    pub(crate) fn execute(&mut self, tile: TileId, duration: Duration) -> MoveOutcome {
        if self.motion.is_in_flight() {
            return MoveOutcome::Busy;
        }
        let Some(slide) = self.grid.move_tile(tile) else {
            return MoveOutcome::Illegal;
        };

        let empty = self.grid.empty_tile();
        let start = self.bodies[tile.index()].position;
        let target = self.bodies[empty.index()].position;
        self.bodies[empty.index()].position = start;
        self.outbox.push(Command::PlaceTile {
            tile: empty,
            position: start,
        });
        self.outbox.push(Command::AnimateTileTo {
            tile,
            target,
            duration,
        });
        self.motion.animate(tile, start, target, duration);
        log::debug!("slide {tile} from {} to {}", slide.from, slide.to);
        MoveOutcome::Started(slide)
    }
}
