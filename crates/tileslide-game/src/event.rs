//! Messages exchanged with the presentation layer.

use std::time::Duration;

use tileslide_core::TileId;

use crate::Point;

/// Input consumed by [`PuzzleSession::handle`].
///
/// [`PuzzleSession::handle`]: crate::PuzzleSession::handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Event {
    /// The player pressed a tile's visual body.
    TilePressed(TileId),
    /// The player asked for a new shuffle (only honored while solved).
    StartShuffleRequested,
    /// Time advanced by the given delta.
    Tick(Duration),
}

/// Output produced for the renderer.
///
/// Commands are buffered by the session and collected with
/// [`PuzzleSession::take_commands`].
///
/// [`PuzzleSession::take_commands`]: crate::PuzzleSession::take_commands
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum Command {
    /// Frame the camera around the grid. Emitted once at setup.
    FrameCamera {
        /// Side length of the grid.
        grid_size: u8,
        /// Orthographic half-height that fits the grid.
        orthographic_size: f32,
    },
    /// Put a tile body at a position immediately, without animation.
    PlaceTile {
        /// The tile body.
        tile: TileId,
        /// Its new position.
        position: Point,
    },
    /// A tile starts sliding towards `target`.
    AnimateTileTo {
        /// The sliding tile.
        tile: TileId,
        /// Where the slide ends.
        target: Point,
        /// How long the slide takes.
        duration: Duration,
    },
    /// A sliding tile's sampled position for the current tick.
    SetTilePosition {
        /// The sliding tile.
        tile: TileId,
        /// Its current position.
        position: Point,
    },
    /// Show or hide a tile body.
    SetTileVisible {
        /// The tile body.
        tile: TileId,
        /// Whether it is drawn.
        visible: bool,
    },
    /// The player completed the puzzle.
    Solved,
}
