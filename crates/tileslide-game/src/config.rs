//! Session settings.

use std::{num::NonZero, time::Duration};

use tileslide_core::{Grid, GridError};
use tileslide_shuffle::ShuffleSeed;

/// Settings for a [`PuzzleSession`].
///
/// Start from [`PuzzleConfig::default`] and override fields as needed:
///
/// ```
/// use tileslide_game::PuzzleConfig;
///
/// let config = PuzzleConfig {
///     grid_size: 3,
///     shuffle_length: 40,
///     ..PuzzleConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// [`PuzzleSession`]: crate::PuzzleSession
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Side length of the grid.
    pub grid_size: usize,
    /// Number of slides performed by a shuffle.
    pub shuffle_length: usize,
    /// Animation duration of a player-driven slide.
    pub player_move_duration: Duration,
    /// Animation duration of a shuffle slide, usually shorter than a player slide.
    pub shuffle_move_duration: Duration,
    /// Upper bound on buffered presses; `None` buffers without limit.
    pub max_pending_inputs: Option<NonZero<usize>>,
    /// Seed for the session's shuffles; `None` draws a random one.
    pub shuffle_seed: Option<ShuffleSeed>,
}

impl PuzzleConfig {
    /// Default side length.
    pub const DEFAULT_GRID_SIZE: usize = 4;
    /// Default number of shuffle slides.
    pub const DEFAULT_SHUFFLE_LENGTH: usize = 20;
    /// Default player slide duration.
    pub const DEFAULT_PLAYER_MOVE_DURATION: Duration = Duration::from_millis(200);
    /// Default shuffle slide duration.
    pub const DEFAULT_SHUFFLE_MOVE_DURATION: Duration = Duration::from_millis(100);

    /// Sets the grid side length.
    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Sets the number of shuffle slides.
    #[must_use]
    pub const fn with_shuffle_length(mut self, shuffle_length: usize) -> Self {
        self.shuffle_length = shuffle_length;
        self
    }

    /// Sets the player and shuffle slide durations.
    #[must_use]
    pub const fn with_move_durations(mut self, player: Duration, shuffle: Duration) -> Self {
        self.player_move_duration = player;
        self.shuffle_move_duration = shuffle;
        self
    }

    /// Bounds the input queue.
    #[must_use]
    pub const fn with_max_pending_inputs(mut self, max: NonZero<usize>) -> Self {
        self.max_pending_inputs = Some(max);
        self
    }

    /// Fixes the seed sequence used for shuffles.
    #[must_use]
    pub const fn with_shuffle_seed(mut self, seed: ShuffleSeed) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Checks that the settings describe a playable session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Grid`] if the grid size is unsupported and
    /// [`ConfigError::ZeroShuffleLength`] if shuffles would not move anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < Grid::MIN_SIZE {
            return Err(GridError::SizeTooSmall {
                size: self.grid_size,
            }
            .into());
        }
        if self.grid_size > Grid::MAX_SIZE {
            return Err(GridError::SizeTooLarge {
                size: self.grid_size,
            }
            .into());
        }
        if self.shuffle_length == 0 {
            return Err(ConfigError::ZeroShuffleLength);
        }
        Ok(())
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            shuffle_length: Self::DEFAULT_SHUFFLE_LENGTH,
            player_move_duration: Self::DEFAULT_PLAYER_MOVE_DURATION,
            shuffle_move_duration: Self::DEFAULT_SHUFFLE_MOVE_DURATION,
            max_pending_inputs: None,
            shuffle_seed: None,
        }
    }
}

/// Errors detected while validating a [`PuzzleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    /// The grid cannot be built.
    #[display("invalid grid: {_0}")]
    Grid(#[from] GridError),
    /// The shuffle length is zero.
    #[display("shuffle length must be at least 1")]
    ZeroShuffleLength,
}
