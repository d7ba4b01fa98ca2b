//! Test utilities for driving a [`PuzzleSession`].
//!
//! [`SessionTester`] wraps a session with a fixed shuffle seed and offers chainable
//! actions and assertions.
//!
//! # Example
//!
//! ```
//! use tileslide_core::Coord;
//! use tileslide_game::{Mode, testing::SessionTester};
//!
//! SessionTester::solved(3)
//!     .shuffle(1)
//!     .settle()
//!     .assert_mode(Mode::InPlay)
//!     .assert_empty_slot_not_at(Coord::new(2, 0));
//! ```

use std::time::Duration;

use tileslide_core::{Coord, TileId};
use tileslide_shuffle::ShuffleSeed;

use crate::{Command, Event, Mode, MoveStats, PuzzleConfig, PuzzleSession, layout};

/// A test harness for puzzle sessions.
///
/// All methods take and return `self`, enabling fluent method chaining.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct SessionTester {
    session: PuzzleSession,
    frame: Duration,
}

impl SessionTester {
    /// Upper bound on ticks spent by [`SessionTester::settle`].
    pub const MAX_SETTLE_TICKS: usize = 100_000;

    /// Seed used by [`SessionTester::solved`].
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Creates a tester around a session built from `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[track_caller]
    pub fn new(config: PuzzleConfig) -> Self {
        let mut session = PuzzleSession::new(config).unwrap();
        session.take_commands();
        Self {
            session,
            frame: Duration::from_millis(16),
        }
    }

    /// Creates a tester around a solved `size`×`size` session with a fixed seed.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a supported grid size.
    #[track_caller]
    pub fn solved(size: usize) -> Self {
        Self::new(
            PuzzleConfig::default()
                .with_grid_size(size)
                .with_shuffle_seed(ShuffleSeed::from(Self::DEFAULT_SEED)),
        )
    }

    /// Sets the tick length used by [`SessionTester::settle`].
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Returns the wrapped session.
    #[must_use]
    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// Consumes the tester and returns the session.
    #[must_use]
    pub fn into_session(self) -> PuzzleSession {
        self.session
    }

    /// Drains the session's command buffer into `commands`.
    #[must_use]
    pub fn take_commands(mut self, commands: &mut Vec<Command>) -> Self {
        commands.extend(self.session.take_commands());
        self
    }

    /// Feeds one event to the session.
    #[must_use]
    pub fn handle(mut self, event: Event) -> Self {
        self.session.handle(event);
        self
    }

    /// Starts a shuffle of `steps` slides.
    ///
    /// # Panics
    ///
    /// Panics if the session refuses to shuffle.
    #[track_caller]
    pub fn shuffle(mut self, steps: usize) -> Self {
        assert!(
            self.session.start_shuffle(steps),
            "shuffle of {steps} steps refused in mode {}",
            self.session.mode()
        );
        self
    }

    /// Presses the tile with the given identity.
    #[must_use]
    pub fn press(mut self, tile: TileId) -> Self {
        self.session.handle(Event::TilePressed(tile));
        self
    }

    /// Presses whatever body currently occupies `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    #[track_caller]
    pub fn press_at(self, coord: Coord) -> Self {
        let tile = self.session.grid().tile_at(coord);
        self.press(tile)
    }

    /// Advances time by `delta`.
    #[must_use]
    pub fn tick(mut self, delta: Duration) -> Self {
        self.session.handle(Event::Tick(delta));
        self
    }

    /// Ticks until no slide is in flight, then checks the grid invariants.
    ///
    /// # Panics
    ///
    /// Panics if the session does not settle within
    /// [`SessionTester::MAX_SETTLE_TICKS`] ticks.
    #[track_caller]
    pub fn settle(mut self) -> Self {
        let mut ticks = 0;
        while self.session.is_block_moving() {
            assert!(
                ticks < Self::MAX_SETTLE_TICKS,
                "session did not settle after {ticks} ticks"
            );
            self.session.handle(Event::Tick(self.frame));
            ticks += 1;
        }
        self.session.grid().check_invariants();
        self
    }

    /// Asserts the session mode.
    #[track_caller]
    pub fn assert_mode(self, expected: Mode) -> Self {
        assert_eq!(self.session.mode(), expected, "unexpected mode");
        self
    }

    /// Asserts whether a slide is in flight.
    #[track_caller]
    pub fn assert_moving(self, expected: bool) -> Self {
        assert_eq!(
            self.session.is_block_moving(),
            expected,
            "unexpected in-flight state"
        );
        self
    }

    /// Asserts the number of buffered presses.
    #[track_caller]
    pub fn assert_pending(self, expected: usize) -> Self {
        assert_eq!(
            self.session.pending_inputs(),
            expected,
            "unexpected number of pending inputs"
        );
        self
    }

    /// Asserts the move counters.
    #[track_caller]
    pub fn assert_stats(self, expected: MoveStats) -> Self {
        assert_eq!(*self.session.stats(), expected, "unexpected move stats");
        self
    }

    /// Asserts that the empty slot is at `coord`.
    #[track_caller]
    pub fn assert_empty_slot_at(self, coord: Coord) -> Self {
        assert_eq!(
            self.session.grid().empty_slot_position(),
            coord,
            "empty slot is elsewhere\n{}",
            self.session.grid()
        );
        self
    }

    /// Asserts that the empty slot is not at `coord`.
    #[track_caller]
    pub fn assert_empty_slot_not_at(self, coord: Coord) -> Self {
        assert_ne!(
            self.session.grid().empty_slot_position(),
            coord,
            "empty slot is at {coord}\n{}",
            self.session.grid()
        );
        self
    }

    /// Asserts that `tile` occupies `coord`.
    #[track_caller]
    pub fn assert_tile_at(self, tile: TileId, coord: Coord) -> Self {
        assert_eq!(
            self.session.grid().coord_of(tile),
            coord,
            "{tile} is elsewhere\n{}",
            self.session.grid()
        );
        self
    }

    /// Asserts that every tile body rests on its cell's world position.
    ///
    /// Only meaningful while idle.
    #[track_caller]
    pub fn assert_bodies_at_rest(self) -> Self {
        let grid = self.session.grid();
        for tile in grid.bodies() {
            let expected = layout::world_position(grid.coord_of(tile), grid.size());
            assert_eq!(
                self.session.tile_position(tile),
                Some(expected),
                "{tile} body is not on its cell"
            );
        }
        self
    }

    /// Asserts whether the empty slot's body is drawn.
    #[track_caller]
    pub fn assert_empty_visible(self, expected: bool) -> Self {
        let empty = self.session.grid().empty_tile();
        assert_eq!(
            self.session.is_tile_visible(empty),
            expected,
            "unexpected empty slot visibility"
        );
        self
    }
}
