//! The puzzle state machine.

use std::{mem, time::Duration};

use tileslide_core::{Grid, TileId};
use tileslide_shuffle::{SeedSource, ShuffleSeed, ShuffleWalk};

use crate::{
    Command, ConfigError, Event, InputQueue, Motion, MotionScheduler, MotionStep, MoveOutcome,
    Point, PuzzleConfig,
    executor::{MoveExecutor, TileBody},
    layout,
};

/// Top-level state of a puzzle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Mode {
    /// Every tile is home; waiting for a shuffle request.
    #[display("solved")]
    Solved,
    /// The shuffle walk is running; player input is ignored.
    #[display("shuffling")]
    Shuffling,
    /// The player is solving the puzzle.
    #[display("in play")]
    InPlay,
}

/// Counters describing what happened to move requests.
///
/// Dropped requests have no effect on play; the counters only make them observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveStats {
    /// Player slides that were executed.
    pub player_moves: usize,
    /// Shuffle slides that were executed.
    pub shuffle_moves: usize,
    /// Presses on tiles that were not adjacent to the empty slot.
    pub illegal_moves: usize,
    /// Presses that were illegal when dequeued after a slide finished, or were still
    /// queued when the puzzle was solved.
    pub stale_moves: usize,
    /// Presses received outside of play (while solved or shuffling).
    pub ignored_presses: usize,
    /// Presses rejected because the input queue was full.
    pub rejected_inputs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainCause {
    Press,
    MotionFinished,
}

/// A running sliding-tile puzzle.
///
/// The session owns the grid, the tile bodies, the motion scheduler, the input queue
/// and the shuffle walk. Presentation code feeds it [`Event`]s through
/// [`PuzzleSession::handle`] and collects the resulting [`Command`]s with
/// [`PuzzleSession::take_commands`].
///
/// Exactly one slide is animated at a time. The tick that finishes a slide is the only
/// thing that lets the next slide start, whether it comes from the shuffle walk or
/// from the input queue.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tileslide_game::{Event, Mode, PuzzleConfig, PuzzleSession};
///
/// let config = PuzzleConfig {
///     grid_size: 3,
///     shuffle_length: 5,
///     ..PuzzleConfig::default()
/// };
/// let mut session = PuzzleSession::new(config)?;
/// assert_eq!(session.mode(), Mode::Solved);
///
/// session.handle(Event::StartShuffleRequested);
/// assert_eq!(session.mode(), Mode::Shuffling);
///
/// while session.is_block_moving() {
///     session.handle(Event::Tick(Duration::from_millis(16)));
/// }
/// assert_eq!(session.mode(), Mode::InPlay);
/// # Ok::<(), tileslide_game::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    config: PuzzleConfig,
    grid: Grid,
    bodies: Vec<TileBody>,
    motion: MotionScheduler,
    inputs: InputQueue,
    mode: Mode,
    shuffle: Option<ShuffleWalk>,
    seeds: SeedSource,
    last_seed: Option<ShuffleSeed>,
    stats: MoveStats,
    outbox: Vec<Command>,
}

impl PuzzleSession {
    /// Builds a solved session.
    ///
    /// The command buffer starts out with a [`Command::FrameCamera`] followed by one
    /// [`Command::PlaceTile`] per tile body.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`PuzzleConfig::validate`].
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let size = grid.size();

        let bodies: Vec<TileBody> = grid
            .bodies()
            .map(|tile| TileBody {
                position: layout::world_position(grid.coord_of(tile), size),
                visible: true,
            })
            .collect();
        let mut outbox = vec![Command::FrameCamera {
            grid_size: size,
            orthographic_size: layout::orthographic_size(size),
        }];
        outbox.extend(grid.bodies().map(|tile| Command::PlaceTile {
            tile,
            position: bodies[tile.index()].position,
        }));

        let inputs = match config.max_pending_inputs {
            Some(capacity) => InputQueue::bounded(capacity),
            None => InputQueue::new(),
        };
        let seeds = match config.shuffle_seed {
            Some(seed) => SeedSource::new(seed),
            None => SeedSource::from_entropy(),
        };

        log::info!("created {size}x{size} puzzle");
        Ok(Self {
            config,
            grid,
            bodies,
            motion: MotionScheduler::new(),
            inputs,
            mode: Mode::Solved,
            shuffle: None,
            seeds,
            last_seed: None,
            stats: MoveStats::default(),
            outbox,
        })
    }

    /// Returns the session settings.
    #[must_use]
    pub const fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Returns the logical grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` while a slide is being animated.
    #[must_use]
    pub const fn is_block_moving(&self) -> bool {
        self.motion.is_in_flight()
    }

    /// Returns the slide being animated, if any.
    #[must_use]
    pub const fn current_motion(&self) -> Option<&Motion> {
        self.motion.current()
    }

    /// Returns the number of buffered presses.
    #[must_use]
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of shuffle slides not yet started.
    #[must_use]
    pub fn shuffle_moves_remaining(&self) -> usize {
        self.shuffle.as_ref().map_or(0, ShuffleWalk::remaining)
    }

    /// Returns the seed of the most recent shuffle.
    #[must_use]
    pub const fn shuffle_seed(&self) -> Option<ShuffleSeed> {
        self.last_seed
    }

    /// Returns the move counters.
    #[must_use]
    pub const fn stats(&self) -> &MoveStats {
        &self.stats
    }

    /// Returns the visual position of a tile body, or `None` for a foreign tile.
    #[must_use]
    pub fn tile_position(&self, tile: TileId) -> Option<Point> {
        self.bodies.get(tile.index()).map(|body| body.position)
    }

    /// Returns whether a tile body is drawn. Only the empty slot's body is ever hidden.
    #[must_use]
    pub fn is_tile_visible(&self, tile: TileId) -> bool {
        self.bodies.get(tile.index()).is_some_and(|body| body.visible)
    }

    /// Drains the buffered renderer commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        mem::take(&mut self.outbox)
    }

    /// Processes one event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::TilePressed(tile) => self.press_tile(tile),
            Event::StartShuffleRequested => {
                self.start_shuffle(self.config.shuffle_length);
            }
            Event::Tick(delta) => self.tick(delta),
        }
    }

    /// Starts a shuffle of `steps` slides.
    ///
    /// Only honored while [`Mode::Solved`] and for a non-zero `steps`; returns whether
    /// the shuffle started. The empty slot's body is hidden and the first slide starts
    /// immediately.
    pub fn start_shuffle(&mut self, steps: usize) -> bool {
        if !self.mode.is_solved() {
            log::debug!("ignored shuffle request while {}", self.mode);
            return false;
        }
        if steps == 0 {
            log::debug!("ignored empty shuffle request");
            return false;
        }
        debug_assert!(!self.motion.is_in_flight());

        let seed = self.seeds.next_seed();
        log::info!("shuffling {steps} steps with seed {seed}");
        self.set_mode(Mode::Shuffling);
        self.set_visible(self.grid.empty_tile(), false);
        self.shuffle = Some(ShuffleWalk::new(steps, seed));
        self.last_seed = Some(seed);
        self.step_shuffle();
        true
    }

    /// Handles a press on `tile`.
    ///
    /// While [`Mode::InPlay`] the press is queued and the queue is drained; presses in
    /// other modes are ignored. Presses on tiles that cannot move are dropped silently.
    pub fn press_tile(&mut self, tile: TileId) {
        if !self.mode.is_in_play() {
            self.stats.ignored_presses += 1;
            log::debug!("ignored press on {tile} while {}", self.mode);
            return;
        }
        if !self.inputs.enqueue(tile) {
            self.stats.rejected_inputs += 1;
            log::debug!("input queue full, rejected press on {tile}");
            return;
        }
        self.drain_inputs(DrainCause::Press);
    }

    /// Advances the in-flight slide by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        let Some(step) = self.motion.tick(delta) else {
            return;
        };
        match step {
            MotionStep::Progress { tile, position } => {
                self.set_position(tile, position);
            }
            MotionStep::Finished { tile, position } => {
                self.set_position(tile, position);
                self.on_motion_finished();
            }
        }
    }

    fn executor(&mut self) -> MoveExecutor<'_> {
        MoveExecutor {
            grid: &mut self.grid,
            bodies: &mut self.bodies,
            motion: &mut self.motion,
            outbox: &mut self.outbox,
        }
    }

    fn on_motion_finished(&mut self) {
        match self.mode {
            Mode::Shuffling => {
                if self.shuffle_moves_remaining() > 0 {
                    self.step_shuffle();
                } else {
                    self.shuffle = None;
                    if self.grid.is_solved() {
                        // The walk wandered back to the start.
                        self.finish_solved(false);
                    } else {
                        self.set_mode(Mode::InPlay);
                    }
                }
            }
            Mode::InPlay => {
                if self.grid.is_solved() {
                    self.finish_solved(true);
                } else {
                    self.drain_inputs(DrainCause::MotionFinished);
                }
            }
            Mode::Solved => unreachable!("no slide can run while solved"),
        }
    }

    fn step_shuffle(&mut self) {
        let Some(step) = self
            .shuffle
            .as_mut()
            .and_then(|walk| walk.next_step(&self.grid))
        else {
            return;
        };
        let duration = self.config.shuffle_move_duration;
        let outcome = self.executor().execute(step.tile, duration);
        assert!(
            outcome.is_started(),
            "shuffle step {step:?} was not executed: {outcome:?}"
        );
        self.stats.shuffle_moves += 1;
    }

    fn drain_inputs(&mut self, cause: DrainCause) {
        while !self.motion.is_in_flight() {
            let Some(tile) = self.inputs.pop_front() else {
                break;
            };
            let duration = self.config.player_move_duration;
            let outcome = self.executor().execute(tile, duration);
            match outcome {
                MoveOutcome::Started(_) => self.stats.player_moves += 1,
                MoveOutcome::Illegal => match cause {
                    DrainCause::Press => {
                        self.stats.illegal_moves += 1;
                        log::debug!("dropped illegal move of {tile}");
                    }
                    DrainCause::MotionFinished => {
                        self.stats.stale_moves += 1;
                        log::debug!("dropped stale queued move of {tile}");
                    }
                },
                MoveOutcome::Busy => unreachable!("drained while a slide is in flight"),
            }
        }
    }

    fn finish_solved(&mut self, by_player: bool) {
        let discarded = self.inputs.clear();
        if discarded > 0 {
            self.stats.stale_moves += discarded;
            log::debug!("discarded {discarded} queued moves after solving");
        }
        self.set_mode(Mode::Solved);
        self.set_visible(self.grid.empty_tile(), true);
        if by_player {
            self.outbox.push(Command::Solved);
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        log::info!("mode {} -> {mode}", self.mode);
        self.mode = mode;
    }

    fn set_position(&mut self, tile: TileId, position: Point) {
        self.bodies[tile.index()].position = position;
        self.outbox.push(Command::SetTilePosition { tile, position });
    }

    fn set_visible(&mut self, tile: TileId, visible: bool) {
        self.bodies[tile.index()].visible = visible;
        self.outbox.push(Command::SetTileVisible { tile, visible });
    }
}

#[cfg(test)]
mod tests {
    use tileslide_core::Coord;

    use super::*;
    use crate::testing::SessionTester;

    #[test]
    fn test_new_frames_camera_and_places_every_body() {
        let mut session = PuzzleSession::new(PuzzleConfig::default().with_grid_size(3)).unwrap();
        let commands = session.take_commands();
        assert_eq!(commands.len(), 1 + 9);
        assert_eq!(
            commands[0],
            Command::FrameCamera {
                grid_size: 3,
                orthographic_size: layout::orthographic_size(3),
            }
        );
        for tile in session.grid().bodies() {
            let position = layout::world_position(tile.home(3), 3);
            assert!(commands.contains(&Command::PlaceTile { tile, position }));
            assert!(session.is_tile_visible(tile));
        }
        assert!(session.take_commands().is_empty());
        assert_eq!(session.mode(), Mode::Solved);
        assert_eq!(session.shuffle_seed(), None);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = PuzzleSession::new(PuzzleConfig::default().with_shuffle_length(0)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroShuffleLength);
    }

    #[test]
    fn test_shuffle_hides_empty_slot_and_starts_first_step() {
        let mut session = SessionTester::solved(3).shuffle(5).into_session();
        let empty = session.grid().empty_tile();
        assert_eq!(session.mode(), Mode::Shuffling);
        assert!(session.is_block_moving());
        assert!(!session.is_tile_visible(empty));
        assert_eq!(session.shuffle_moves_remaining(), 4);
        assert!(session.shuffle_seed().is_some());

        let commands = session.take_commands();
        assert_eq!(
            commands[0],
            Command::SetTileVisible {
                tile: empty,
                visible: false,
            }
        );
        assert!(commands[1].is_place_tile());
        assert!(commands[2].is_animate_tile_to());
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_shuffle_request_only_honored_while_solved() {
        let mut session = SessionTester::solved(3).shuffle(3).into_session();
        assert!(!session.start_shuffle(3));
        assert_eq!(session.shuffle_moves_remaining(), 2);

        while session.is_block_moving() {
            session.tick(Duration::from_millis(40));
        }
        assert_eq!(session.mode(), Mode::InPlay);
        assert!(session.shuffle_seed().is_some());
        session.handle(Event::StartShuffleRequested);
        assert_eq!(session.mode(), Mode::InPlay);
        assert!(!session.is_block_moving());

        let mut session = SessionTester::solved(3).into_session();
        assert!(!session.start_shuffle(0));
        assert_eq!(session.mode(), Mode::Solved);
    }

    #[test]
    fn test_presses_outside_play_are_ignored() {
        SessionTester::solved(3)
            .press_at(Coord::new(1, 0))
            .assert_moving(false)
            .shuffle(2)
            .press_at(Coord::new(0, 0))
            .assert_pending(0)
            .assert_stats(MoveStats {
                shuffle_moves: 1,
                ignored_presses: 2,
                ..MoveStats::default()
            })
            .settle()
            .assert_mode(Mode::InPlay);
    }

    #[test]
    fn test_shuffle_returning_to_start_ends_solved_without_announcing() {
        // On a 2x2 grid the walk is forced around the ring and every twelfth
        // slide restores the solved arrangement.
        let mut commands = Vec::new();
        SessionTester::solved(2)
            .shuffle(12)
            .settle()
            .take_commands(&mut commands)
            .assert_mode(Mode::Solved)
            .assert_empty_slot_at(Coord::new(1, 0))
            .assert_empty_visible(true)
            .assert_bodies_at_rest()
            .assert_stats(MoveStats {
                shuffle_moves: 12,
                ..MoveStats::default()
            });
        assert!(!commands.contains(&Command::Solved));
        assert_eq!(
            commands.iter().filter(|c| c.is_animate_tile_to()).count(),
            12
        );
    }

    #[test]
    fn test_solving_discards_queued_presses() {
        let mut commands = Vec::new();
        let tester = SessionTester::solved(3).shuffle(1).settle();
        let empty = tester.session().grid().empty_tile();
        tester
            .assert_mode(Mode::InPlay)
            .assert_empty_visible(false)
            .press_at(Coord::new(2, 0))
            .press_at(Coord::new(0, 2))
            .press_at(Coord::new(0, 2))
            .assert_pending(2)
            .take_commands(&mut commands)
            .settle()
            .take_commands(&mut commands)
            .assert_mode(Mode::Solved)
            .assert_pending(0)
            .assert_empty_visible(true)
            .assert_bodies_at_rest()
            .assert_stats(MoveStats {
                player_moves: 1,
                shuffle_moves: 1,
                stale_moves: 2,
                ..MoveStats::default()
            });
        assert_eq!(commands.last(), Some(&Command::Solved));
        assert!(commands.contains(&Command::SetTileVisible {
            tile: empty,
            visible: true,
        }));
    }

    #[test]
    fn test_far_press_counts_as_stale_when_queued_and_illegal_when_idle() {
        let tester = SessionTester::solved(3).shuffle(2).settle();
        let empty = tester.session().grid().empty_slot_position();
        let grid = tester.session().grid();
        let near = grid
            .tiles()
            .find(|&tile| grid.coord_of(tile).is_adjacent(empty))
            .unwrap();
        let tester = tester.press(near).assert_moving(true);

        // Not next to the slot the moving tile just left.
        let grid = tester.session().grid();
        let hole = grid.empty_slot_position();
        let far = grid
            .tiles()
            .find(|&tile| grid.coord_of(tile).manhattan_distance(hole) >= 2)
            .unwrap();

        tester
            .press(far)
            .assert_pending(1)
            .settle()
            .assert_stats(MoveStats {
                player_moves: 1,
                shuffle_moves: 2,
                stale_moves: 1,
                ..MoveStats::default()
            })
            .press(far)
            .assert_moving(false)
            .assert_stats(MoveStats {
                player_moves: 1,
                shuffle_moves: 2,
                illegal_moves: 1,
                stale_moves: 1,
                ..MoveStats::default()
            });
    }

    #[test]
    fn test_progress_samples_are_forwarded() {
        let mut session = SessionTester::solved(3).shuffle(1).into_session();
        session.take_commands();
        let motion = *session.current_motion().unwrap();
        session.tick(Duration::from_millis(50));
        let position = motion.start().lerp(motion.target(), 0.5);
        assert_eq!(
            session.take_commands(),
            vec![Command::SetTilePosition {
                tile: motion.tile(),
                position,
            }]
        );
        assert_eq!(session.tile_position(motion.tile()), Some(position));
        session.tick(Duration::from_millis(50));
        assert_eq!(
            session.take_commands(),
            vec![Command::SetTilePosition {
                tile: motion.tile(),
                position: motion.target(),
            }]
        );
        assert_eq!(session.mode(), Mode::InPlay);
    }

    #[test]
    fn test_unknown_tile_has_no_body() {
        let session = PuzzleSession::new(PuzzleConfig::default().with_grid_size(2)).unwrap();
        assert_eq!(session.tile_position(TileId::new(4)), None);
        assert!(!session.is_tile_visible(TileId::new(4)));
    }
}
