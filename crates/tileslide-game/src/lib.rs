//! Runtime engine for animated sliding-tile puzzles.
//!
//! [`PuzzleSession`] ties the logical [`Grid`](tileslide_core::Grid) to the visual
//! state of every tile body. It consumes [`Event`]s (tile presses, shuffle requests
//! and time ticks) and produces [`Command`]s for whatever renders the puzzle.
//!
//! # Overview
//!
//! - [`session`]: The puzzle state machine ([`PuzzleSession`], [`Mode`], [`MoveStats`])
//! - [`motion`]: Single-flight tile animation ([`MotionScheduler`])
//! - [`input`]: Buffered presses ([`InputQueue`])
//! - [`layout`]: World coordinates of cells ([`Point`])
//! - [`config`]: Session settings ([`PuzzleConfig`])
//! - [`event`]: The [`Event`] and [`Command`] enums
//! - [`testing`]: A fluent harness for driving sessions in tests
//!
//! # Timing model
//!
//! Nothing in this crate reads a clock. The host calls
//! `handle(Event::Tick(delta))` once per frame; the in-flight slide advances by
//! `delta` and the tick that completes it also starts the next queued slide or
//! shuffle step.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use tileslide_core::Coord;
//! use tileslide_game::{Command, Event, Mode, PuzzleConfig, PuzzleSession};
//!
//! let config = PuzzleConfig::default()
//!     .with_grid_size(3)
//!     .with_shuffle_length(7);
//! let mut session = PuzzleSession::new(config)?;
//! assert!(matches!(
//!     session.take_commands().first(),
//!     Some(Command::FrameCamera { grid_size: 3, .. })
//! ));
//!
//! // Presses are ignored until the puzzle has been shuffled.
//! let tile = session.grid().tile_at(Coord::new(1, 0));
//! session.handle(Event::TilePressed(tile));
//! assert!(!session.is_block_moving());
//!
//! session.handle(Event::StartShuffleRequested);
//! while session.is_block_moving() {
//!     session.handle(Event::Tick(Duration::from_millis(16)));
//! }
//! assert_eq!(session.mode(), Mode::InPlay);
//! # Ok::<(), tileslide_game::ConfigError>(())
//! ```

pub mod config;
pub mod event;
pub mod input;
pub mod layout;
pub mod motion;
pub mod session;
pub mod testing;

mod executor;

pub use self::{
    config::{ConfigError, PuzzleConfig},
    event::{Command, Event},
    executor::MoveOutcome,
    input::InputQueue,
    layout::Point,
    motion::{Motion, MotionScheduler, MotionStep},
    session::{Mode, MoveStats, PuzzleSession},
};
