//! Terminal driver for the sliding-tile puzzle engine.
//!
//! Reads one command per line from standard input and runs the session's tick loop
//! until the board settles, printing the board after each step.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p tileslide-cli -- --size 3 --seed 42
//! ```
//!
//! Commands:
//!
//! - `shuffle`: scramble the solved board
//! - a tile number: press that tile
//! - `show`: print the board, mode and counters
//! - `quit`: exit

use std::{
    io::{self, BufRead as _, Write as _},
    num::NonZero,
    process,
    str::FromStr,
    thread,
    time::Duration,
};

use clap::Parser;
use tileslide_core::TileId;
use tileslide_game::{Event, PuzzleConfig, PuzzleSession};
use tileslide_shuffle::ShuffleSeed;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Side length of the board.
    #[arg(short, long, value_name = "N", default_value_t = PuzzleConfig::DEFAULT_GRID_SIZE)]
    size: usize,

    /// Number of slides performed by `shuffle`.
    #[arg(long, value_name = "STEPS", default_value_t = PuzzleConfig::DEFAULT_SHUFFLE_LENGTH)]
    shuffle_length: usize,

    /// Shuffle seed: a decimal number or 64 hex digits. Random if omitted.
    #[arg(long, value_name = "SEED", value_parser = parse_seed)]
    seed: Option<ShuffleSeed>,

    /// Simulated frame length in milliseconds.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Maximum number of buffered presses. Unbounded if omitted.
    #[arg(long, value_name = "COUNT")]
    max_pending: Option<NonZero<usize>>,

    /// Sleep for each frame instead of running the tick loop flat out.
    #[arg(long)]
    realtime: bool,
}

fn parse_seed(s: &str) -> Result<ShuffleSeed, String> {
    if let Ok(value) = s.parse::<u64>() {
        return Ok(ShuffleSeed::from(value));
    }
    ShuffleSeed::from_str(s).map_err(|e| e.to_string())
}

/// A line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Shuffle,
    Press(u32),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command {_0:?} (type `help` for a list)")]
struct UnknownCommand(#[error(not(source))] String);

impl FromStr for Input {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let input = match s {
            "shuffle" | "s" => Self::Shuffle,
            "show" | "p" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => match s.parse::<u32>() {
                Ok(label) => Self::Press(label),
                Err(_) => return Err(UnknownCommand(s.to_owned())),
            },
        };
        Ok(input)
    }
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let mut config = PuzzleConfig::default()
        .with_grid_size(args.size)
        .with_shuffle_length(args.shuffle_length);
    if let Some(seed) = args.seed {
        config = config.with_shuffle_seed(seed);
    }
    if let Some(max) = args.max_pending {
        config = config.with_max_pending_inputs(max);
    }

    let session = match PuzzleSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            process::exit(2);
        }
    };
    let mut driver = Driver {
        session,
        frame: Duration::from_millis(args.tick_ms),
        realtime: args.realtime,
    };
    driver.flush();

    print!("{}", driver.session.grid());
    if let Err(e) = repl(&mut driver) {
        eprintln!("I/O error: {e}");
        process::exit(1);
    }
}

fn repl(driver: &mut Driver) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Input>() {
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Help) => print_help(),
            Ok(Input::Show) => driver.show(),
            Ok(Input::Shuffle) => {
                if !driver.session.mode().is_solved() {
                    println!("Finish the current puzzle before shuffling again.");
                    continue;
                }
                driver.session.handle(Event::StartShuffleRequested);
                driver.run_until_idle();
                print!("{}", driver.session.grid());
            }
            Ok(Input::Press(label)) => {
                let Some(tile) = driver.tile_for_label(label) else {
                    println!("There is no tile {label}.");
                    continue;
                };
                if !driver.session.mode().is_in_play() {
                    println!("Shuffle first.");
                    continue;
                }
                let illegal = driver.session.stats().illegal_moves;
                driver.session.handle(Event::TilePressed(tile));
                if driver.session.stats().illegal_moves > illegal {
                    println!("Tile {label} cannot move.");
                    continue;
                }
                driver.run_until_idle();
                print!("{}", driver.session.grid());
            }
            Err(e) => println!("{e}"),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  shuffle   scramble the solved board");
    println!("  <number>  press the tile with that number");
    println!("  show      print the board and counters");
    println!("  quit      exit");
}

struct Driver {
    session: PuzzleSession,
    frame: Duration,
    realtime: bool,
}

impl Driver {
    fn tile_for_label(&self, label: u32) -> Option<TileId> {
        let index = u16::try_from(label.checked_sub(1)?).ok()?;
        let tile = TileId::new(index);
        (tile.index() < self.session.grid().cell_count()
            && tile != self.session.grid().empty_tile())
        .then_some(tile)
    }

    fn run_until_idle(&mut self) {
        let mut frames = 0_u64;
        while self.session.is_block_moving() {
            if self.realtime {
                thread::sleep(self.frame);
            }
            self.session.handle(Event::Tick(self.frame));
            frames += 1;
            self.flush();
        }
        log::debug!("settled after {frames} frames");
    }

    fn flush(&mut self) {
        for command in self.session.take_commands() {
            log::trace!("{command:?}");
            if command.is_solved() {
                println!("Solved!");
            }
        }
    }

    fn show(&self) {
        let session = &self.session;
        print!("{}", session.grid());
        println!("mode: {}", session.mode());
        if let Some(seed) = session.shuffle_seed() {
            println!("shuffle seed: {seed}");
        }
        let stats = session.stats();
        println!(
            "moves: {} (shuffle {}), illegal {}, stale {}, ignored {}, rejected {}",
            stats.player_moves,
            stats.shuffle_moves,
            stats.illegal_moves,
            stats.stale_moves,
            stats.ignored_presses,
            stats.rejected_inputs,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!("shuffle".parse::<Input>(), Ok(Input::Shuffle));
        assert_eq!(" 12 ".parse::<Input>(), Ok(Input::Press(12)));
        assert_eq!("q".parse::<Input>(), Ok(Input::Quit));
        assert_eq!(
            "jump".parse::<Input>().unwrap_err().to_string(),
            "unknown command \"jump\" (type `help` for a list)"
        );
    }

    #[test]
    fn test_zero_tick_length_is_rejected() {
        assert!(Args::try_parse_from(["tileslide", "--tick-ms", "0"]).is_err());
        let args = Args::try_parse_from(["tileslide", "--tick-ms", "1"]).unwrap();
        assert_eq!(args.tick_ms, 1);
        let args = Args::try_parse_from(["tileslide"]).unwrap();
        assert_eq!(args.tick_ms, 16);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), Ok(ShuffleSeed::from(42)));
        let hex = ShuffleSeed::from(7).to_string();
        assert_eq!(parse_seed(&hex), Ok(ShuffleSeed::from(7)));
        assert!(parse_seed("zz").is_err());
    }

    #[test]
    fn test_tile_labels_skip_the_empty_slot() {
        let session = PuzzleSession::new(PuzzleConfig::default().with_grid_size(3)).unwrap();
        let driver = Driver {
            session,
            frame: Duration::from_millis(16),
            realtime: false,
        };
        assert_eq!(driver.tile_for_label(1), Some(TileId::new(0)));
        assert_eq!(driver.tile_for_label(9), Some(TileId::new(8)));
        assert_eq!(driver.tile_for_label(3), None);
        assert_eq!(driver.tile_for_label(0), None);
        assert_eq!(driver.tile_for_label(10), None);
    }

    #[test]
    fn test_run_until_idle_settles_a_shuffle() {
        let config = PuzzleConfig::default()
            .with_grid_size(3)
            .with_shuffle_seed(ShuffleSeed::from(5));
        let session = PuzzleSession::new(config).unwrap();
        let mut driver = Driver {
            session,
            frame: Duration::from_millis(16),
            realtime: false,
        };
        driver.session.handle(Event::StartShuffleRequested);
        driver.run_until_idle();
        assert!(driver.session.mode().is_in_play());
        assert!(driver.session.take_commands().is_empty());
    }
}
