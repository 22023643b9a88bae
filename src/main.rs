//! Draughts-Rust: a checkers-family rules engine.
//!
//! ## Usage
//!
//! - `draughts-rust` - Show a demo of the rules engine
//! - `draughts-rust demo` - Same as above
//! - `draughts-rust selfplay` - Run a full computer-vs-computer game

use anyhow::Result;
use clap::{Parser, Subcommand};

use draughts_rust::board::{Cells, Side};
use draughts_rust::engine::{Engine, GameType, LogLevel, Logger, Observer, Options};

/// Draughts-Rust: a checkers-family rules engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print engine log messages to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a short demo of forced captures, chaining, and undo
    Demo,
    /// Play a full computer-vs-computer game to completion
    Selfplay {
        /// Seed for the random agents (omit for a different game each run)
        #[arg(long)]
        seed: Option<u64>,
    },
}

struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn on_game_started(&mut self, board_size: i8) {
        println!("Game started ({board_size}x{board_size})");
    }

    fn on_game_updated(&mut self, _side_to_move: Side, _board: &Cells) {}

    fn on_game_ended(&mut self, winner: Side) {
        match winner {
            Side::Neutral => println!("Game over: draw"),
            side => println!("Game over: {side} wins"),
        }
    }
}

struct StderrLogger {
    enabled: bool,
}

impl Logger for StderrLogger {
    fn log(&mut self, level: LogLevel, message: &str) {
        if self.enabled {
            eprintln!("[{level:?}] {message}");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logger = StderrLogger {
        enabled: cli.verbose,
    };

    match cli.command {
        Some(Commands::Selfplay { seed }) => run_selfplay(seed, logger),
        Some(Commands::Demo) | None => run_demo(logger),
    }
}

fn run_demo(logger: StderrLogger) -> Result<()> {
    println!("Draughts-Rust: rules engine demo\n");

    let mut engine = Engine::new(Box::new(ConsoleObserver), Box::new(logger));
    engine.start_game(None)?;
    println!("{}", engine.board());

    // Open with the leftmost front-row man; point at the square and let the
    // engine choose the unique action from it, if any.
    let size = draughts_rust::config::BOARD_SIZE;
    let men_rows = draughts_rust::config::MEN_ROWS;
    let front = size - men_rows + 1;
    for y in 1..=size {
        if engine.try_at(front, y) {
            println!("Played from (x={front},y={y}):");
            break;
        }
    }
    println!("{}", engine.board());

    println!("Undoing it:");
    engine.revert();
    println!("{}", engine.board());

    let rows = engine.get_history(0);
    println!("History rows (incl. summary): {}", rows.len());
    Ok(())
}

fn run_selfplay(seed: Option<u64>, logger: StderrLogger) -> Result<()> {
    if let Some(seed) = seed {
        fastrand::seed(seed);
    }

    let mut engine = Engine::new(Box::new(ConsoleObserver), Box::new(logger));
    let options = Options {
        game_type: GameType::ComputerComputer,
        ..Options::default()
    };
    // The whole game runs inside start_game; both sides are agents.
    engine.start_game(Some(options))?;

    println!("{}", engine.board());
    let rows = engine.get_history(0);
    println!("Actions played: {}", rows.len().saturating_sub(1));
    Ok(())
}
