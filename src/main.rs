use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rusty_tictactoe::game::{Game, Seat};
use rusty_tictactoe::players::{Computer, Human, StdinLines};
use rusty_tictactoe::simulation::simulate;

/// Tic-tac-toe in the terminal against a friend or a minimax computer
#[derive(Parser)]
#[command(name = "rusty-tictactoe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Keep the previous turns on screen instead of clearing it
    #[arg(long, global = true)]
    no_clear: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        #[command(subcommand)]
        mode: Mode,
    },
    /// Pit the computer against a random player and tally the results
    Simulate {
        #[arg(long, default_value_t = 50)]
        games: usize,
        /// Seed for the random player, fresh entropy if absent
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum Mode {
    /// One player against the computer
    Single {
        #[arg(long, default_value = "Player")]
        name: String,
        /// Let the computer play X and open the game
        #[arg(long)]
        computer_first: bool,
    },
    /// Two players sharing the terminal
    Two {
        #[arg(long, default_value = "Player 1")]
        x_name: String,
        #[arg(long, default_value = "Player 2")]
        o_name: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let clear_screen = !cli.no_clear;

    match cli.command {
        Some(Commands::Play { mode }) => play(mode, clear_screen),
        Some(Commands::Simulate { games, seed }) => run_simulation(games, seed),
        None => play(Mode::Single { name: "Player".to_string(), computer_first: false }, clear_screen),
    }
}

fn human() -> Human<StdinLines, io::Stdout> {
    Human::new(StdinLines, io::stdout())
}

fn play(mode: Mode, clear_screen: bool) -> Result<()> {
    let (x, o) = match mode {
        Mode::Single { name, computer_first } => {
            info!(%name, computer_first, "single player game");
            let human = Seat::new(name, human());
            let computer = Seat::new("AI", Computer::new());
            if computer_first {
                (computer, human)
            } else {
                (human, computer)
            }
        }
        Mode::Two { x_name, o_name } => {
            info!(%x_name, %o_name, "two player game");
            (Seat::new(x_name, human()), Seat::new(o_name, human()))
        }
    };

    Game::new(x, o, io::stdout())
        .with_clear_screen(clear_screen)
        .run()?;
    println!("Thanks for playing!");
    Ok(())
}

fn run_simulation(games: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(games, ?seed, "starting simulation");
    let report = simulate(games, &mut rng)?;
    println!("{report}");
    Ok(())
}
