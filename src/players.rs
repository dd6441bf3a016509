use std::io::{self, Write};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::board::{Board, Move, Player};
use crate::min_max::stats::SimpleStats;
use crate::search;

pub trait MoveSource {
    /// A legal move for `player` on `board`, which is never finished.
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move>;

    fn turn_message(&self, name: &str) -> String {
        format!("It is {name}'s turn.")
    }
}

/// Lines read from stdin one at a time, without holding the lock in between,
/// so two humans can share the terminal.
#[derive(Debug, Default)]
pub struct StdinLines;

impl Iterator for StdinLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    }
}

/// Asks for 1-based coordinates until they name an empty cell.
pub struct Human<I, W> {
    lines: I,
    output: W,
}

impl<I, W> Human<I, W>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    pub fn new(lines: I, output: W) -> Self {
        Self { lines, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let line = self.lines.next().context("input closed while waiting for a move")??;
        Ok(line.trim().to_string())
    }
}

impl<I, W> MoveSource for Human<I, W>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move> {
        loop {
            let row = self.ask("Choose row: ")?;
            let col = self.ask("Choose column: ")?;
            let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
                warn!(%row, %col, "rejected non-numeric coordinates");
                writeln!(self.output, "Invalid input. Only input integers between 1 and 3.")?;
                continue;
            };
            let target = row.checked_sub(1)
                .zip(col.checked_sub(1))
                .and_then(|(row, col)| Move::new(row, col).ok());
            let Some(target) = target else {
                warn!(row, col, "rejected coordinates outside the board");
                writeln!(self.output, "Invalid input. The row and column must be between 1 and 3.")?;
                continue;
            };
            if !board.is_empty(target.row(), target.col())? {
                warn!(%target, "rejected occupied cell");
                writeln!(self.output, "Illegal move. Make sure the input square is empty.")?;
                continue;
            }
            debug!(%player, %target, "human move");
            return Ok(target);
        }
    }
}

/// Plays the minimax move on a working copy of the board.
#[derive(Debug, Default)]
pub struct Computer {
    stats: SimpleStats,
}

impl Computer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &SimpleStats {
        &self.stats
    }
}

impl MoveSource for Computer {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move> {
        let mut working = board.clone();
        let target = search::best_move_with_stats(&mut self.stats, &mut working, player)?;
        debug_assert_eq!(&working, board);
        debug!(%player, %target, nodes = self.stats.nodes_visited(), "computer move");
        Ok(target)
    }

    fn turn_message(&self, _name: &str) -> String {
        "The AI is making its move...".to_string()
    }
}

pub struct RandomMover<R> {
    rng: R,
}

impl<R: Rng> RandomMover<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSource for RandomMover<R> {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move> {
        let target = board.legal_moves()
            .choose(&mut self.rng)
            .copied()
            .context("no legal move left for the random player")?;
        debug!(%player, %target, "random move");
        Ok(target)
    }
}
