//! Minimax against a random player, alternating who opens.

use std::fmt;
use std::io;

use ahash::HashMap;
use anyhow::{Context, Result};
use rand::Rng;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::info;

use crate::board::{GameOutcome, Player};
use crate::game::{Game, Seat};
use crate::players::{Computer, RandomMover};

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, EnumIter)]
pub enum Standing {
    ComputerWin,
    RandomWin,
    Draw,
}

impl Standing {
    fn from_outcome(outcome: GameOutcome, computer: Player) -> Option<Standing> {
        match outcome {
            GameOutcome::Won(winner) if winner == computer => Some(Standing::ComputerWin),
            GameOutcome::Won(_) => Some(Standing::RandomWin),
            GameOutcome::Draw => Some(Standing::Draw),
            GameOutcome::InProgress => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Standing::ComputerWin => "Computer wins",
            Standing::RandomWin => "Random wins",
            Standing::Draw => "Draws",
        }
    }
}

/// Results keyed by the side the computer played and how the game ended.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    games: usize,
    tallies: HashMap<(Player, Standing), usize>,
}

impl SimulationReport {
    pub fn record(&mut self, computer: Player, standing: Standing) {
        self.games += 1;
        *self.tallies.entry((computer, standing)).or_default() += 1;
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn count(&self, computer: Player, standing: Standing) -> usize {
        self.tallies.get(&(computer, standing)).copied().unwrap_or_default()
    }

    pub fn total(&self, standing: Standing) -> usize {
        Player::iter().map(|computer| self.count(computer, standing)).sum()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation of {} tic-tac-toe games between a random player and the minimax computer", self.games)?;
        writeln!(f, "{:<15}{:>16}{:>17}{:>8}", "", "Computer first", "Computer second", "Total")?;
        for standing in Standing::iter() {
            writeln!(
                f,
                "{:<15}{:>16}{:>17}{:>8}",
                standing.label(),
                self.count(Player::X, standing),
                self.count(Player::O, standing),
                self.total(standing),
            )?;
        }
        Ok(())
    }
}

/// Plays `games` games; the computer is X in even-numbered games and O otherwise.
pub fn simulate<R: Rng>(games: usize, rng: &mut R) -> Result<SimulationReport> {
    let mut report = SimulationReport::default();
    for game_index in 0..games {
        let computer_side = if game_index % 2 == 0 { Player::X } else { Player::O };
        let computer = Seat::new("Minimax AI", Computer::new());
        let random = Seat::new("Random player", RandomMover::new(&mut *rng));
        let (x, o) = match computer_side {
            Player::X => (computer, random),
            Player::O => (random, computer),
        };

        let outcome = Game::new(x, o, io::sink()).run()?;
        let standing = Standing::from_outcome(outcome, computer_side)
            .with_context(|| format!("game {game_index} stopped while still in progress"))?;
        info!(game = game_index + 1, %computer_side, ?standing, "simulated game");
        report.record(computer_side, standing);
    }
    Ok(report)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::board::Player;
    use crate::simulation::{simulate, SimulationReport, Standing};

    #[test]
    fn computer_never_loses_to_random() {
        let report = simulate(6, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(report.games(), 6);
        assert_eq!(report.total(Standing::RandomWin), 0);
        assert_eq!(report.total(Standing::ComputerWin) + report.total(Standing::Draw), 6);

        let as_x = report.count(Player::X, Standing::ComputerWin) + report.count(Player::X, Standing::Draw);
        assert_eq!(as_x, 3);
    }

    #[test]
    fn same_seed_same_report() {
        let first = simulate(4, &mut StdRng::seed_from_u64(11)).unwrap();
        let second = simulate(4, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn report_table() {
        let mut report = SimulationReport::default();
        report.record(Player::X, Standing::ComputerWin);
        report.record(Player::X, Standing::ComputerWin);
        report.record(Player::O, Standing::Draw);

        let table = report.to_string();
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Simulation of 3 tic-tac-toe games"));
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["Computer", "wins", "2", "0", "2"]);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["Random", "wins", "0", "0", "0"]);
        assert_eq!(lines[4].split_whitespace().collect::<Vec<_>>(), vec!["Draws", "0", "1", "1"]);
    }

    #[test]
    fn empty_simulation() {
        let report = simulate(0, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(report.games(), 0);
        assert_eq!(report.total(Standing::Draw), 0);
    }
}
