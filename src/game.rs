use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::board::{Board, GameOutcome, Player};
use crate::players::MoveSource;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub struct Seat<'a> {
    name: String,
    source: Box<dyn MoveSource + 'a>,
}

impl<'a> Seat<'a> {
    pub fn new(name: impl Into<String>, source: impl MoveSource + 'a) -> Self {
        Self { name: name.into(), source: Box::new(source) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One game from the empty board to a win or a draw. The game owns the board
/// and lends it to the seat whose turn it is.
pub struct Game<'a, W> {
    board: Board,
    x: Seat<'a>,
    o: Seat<'a>,
    screen: W,
    clear_screen: bool,
}

impl<'a, W: Write> Game<'a, W> {
    pub fn new(x: Seat<'a>, o: Seat<'a>, screen: W) -> Self {
        Self { board: Board::empty(), x, o, screen, clear_screen: false }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seat(&self, player: Player) -> &Seat<'a> {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    fn render(&mut self, message: &str) -> Result<()> {
        if self.clear_screen {
            write!(self.screen, "{CLEAR_SCREEN}")?;
        }
        write!(self.screen, "{}", self.board)?;
        writeln!(self.screen, "{message}")?;
        self.screen.flush()?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<GameOutcome> {
        loop {
            let player = self.board.next_player();
            let seat = self.seat(player);
            let turn = seat.source.turn_message(&seat.name);
            self.render(&turn)?;

            let seat = match player {
                Player::X => &mut self.x,
                Player::O => &mut self.o,
            };
            let chosen = seat.source.choose_move(&self.board, player)?;
            self.board.place(chosen.row(), chosen.col(), player)?;
            debug!(%player, %chosen, board = %self.board.notation(), "move applied");

            let outcome = self.board.outcome();
            let announcement = match outcome {
                GameOutcome::InProgress => continue,
                GameOutcome::Won(winner) => format!("3 in a row! {} won!", self.seat(winner).name),
                GameOutcome::Draw => "Draw.".to_string(),
            };
            self.render(&announcement)?;
            info!(%outcome, x = %self.x.name, o = %self.o.name, "game over");
            return Ok(outcome);
        }
    }
}
