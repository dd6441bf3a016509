//! Terminal tic-tac-toe with an exhaustive minimax opponent.

pub mod board;
pub mod game;
pub mod min_max;
pub mod players;
pub mod search;
pub mod simulation;
