//! Exhaustive minimax for tic-tac-toe: +1 forced win, -1 forced loss, 0 draw.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::board::{Board, Cell, GameOutcome, Move, Player};
use crate::min_max::stats::{NullStats, Stats};
use crate::min_max::{self, ScoredMove, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no move to search for, the game is already {0}")]
    InvalidCallContext(GameOutcome),
}

pub struct TicTacToe;

impl Strategy for TicTacToe {
    type State = Board;
    type Move = Move;
    type Player = Player;

    fn possible_moves(state: &Board) -> Vec<Move> {
        state.legal_moves()
    }

    fn terminal_score(state: &Board, maximizer: Player) -> Option<i32> {
        match state.winner() {
            Some(winner) if winner == maximizer => Some(1),
            Some(_) => Some(-1),
            None if state.is_draw() => Some(0),
            None => None,
        }
    }

    fn do_move(state: &mut Board, target: &Move, player: Player) {
        debug_assert_eq!(state.cell(*target), Cell::Empty, "trial move on occupied cell {target}");
        state.set_cell(*target, player.into());
    }

    fn undo_move(state: &mut Board, target: &Move) {
        state.clear_move(*target);
    }
}

/// Minimax value of `board` for `maximizer`; `is_maximizing` says whether
/// `maximizer` is the one to move.
pub fn evaluate(board: &mut Board, maximizer: Player, is_maximizing: bool) -> i32 {
    min_max::evaluate::<TicTacToe, _>(&mut NullStats, board, maximizer, is_maximizing)
}

/// Every legal move of `maximizer` with its score, row-major.
pub fn score_moves(board: &mut Board, maximizer: Player) -> Vec<ScoredMove<Move>> {
    min_max::score_possible_moves::<TicTacToe, _>(&mut NullStats, board, maximizer)
}

pub fn best_move(board: &mut Board, maximizer: Player) -> Result<Move, SearchError> {
    best_move_with_stats(&mut NullStats, board, maximizer)
}

/// Optimal move for `maximizer`, the earliest in row-major order among equals.
#[instrument(level = "debug", skip(stats, board), fields(board = %board.notation()))]
pub fn best_move_with_stats<STATS: Stats>(
    stats: &mut STATS,
    board: &mut Board,
    maximizer: Player,
) -> Result<Move, SearchError> {
    let outcome = board.outcome();
    if outcome.is_terminal() {
        return Err(SearchError::InvalidCallContext(outcome));
    }
    // every opening draws with best play, so the corner is as good as any
    if board.occupied() == 0 {
        debug!("empty board, opening in the corner");
        return Ok(Move::ORIGIN);
    }

    let best = min_max::best_scored_move::<TicTacToe, STATS>(stats, board, maximizer, Move::ORIGIN);
    debug!(best_move = %best.min_max_move, score = best.score, "search finished");
    Ok(best.min_max_move)
}

#[cfg(test)]
mod test {
    use crate::board::{Board, GameOutcome, Move, Player};
    use crate::min_max::stats::SimpleStats;
    use crate::search::{best_move, best_move_with_stats, evaluate, score_moves, SearchError};

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    fn at(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn empty_board_opens_in_corner() {
        let mut stats = SimpleStats::default();
        let mut board = Board::empty();
        assert_eq!(best_move_with_stats(&mut stats, &mut board, Player::X), Ok(Move::ORIGIN));
        assert_eq!(best_move(&mut board, Player::O), Ok(Move::ORIGIN));
        // answered without searching
        assert_eq!(stats, SimpleStats::default());
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn every_opening_draws() {
        let mut board = Board::empty();
        let scored = score_moves(&mut board, Player::X);
        assert_eq!(scored.len(), 9);
        assert!(scored.iter().all(|m| m.score == 0));
        assert_eq!(scored[0].min_max_move, Move::ORIGIN);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn takes_first_winning_move() {
        // X already threatens the diagonal, every further move wins by force
        let mut board = board("XO_/_X_/_O_");
        let scored = score_moves(&mut board, Player::X);
        assert_eq!(scored.len(), 5);
        assert!(scored.iter().all(|m| m.score == 1));

        assert_eq!(best_move(&mut board, Player::X), Ok(at(0, 2)));
        board.place(2, 2, Player::X).unwrap();
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(evaluate(&mut board, Player::X, false), 1);
    }

    #[test]
    fn tie_break_prefers_row_major() {
        // (0,1) and (1,0) both complete a line for X
        let mut board = board("O_O/_XX/OX_");
        let scored = score_moves(&mut board, Player::X);
        let scores = scored.iter().map(|m| (m.min_max_move, m.score)).collect::<Vec<_>>();
        assert_eq!(scores, vec![(at(0, 1), 1), (at(1, 0), 1), (at(2, 2), -1)]);
        assert_eq!(best_move(&mut board, Player::X), Ok(at(0, 1)));
    }

    #[test]
    fn blocks_immediate_threat() {
        // completing the first column beats blocking the middle one
        let mut winning = board("XO_/_O_/X__");
        assert_eq!(best_move(&mut winning, Player::X), Ok(at(1, 0)));

        // anything but the block loses
        let mut defending = board("X__/XO_/___");
        assert_eq!(best_move(&mut defending, Player::O), Ok(at(2, 0)));
    }

    #[test]
    fn board_is_unchanged() {
        for notation in ["X__/___/___", "XO_/_X_/_O_", "X_O/_O_/__X", "XOX/XOO/OX_"] {
            let mut board = board(notation);
            let before = board.clone();
            let player = board.next_player();
            best_move(&mut board, player).unwrap();
            assert_eq!(board, before);
            evaluate(&mut board, player, true);
            evaluate(&mut board, !player, false);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn terminal_boards_are_rejected() {
        let mut won = board("XXX/OO_/___");
        assert_eq!(
            best_move(&mut won, Player::O),
            Err(SearchError::InvalidCallContext(GameOutcome::Won(Player::X)))
        );
        let mut drawn = board("XOX/XOO/OXX");
        assert_eq!(best_move(&mut drawn, Player::X), Err(SearchError::InvalidCallContext(GameOutcome::Draw)));
    }

    #[test]
    fn terminal_scores() {
        assert_eq!(evaluate(&mut board("XXX/OO_/___"), Player::X, false), 1);
        assert_eq!(evaluate(&mut board("XXX/OO_/___"), Player::O, true), -1);
        assert_eq!(evaluate(&mut board("XOX/XOO/OXX"), Player::O, true), 0);
    }

    #[test]
    fn last_move_is_scored_once() {
        let mut stats = SimpleStats::default();
        let mut board = board("XOX/XOO/OX_");
        assert_eq!(best_move_with_stats(&mut stats, &mut board, Player::X), Ok(at(2, 2)));
        assert_eq!(stats.node_expanded_count, 0);
        assert_eq!(stats.state_scored_count, 1);
    }

    #[test]
    fn chosen_move_has_the_best_score() {
        for notation in ["X__/_O_/___", "_X_/___/___", "X__/_O_/__X", "O__/_X_/___"] {
            let mut board = board(notation);
            let player = board.next_player();
            let best_score = score_moves(&mut board, player).iter().map(|m| m.score).max().unwrap();
            let chosen = best_move(&mut board, player).unwrap();
            board.place_move(chosen, player).unwrap();
            assert_eq!(evaluate(&mut board, player, false), best_score, "{notation}");
        }
    }

    /// Plays every possible line of the opponent against the search.
    fn assert_never_loses(board: &mut Board, computer: Player) {
        match board.outcome() {
            GameOutcome::Won(winner) => {
                assert_eq!(winner, computer, "lost on {}", board.notation());
                return;
            }
            GameOutcome::Draw => return,
            GameOutcome::InProgress => {}
        }
        let player = board.next_player();
        if player == computer {
            let chosen = best_move(board, computer).unwrap();
            board.place_move(chosen, computer).unwrap();
            assert_never_loses(board, computer);
            board.clear_move(chosen);
        } else {
            for m in board.legal_moves() {
                board.place_move(m, player).unwrap();
                assert_never_loses(board, computer);
                board.clear_move(m);
            }
        }
    }

    #[test]
    fn never_loses_as_x() {
        assert_never_loses(&mut Board::empty(), Player::X);
    }

    #[test]
    fn never_loses_as_o() {
        assert_never_loses(&mut Board::empty(), Player::O);
    }
}
