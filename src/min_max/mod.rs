pub mod stats;
pub mod trial;

use std::fmt::Debug;
use std::ops::Not;

use tracing::trace;

use crate::min_max::stats::Stats;
use crate::min_max::trial::TrialMove;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct ScoredMove<M> {
    pub score: i32,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: i32, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

/// Game rules as seen by the search. The state is mutated in place and every
/// `do_move` is paired with an `undo_move` of the same move.
pub trait Strategy {
    type State;
    type Move: Copy + Debug;
    type Player: Copy + Eq + Debug + Not<Output = Self::Player>;

    fn possible_moves(state: &Self::State) -> Vec<Self::Move>;
    /// Score of a finished game from the maximizer's point of view, `None` while it goes on.
    fn terminal_score(state: &Self::State, maximizer: Self::Player) -> Option<i32>;
    fn do_move(state: &mut Self::State, min_max_move: &Self::Move, player: Self::Player);
    fn undo_move(state: &mut Self::State, min_max_move: &Self::Move);
}

/// Plain minimax over the full tree. `is_maximizing` tells whose turn it is:
/// the maximizer's or the opponent's.
pub fn evaluate<STRATEGY: Strategy, STATS: Stats>(
    stats: &mut STATS,
    state: &mut STRATEGY::State,
    maximizer: STRATEGY::Player,
    is_maximizing: bool,
) -> i32 {
    if let Some(score) = STRATEGY::terminal_score(state, maximizer) {
        stats.record_state_scored();
        return score;
    }
    stats.record_node_expanded();

    let player = if is_maximizing { maximizer } else { !maximizer };
    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };
    for m in STRATEGY::possible_moves(state) {
        let mut trial = TrialMove::<STRATEGY>::play(state, m, player);
        let score = evaluate::<STRATEGY, STATS>(stats, &mut trial, maximizer, !is_maximizing);
        best_score = if is_maximizing {
            best_score.max(score)
        } else {
            best_score.min(score)
        };
    }
    best_score
}

/// Scores every move of `maximizer`, in the order the strategy lists them.
pub fn score_possible_moves<STRATEGY: Strategy, STATS: Stats>(
    stats: &mut STATS,
    state: &mut STRATEGY::State,
    maximizer: STRATEGY::Player,
) -> Vec<ScoredMove<STRATEGY::Move>> {
    let pos_moves = STRATEGY::possible_moves(state);
    pos_moves.into_iter().map(|m| {
        let mut trial = TrialMove::<STRATEGY>::play(state, m, maximizer);
        let score = evaluate::<STRATEGY, STATS>(stats, &mut trial, maximizer, false);
        trace!(candidate = ?m, score, "scored candidate");
        ScoredMove::new(score, m)
    }).collect()
}

/// The first move with the highest score. `fallback` is returned when there is nothing to play.
pub fn best_scored_move<STRATEGY: Strategy, STATS: Stats>(
    stats: &mut STATS,
    state: &mut STRATEGY::State,
    maximizer: STRATEGY::Player,
    fallback: STRATEGY::Move,
) -> ScoredMove<STRATEGY::Move> {
    score_possible_moves::<STRATEGY, STATS>(stats, state, maximizer)
        .into_iter()
        .fold(ScoredMove::new(i32::MIN, fallback), |best, candidate| {
            // strict comparison keeps the earliest of equally good moves
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
}
