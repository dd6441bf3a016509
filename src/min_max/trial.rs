use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::min_max::Strategy;

/// A move played on a borrowed state for the lifetime of the guard.
/// Dropping the guard takes the move back, also while unwinding.
pub struct TrialMove<'a, STRATEGY: Strategy> {
    state: &'a mut STRATEGY::State,
    min_max_move: STRATEGY::Move,
    strategy: PhantomData<STRATEGY>,
}

impl<'a, STRATEGY: Strategy> TrialMove<'a, STRATEGY> {
    pub fn play(state: &'a mut STRATEGY::State, min_max_move: STRATEGY::Move, player: STRATEGY::Player) -> Self {
        STRATEGY::do_move(state, &min_max_move, player);
        Self { state, min_max_move, strategy: PhantomData }
    }
}

impl<STRATEGY: Strategy> Deref for TrialMove<'_, STRATEGY> {
    type Target = STRATEGY::State;

    fn deref(&self) -> &Self::Target {
        &*self.state
    }
}

impl<STRATEGY: Strategy> DerefMut for TrialMove<'_, STRATEGY> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.state
    }
}

impl<STRATEGY: Strategy> Drop for TrialMove<'_, STRATEGY> {
    fn drop(&mut self) {
        STRATEGY::undo_move(self.state, &self.min_max_move);
    }
}
