// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RulesError;
use crate::moves::Move;
use crate::position::Position;

/// Anything that can pick a move for the side to move.
pub trait MoveSelector {
    /// Returns a legal move, or `None` if the side to move has none.
    fn select(&mut self, pos: &Position) -> Result<Option<Move>, RulesError>;
}

/// An opponent that plays a uniformly random legal move.
pub struct RandomMover<R> {
    rng: R,
}

impl RandomMover<ThreadRng> {
    pub fn new() -> RandomMover<ThreadRng> {
        RandomMover::with_rng(rand::thread_rng())
    }
}

impl<R: Rng> RandomMover<R> {
    pub fn with_rng(rng: R) -> RandomMover<R> {
        RandomMover { rng }
    }
}

impl<R: Rng> MoveSelector for RandomMover<R> {
    fn select(&mut self, pos: &Position) -> Result<Option<Move>, RulesError> {
        let moves = pos.legal_moves()?;
        let choice = moves.choose(&mut self.rng).cloned();
        if let Some(mov) = choice {
            trace!("picked {} out of {} moves", mov, moves.len());
        }

        Ok(choice)
    }
}
