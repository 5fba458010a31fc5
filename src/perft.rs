// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::error::RulesError;
use crate::position::Position;

/// Counts the leaf nodes of the legal move tree rooted at `pos`.
pub fn perft(pos: &Position, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = pos.legal_moves()?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    moves
        .par_iter()
        .map(|&mov| perft(&pos.apply_legal_move(mov), depth - 1))
        .sum()
}
