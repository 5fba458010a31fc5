// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::RulesError;
use crate::rules::parse_promotion_choice;
use crate::types::{Coord, PieceKind};

/// A move of one piece from one square to another. Moves carry no knowledge
/// of the position they are played in; a pawn move onto its last rank names
/// the piece it promotes to, if the mover picked one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Coord,
    to: Coord,
    promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promotion(from: Coord, to: Coord, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    pub fn source(self) -> Coord {
        self.from
    }

    pub fn destination(self) -> Coord {
        self.to
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }
}

/// Moves are written in coordinate notation, `e2e4`, with a trailing piece
/// letter for promotions, `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

impl FromStr for Move {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Move, RulesError> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(RulesError::InvalidNotation(s.to_owned()));
        }

        let from = s[0..2].parse()?;
        let to = s[2..4].parse()?;
        match s[4..].chars().next() {
            Some(c) => Ok(Move::promotion(from, to, parse_promotion_choice(c)?)),
            None => Ok(Move::new(from, to)),
        }
    }
}
