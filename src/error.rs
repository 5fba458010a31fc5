// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::moves::Move;
use crate::types::{Color, Coord};

/// Errors produced by the rules engine and the game built on top of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// A row or column outside of `0..8`.
    InvalidCoordinate { row: i32, col: i32 },

    /// A check query on a position without a king of the given color.
    MissingKing(Color),

    /// A check query on a position with more than one king of the given color.
    DuplicateKing(Color),

    /// A promotion letter other than `q`, `r`, `b` or `n`.
    AmbiguousPromotionChoice(char),

    /// A move from a square with nothing on it.
    EmptySource(Coord),

    /// A move of a piece that does not belong to the side to move.
    WrongTurn(Coord),

    /// A move that is not among the legal moves of its piece.
    IllegalMove(Move),

    /// A square in a snapshot document that is neither empty nor a piece letter.
    InvalidPieceLetter(String),

    /// A square or move name that could not be parsed.
    InvalidNotation(String),

    /// Input delivered to a game that has already ended.
    GameOver,
}

impl RulesError {
    /// Whether this error means the position itself is corrupt, as opposed to
    /// bad input about an otherwise sound position.
    pub fn is_corrupt_position(&self) -> bool {
        match self {
            RulesError::MissingKing(_) | RulesError::DuplicateKing(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RulesError::InvalidCoordinate { row, col } => {
                write!(f, "coordinate ({}, {}) is off the board", row, col)
            }
            RulesError::MissingKing(color) => write!(f, "no {} king on the board", color.name()),
            RulesError::DuplicateKing(color) => {
                write!(f, "more than one {} king on the board", color.name())
            }
            RulesError::AmbiguousPromotionChoice(c) => {
                write!(f, "'{}' is not a promotion choice", c)
            }
            RulesError::EmptySource(at) => write!(f, "no piece on {}", at),
            RulesError::WrongTurn(at) => write!(f, "the piece on {} cannot move this turn", at),
            RulesError::IllegalMove(mov) => write!(f, "illegal move {}", mov),
            RulesError::InvalidPieceLetter(letter) => {
                write!(f, "'{}' is not a piece letter", letter)
            }
            RulesError::InvalidNotation(s) => write!(f, "could not parse '{}'", s),
            RulesError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl Error for RulesError {}
