// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The rules of chess over a `Position`: how each piece moves, when a king
//! is in check, and when a side is checkmated or stalemated.
//!
//! Every query here takes the position by shared reference. Queries that
//! need to look at the board after a move make that move on a private copy
//! and unmake it before looking at the next one, so the caller's position is
//! never observed in a half-moved state.
use arrayvec::ArrayVec;

use crate::error::RulesError;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{self, Color, Coord, Direction, Piece, PieceKind, PROMOTION_KINDS};

/// Legal destinations of a single piece. No piece has more than 27.
pub type Destinations = ArrayVec<[Coord; 32]>;

/// Where the side to move stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Whether the game cannot continue from here.
    pub fn is_terminal(self) -> bool {
        match self {
            GameStatus::Checkmate | GameStatus::Stalemate => true,
            _ => false,
        }
    }
}

//
// Piece movement
//

impl Position {
    /// Whether the piece on `from` may move to `to` by its movement and
    /// capture rules, without regard to whether the move leaves its own king
    /// in check.
    pub fn is_pseudo_legal_move(&self, from: Coord, to: Coord) -> bool {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };

        if from == to {
            return false;
        }

        let target = self.piece_at(to);
        if target.map_or(false, |target| target.color == piece.color) {
            return false;
        }

        let (dr, dc) = from.delta(to);
        match piece.kind {
            PieceKind::Pawn => self.is_pseudo_legal_pawn_move(piece.color, from, to, target.is_some()),
            PieceKind::Knight => {
                let shape = (dr.abs(), dc.abs());
                shape == (2, 1) || shape == (1, 2)
            }
            PieceKind::Bishop => dr.abs() == dc.abs() && self.is_path_clear(from, to),
            PieceKind::Rook => (dr == 0 || dc == 0) && self.is_path_clear(from, to),
            PieceKind::Queen => {
                (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && self.is_path_clear(from, to)
            }
            PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        }
    }

    fn is_pseudo_legal_pawn_move(&self, color: Color, from: Coord, to: Coord, capture: bool) -> bool {
        let forward = color.pawn_direction();
        let (dr, dc) = from.delta(to);
        if dc == 0 {
            if capture {
                return false;
            }

            if dr == forward {
                return true;
            }

            // The two-step push needs the square in between to be empty too.
            return dr == 2 * forward
                && from.row() == color.pawn_home_row()
                && from
                    .offset(forward, 0)
                    .map_or(false, |mid| self.board().is_empty(mid));
        }

        capture && dr == forward && dc.abs() == 1
    }

    /// Whether every square strictly between `from` and `to` is empty. `from`
    /// and `to` must lie on a straight or diagonal line; if they do not, there
    /// is no path and this returns false.
    pub fn is_path_clear(&self, from: Coord, to: Coord) -> bool {
        let (dr, dc) = from.delta(to);
        let dir = match Direction::from_delta(dr, dc) {
            Some(dir) => dir,
            None => return false,
        };

        let mut square = from;
        loop {
            square = match square.towards(dir) {
                Some(next) => next,
                None => return false,
            };

            if square == to {
                return true;
            }

            if !self.board().is_empty(square) {
                return false;
            }
        }
    }

    /// Whether the piece on `from` is a pawn about to land on its last rank.
    pub fn is_promotion_move(&self, from: Coord, to: Coord) -> bool {
        match self.piece_at(from) {
            Some(piece) => piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row(),
            None => false,
        }
    }
}

//
// Check detection
//

impl Position {
    /// The square of the one king of the given color.
    pub fn king_square(&self, color: Color) -> Result<Coord, RulesError> {
        let mut kings = self.board().kings(color);
        let king = kings.next().ok_or(RulesError::MissingKing(color))?;
        if kings.next().is_some() {
            return Err(RulesError::DuplicateKing(color));
        }

        Ok(king)
    }

    /// Whether any enemy piece could move onto the king of the given color.
    pub fn is_in_check(&self, color: Color) -> Result<bool, RulesError> {
        let king = self.king_square(color)?;
        let in_check = self
            .board()
            .pieces_of(color.toggle())
            .any(|(square, _)| self.is_pseudo_legal_move(square, king));
        Ok(in_check)
    }

    /// The squares of the enemy pieces attacking the king of the given color.
    pub fn checkers(&self, color: Color) -> Result<Vec<Coord>, RulesError> {
        let king = self.king_square(color)?;
        Ok(self
            .board()
            .pieces_of(color.toggle())
            .map(|(square, _)| square)
            .filter(|&square| self.is_pseudo_legal_move(square, king))
            .collect())
    }
}

//
// Legal move enumeration
//

/// Feeds each legal destination of the piece on `from` to `visit`, in
/// row-major order, until `visit` returns false. Returns whether the walk was
/// cut short. Every candidate is made and unmade on `scratch`, which is left
/// as it was found.
fn walk_legal_destinations<F>(scratch: &mut Position, from: Coord, mut visit: F) -> Result<bool, RulesError>
where
    F: FnMut(Coord) -> bool,
{
    let mover = match scratch.piece_at(from) {
        Some(piece) => piece.color,
        None => return Ok(false),
    };

    for to in types::squares() {
        if !scratch.is_pseudo_legal_move(from, to) {
            continue;
        }

        let made = scratch.make(from, to);
        if !made.is_in_check(mover)? && !visit(to) {
            return Ok(true);
        }
    }

    Ok(false)
}

impl Position {
    /// Every square the piece on `from` may legally move to: the moves its
    /// movement rules allow that do not leave its own king in check. An empty
    /// square has no moves.
    pub fn legal_moves_from(&self, from: Coord) -> Result<Destinations, RulesError> {
        let mut scratch = self.clone();
        let mut destinations = Destinations::new();
        walk_legal_destinations(&mut scratch, from, |to| {
            destinations.push(to);
            true
        })?;
        Ok(destinations)
    }

    /// Whether any piece of the given color has a legal move.
    pub fn has_legal_move(&self, color: Color) -> Result<bool, RulesError> {
        let mut scratch = self.clone();
        for (from, _) in self.board().pieces_of(color) {
            if walk_legal_destinations(&mut scratch, from, |_| false)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Every legal move of the side to move. A pawn move onto the last rank
    /// appears once per promotion choice.
    pub fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        let mut scratch = self.clone();
        let mut moves = Vec::new();
        for (from, piece) in self.board().pieces_of(self.side_to_move()) {
            walk_legal_destinations(&mut scratch, from, |to| {
                if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
                    for &kind in PROMOTION_KINDS.iter() {
                        moves.push(Move::promotion(from, to, kind));
                    }
                } else {
                    moves.push(Move::new(from, to));
                }

                true
            })?;
        }

        Ok(moves)
    }
}

//
// Game end detection
//

impl Position {
    /// Whether the given color is in check with no legal move out of it.
    pub fn is_checkmate(&self, color: Color) -> Result<bool, RulesError> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }

        let mated = !self.has_legal_move(color)?;
        if mated {
            debug!("{} is checkmated", color.name());
        }

        Ok(mated)
    }

    /// Whether the given color has no legal move while not in check.
    pub fn is_stalemate(&self, color: Color) -> Result<bool, RulesError> {
        if self.is_in_check(color)? {
            return Ok(false);
        }

        let stalemated = !self.has_legal_move(color)?;
        if stalemated {
            debug!("{} is stalemated", color.name());
        }

        Ok(stalemated)
    }

    /// The standing of the side to move.
    pub fn status(&self) -> Result<GameStatus, RulesError> {
        let side = self.side_to_move();
        let in_check = self.is_in_check(side)?;
        let can_move = self.has_legal_move(side)?;
        let status = match (in_check, can_move) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        };
        Ok(status)
    }
}

//
// Promotion
//

/// Reads a promotion letter, `q`, `r`, `b` or `n` in either case.
pub fn parse_promotion_choice(choice: char) -> Result<PieceKind, RulesError> {
    match choice.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(RulesError::AmbiguousPromotionChoice(choice)),
    }
}

/// The piece a pawn of the given color becomes. Anything other than a queen,
/// rook, bishop or knight, including no choice at all, makes a queen.
pub fn resolve_promotion(color: Color, choice: Option<PieceKind>) -> Piece {
    let kind = match choice {
        Some(kind) if PROMOTION_KINDS.contains(&kind) => kind,
        Some(kind) => {
            warn!("a pawn cannot promote to {:?}, promoting to a queen", kind);
            PieceKind::Queen
        }
        None => PieceKind::Queen,
    };

    Piece::new(kind, color)
}

/// `resolve_promotion` from a promotion letter as the presentation layer
/// delivers it. Unreadable letters make a queen.
pub fn resolve_promotion_char(color: Color, choice: Option<char>) -> Piece {
    let kind = match choice.map(parse_promotion_choice) {
        Some(Ok(kind)) => Some(kind),
        Some(Err(err)) => {
            warn!("{}, promoting to a queen", err);
            None
        }
        None => None,
    };

    resolve_promotion(color, kind)
}
