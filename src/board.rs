// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definition of the `Board` type, the 8×8 grid of squares that every rule
//! of the engine is evaluated against.
//!
//! The board is a plain row-major array of 64 squares, each either empty or
//! holding a `Piece`. Row 0 is black's back rank and row 7 is white's. The
//! board knows nothing about whose turn it is or how pieces move; that lives
//! in `Position` and the rules module respectively.
use std::ops::Index;

use crate::types::{self, Color, Coord, Piece, PieceKind};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

impl Board {
    /// Constructs a board with no pieces on it.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// Constructs a board with the standard initial layout.
    pub fn standard() -> Board {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[col] = Some(Piece::new(kind, Color::Black));
            board.squares[8 + col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[48 + col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[56 + col] = Some(Piece::new(kind, Color::White));
        }

        board
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.squares[at.index()]
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        self.squares[at.index()].is_none()
    }

    /// Replaces the contents of a square, returning what was there before.
    pub fn set(&mut self, at: Coord, contents: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[at.index()], contents)
    }

    /// Every occupied square and its piece, in row-major order.
    pub fn pieces<'a>(&'a self) -> impl Iterator<Item = (Coord, Piece)> + 'a {
        types::squares().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of<'a>(&'a self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + 'a {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// The squares holding a king of the given color. A sound position has
    /// exactly one.
    pub fn kings<'a>(&'a self, color: Color) -> impl Iterator<Item = Coord> + 'a {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// The board with every piece's color swapped and the rows flipped, so
    /// that white plays black's game and vice versa.
    pub fn mirrored(&self) -> Board {
        let mut board = Board::empty();
        for (sq, piece) in self.pieces() {
            board.set(
                sq.mirrored(),
                Some(Piece::new(piece.kind, piece.color.toggle())),
            );
        }

        board
    }
}

impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, at: Coord) -> &Option<Piece> {
        &self.squares[at.index()]
    }
}
