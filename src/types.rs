// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use crate::error::RulesError;

// TableIndex is a trait for all types that can serve as an index into a table.
// The clock keeps one entry per color, so colors are the main user of this.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_usize().unwrap_or(0)
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_usize(idx).expect("table index out of range")
    }
}

/// A square of the board, addressed by row and column.
///
/// Row 0 is black's back rank and row 7 is white's, so white pawns advance
/// toward decreasing rows. In algebraic notation the column is the file
/// (`a` through `h`) and the row `r` is rank `8 - r`; `(6, 4)` is `e2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Constructs a coordinate, failing if either axis lies outside `0..8`.
    pub fn new(row: i32, col: i32) -> Result<Coord, RulesError> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return Err(RulesError::InvalidCoordinate { row, col });
        }

        Ok(Coord {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// The row-major index of this square, `row * 8 + col`.
    pub fn index(self) -> usize {
        self.row() * 8 + self.col()
    }

    pub fn from_index(idx: usize) -> Option<Coord> {
        if idx >= 64 {
            return None;
        }

        Some(Coord {
            row: (idx / 8) as u8,
            col: (idx % 8) as u8,
        })
    }

    /// The square `(row + dr, col + dc)`, if it is still on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Coord> {
        Coord::new(self.row as i32 + dr, self.col as i32 + dc).ok()
    }

    pub fn towards(self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.as_vector();
        self.offset(dr, dc)
    }

    /// Row and column deltas from this square to `to`.
    pub fn delta(self, to: Coord) -> (i32, i32) {
        (
            to.row as i32 - self.row as i32,
            to.col as i32 - self.col as i32,
        )
    }

    /// The same square seen from the other side of the board.
    pub fn mirrored(self) -> Coord {
        Coord {
            row: 7 - self.row,
            col: self.col,
        }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'8' - self.row) as char)
    }
}

impl FromStr for Coord {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Coord, RulesError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidNotation(s.to_owned()));
        }

        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(RulesError::InvalidNotation(s.to_owned()));
        }

        Coord::new(i32::from(b'8' - rank), i32::from(file - b'a'))
    }
}

/// Every square of the board in row-major order.
pub fn squares() -> impl Iterator<Item = Coord> {
    (0..64).filter_map(Coord::from_index)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn push.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row from which this color's pawns may push two squares.
    pub fn pawn_home_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row on which this color's pawns promote.
    pub fn promotion_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The pieces a pawn may become on its last rank.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// The eight compass directions. North points at row 0, black's back rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// The `(row, col)` unit step of this direction.
    pub fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction of a straight or diagonal line with the given deltas, or
    /// `None` if the deltas are zero or do not describe such a line.
    pub fn from_delta(dr: i32, dc: i32) -> Option<Direction> {
        if (dr == 0 && dc == 0) || (dr != 0 && dc != 0 && dr.abs() != dc.abs()) {
            return None;
        }

        let dir = match (dr.signum(), dc.signum()) {
            (-1, 0) => Direction::North,
            (-1, 1) => Direction::NorthEast,
            (0, 1) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (1, 0) => Direction::South,
            (1, -1) => Direction::SouthWest,
            (0, -1) => Direction::West,
            _ => Direction::NorthWest,
        };
        Some(dir)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    pub fn is_sliding(&self) -> bool {
        match self.kind {
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => false,
            _ => true,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };

        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}
