// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};
use std::ops::Deref;

use crate::board::Board;
use crate::error::RulesError;
use crate::moves::Move;
use crate::rules;
use crate::types::{Color, Coord, Piece};

lazy_static! {
    static ref START_POSITION: Position = Position::new(Board::standard(), Color::White);
}

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedEnd,
    InvalidDigit,
    WrongNumberOfRanks,
    FileDoesNotSumToEight,
    UnknownPiece(char),
    InvalidSideToMove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of FEN"),
            FenParseError::InvalidDigit => write!(f, "empty-square digits must be 1 through 8"),
            FenParseError::WrongNumberOfRanks => write!(f, "FEN placement must have 8 ranks"),
            FenParseError::FileDoesNotSumToEight => write!(f, "a rank does not have 8 squares"),
            FenParseError::UnknownPiece(c) => write!(f, "'{}' is not a piece", c),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
        }
    }
}

impl Error for FenParseError {}

/// The board together with the color whose turn it is. This is the whole of
/// the state the rules engine reads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
}

//
// Board state getters
//

impl Position {
    pub fn new(board: Board, turn: Color) -> Position {
        Position { board, turn }
    }

    pub fn from_start_position() -> Position {
        START_POSITION.clone()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn piece_at(&self, square: Coord) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// The position with colors swapped and rows flipped. Every rule gives
    /// the mirrored answer on the mirrored position.
    pub fn mirrored(&self) -> Position {
        Position::new(self.board.mirrored(), self.turn.toggle())
    }
}

//
// Move application and board manipulation
//

/// A move made on a position for the purposes of looking at the result.
///
/// Dereferences to the position after the move. Dropping it puts the pieces
/// and the turn back exactly as they were, so the position is restored on
/// every way out of the scope that made the move.
pub struct MadeMove<'a> {
    pos: &'a mut Position,
    from: Coord,
    to: Coord,
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl<'a> MadeMove<'a> {
    /// The piece that was standing on the destination square, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl<'a> Deref for MadeMove<'a> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.pos
    }
}

impl<'a> Drop for MadeMove<'a> {
    fn drop(&mut self) {
        self.pos.board.set(self.to, self.captured);
        self.pos.board.set(self.from, self.moved);
        self.pos.turn = self.pos.turn.toggle();
    }
}

impl Position {
    /// Replaces the contents of a square, returning what was there. Intended
    /// for setting up positions; it checks nothing.
    pub fn set_piece(&mut self, square: Coord, contents: Option<Piece>) -> Option<Piece> {
        self.board.set(square, contents)
    }

    /// Moves whatever stands on `from` to `to` and passes the turn, without
    /// any legality test, until the returned guard is dropped.
    pub fn make(&mut self, from: Coord, to: Coord) -> MadeMove<'_> {
        let moved = self.board.set(from, None);
        let captured = self.board.set(to, moved);
        self.turn = self.turn.toggle();
        MadeMove {
            pos: self,
            from,
            to,
            moved,
            captured,
        }
    }

    /// Plays a move, returning the resulting position. The move must be legal
    /// for the side to move. A pawn reaching its last rank is promoted to the
    /// move's promotion piece, or to a queen if it names none.
    pub fn apply_move(&self, mov: Move) -> Result<Position, RulesError> {
        let from = mov.source();
        let piece = self
            .piece_at(from)
            .ok_or_else(|| RulesError::EmptySource(from))?;
        if piece.color != self.turn {
            return Err(RulesError::WrongTurn(from));
        }

        if !self.legal_moves_from(from)?.contains(&mov.destination()) {
            return Err(RulesError::IllegalMove(mov));
        }

        Ok(self.apply_legal_move(mov))
    }

    /// `apply_move` for moves already known to be legal.
    pub(crate) fn apply_legal_move(&self, mov: Move) -> Position {
        let mut next = self.clone();
        let from = mov.source();
        let to = mov.destination();
        let placed = match self.piece_at(from) {
            Some(piece) if self.is_promotion_move(from, to) => {
                Some(rules::resolve_promotion(piece.color, mov.promotion_piece()))
            }
            other => other,
        };

        next.board.set(from, None);
        if let Some(captured) = next.board.set(to, placed) {
            trace!("{} captures {} on {}", mov, captured, to);
        }

        next.turn = self.turn.toggle();
        next
    }
}

//
// FEN parsing and generation.
//
// Only the piece placement and side to move fields carry meaning here. The
// castling, en-passant and clock fields are accepted and ignored, since the
// rules they describe are not modeled.
//

impl Position {
    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let placement = fields.next().ok_or(FenParseError::UnexpectedEnd)?;
        let side = fields.next().ok_or(FenParseError::UnexpectedEnd)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenParseError::WrongNumberOfRanks);
        }

        // FEN lists rank 8 first, which is row 0.
        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if digit == 0 || digit > 8 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    col += digit as usize;
                } else {
                    let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                    let square = Coord::from_index(row * 8 + col)
                        .filter(|_| col < 8)
                        .ok_or(FenParseError::FileDoesNotSumToEight)?;
                    board.set(square, Some(piece));
                    col += 1;
                }

                if col > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }
            }

            if col != 8 {
                return Err(FenParseError::FileDoesNotSumToEight);
            }
        }

        let turn = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenParseError::InvalidSideToMove),
        };

        Ok(Position::new(board, turn))
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        let mut empty_squares = 0;
        for square in crate::types::squares() {
            if let Some(piece) = self.piece_at(square) {
                if empty_squares != 0 {
                    write!(&mut buf, "{}", empty_squares).unwrap();
                }
                write!(&mut buf, "{}", piece).unwrap();
                empty_squares = 0;
            } else {
                empty_squares += 1;
            }

            if square.col() == 7 {
                if empty_squares != 0 {
                    write!(&mut buf, "{}", empty_squares).unwrap();
                }
                empty_squares = 0;

                if square.row() != 7 {
                    buf.push('/');
                }
            }
        }

        write!(&mut buf, " {} - - 0 1", self.turn).unwrap();
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, square) in crate::types::squares().enumerate() {
            if let Some(piece) = self.piece_at(square) {
                write!(f, " {} ", piece)?;
            } else {
                write!(f, " . ")?;
            }

            if idx % 8 == 7 {
                writeln!(f, "| {}", 8 - square.row())?;
            }
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RulesError;
    use crate::moves::Move;
    use crate::position::{FenParseError, Position};
    use crate::types::{Color, Coord, Piece, PieceKind};

    fn sq(name: &str) -> Coord {
        name.parse().unwrap()
    }

    #[test]
    fn start_position_fen() {
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert_eq!(Position::from_start_position(), pos);
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            pos.as_fen()
        );
    }

    #[test]
    fn fen_without_clocks() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/4K2k b").unwrap();
        assert_eq!(Color::Black, pos.side_to_move());
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::White)),
            pos.piece_at(sq("e1"))
        );
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::Black)),
            pos.piece_at(sq("h1"))
        );
    }

    #[test]
    fn fen_errors() {
        assert_eq!(
            Err(FenParseError::UnexpectedEnd),
            Position::from_fen("8/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::WrongNumberOfRanks),
            Position::from_fen("8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::InvalidDigit),
            Position::from_fen("9/8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            Position::from_fen("7/8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            Position::from_fen("ppppppppp/8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::UnknownPiece('x')),
            Position::from_fen("x7/8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::InvalidSideToMove),
            Position::from_fen("8/8/8/8/8/8/8/8 white")
        );
    }

    #[test]
    fn make_restores_on_drop() {
        let mut pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let before = pos.clone();
        {
            let made = pos.make(sq("e4"), sq("d5"));
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
                made.captured()
            );
            assert_eq!(Color::Black, made.side_to_move());
            assert!(made.piece_at(sq("e4")).is_none());
        }

        assert_eq!(before, pos);
    }

    #[test]
    fn make_restores_on_early_return() {
        fn probe(pos: &mut Position) -> Result<(), RulesError> {
            let made = pos.make(sq("e1"), sq("e2"));
            made.is_in_check(Color::Black)?;
            Ok(())
        }

        // No black king, so the check query fails while the move is made.
        let mut pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = pos.clone();
        assert_eq!(Err(RulesError::MissingKing(Color::Black)), probe(&mut pos));
        assert_eq!(before, pos);
    }

    #[test]
    fn apply_move_toggles_turn() {
        let pos = Position::from_start_position();
        let next = pos.apply_move(Move::new(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(Color::Black, next.side_to_move());
        assert!(next.piece_at(sq("e2")).is_none());
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::White)),
            next.piece_at(sq("e4"))
        );

        // The input is untouched.
        assert_eq!(Position::from_start_position(), pos);
    }

    #[test]
    fn apply_move_rejections() {
        let pos = Position::from_start_position();
        assert_eq!(
            Err(RulesError::EmptySource(sq("e4"))),
            pos.apply_move(Move::new(sq("e4"), sq("e5")))
        );
        assert_eq!(
            Err(RulesError::WrongTurn(sq("e7"))),
            pos.apply_move(Move::new(sq("e7"), sq("e5")))
        );
        let three_squares = Move::new(sq("e2"), sq("e5"));
        assert_eq!(
            Err(RulesError::IllegalMove(three_squares)),
            pos.apply_move(three_squares)
        );
    }

    #[test]
    fn apply_move_promotes() {
        let pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let rook = pos
            .apply_move(Move::promotion(sq("a7"), sq("a8"), PieceKind::Rook))
            .unwrap();
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::White)),
            rook.piece_at(sq("a8"))
        );

        let queen = pos.apply_move(Move::new(sq("a7"), sq("a8"))).unwrap();
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            queen.piece_at(sq("a8"))
        );
    }

    #[test]
    fn display_smoke() {
        let text = Position::from_start_position().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(" r  n  b  q  k  b  n  r | 8", first);
    }
}
