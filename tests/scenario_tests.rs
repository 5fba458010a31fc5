// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chessrules::{
    resolve_promotion, resolve_promotion_char, Board, Color, Coord, GameStatus, Move, Piece,
    PieceKind, Position,
};

fn sq(name: &str) -> Coord {
    name.parse().unwrap()
}

fn mov(text: &str) -> Move {
    text.parse().unwrap()
}

#[test]
fn pawn_double_step_from_start() {
    let pos = Position::from_start_position();
    let e2 = Coord::new(6, 4).unwrap();

    assert!(pos.is_pseudo_legal_move(e2, Coord::new(4, 4).unwrap()));
    assert!(!pos.is_pseudo_legal_move(e2, Coord::new(3, 4).unwrap()));

    let destinations = pos.legal_moves_from(e2).unwrap();
    // Destinations come back in row-major order.
    assert_eq!(&[sq("e4"), sq("e3")][..], &destinations[..]);
}

#[test]
fn fools_mate_sequence() {
    let mut pos = Position::from_start_position();
    for &m in &["f2f3", "e7e5", "g2g4", "d8h4"] {
        pos = pos.apply_move(mov(m)).unwrap();
    }

    assert!(pos.is_in_check(Color::White).unwrap());
    assert!(pos.is_checkmate(Color::White).unwrap());
    assert!(!pos.is_stalemate(Color::White).unwrap());
    assert_eq!(GameStatus::Checkmate, pos.status().unwrap());
}

#[test]
fn single_blocking_move() {
    // The rook on a8 checks the king on a1 and only Rb3-a3 gets in the way.
    let pos = Position::from_fen("r6k/8/8/8/8/1R6/8/K7 w - - 0 1").unwrap();
    assert!(pos.is_in_check(Color::White).unwrap());

    let destinations = pos.legal_moves_from(sq("b3")).unwrap();
    assert_eq!(&[sq("a3")][..], &destinations[..]);

    // b3-b8 is pseudo-legal but leaves the king in check.
    assert!(pos.is_pseudo_legal_move(sq("b3"), sq("b8")));
    assert!(pos.apply_move(Move::new(sq("b3"), sq("b8"))).is_err());
}

#[test]
fn white_pawn_promotes_on_row_zero() {
    let pos = Position::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let e7 = sq("e7");
    let e8 = Coord::new(0, 4).unwrap();
    assert!(pos.is_promotion_move(e7, e8));

    let queen = Piece::new(PieceKind::Queen, Color::White);
    assert_eq!(queen, resolve_promotion(Color::White, Some(PieceKind::Queen)));
    assert_eq!(queen, resolve_promotion_char(Color::White, Some('Q')));

    let after = pos.apply_move(Move::new(e7, e8)).unwrap();
    assert_eq!(Some(queen), after.piece_at(e8));
    assert_eq!(None, after.piece_at(e7));
}

#[test]
fn under_promotion() {
    let pos = Position::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let after = pos.apply_move(mov("e7e8n")).unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Knight, Color::White)),
        after.piece_at(sq("e8"))
    );
}

#[test]
fn rook_blocked_on_file() {
    let a1 = Coord::new(7, 0).unwrap();
    let a8 = Coord::new(0, 0).unwrap();
    let rook = Piece::new(PieceKind::Rook, Color::White);

    let mut board = Board::empty();
    board.set(a1, Some(rook));
    let open = Position::new(board.clone(), Color::White);
    assert!(open.is_pseudo_legal_move(a1, a8));

    for row in 1..7 {
        for &color in &[Color::White, Color::Black] {
            let mut blocked = board.clone();
            blocked.set(
                Coord::new(row, 0).unwrap(),
                Some(Piece::new(PieceKind::Pawn, color)),
            );
            let pos = Position::new(blocked, Color::White);
            assert!(
                !pos.is_pseudo_legal_move(a1, a8),
                "piece on row {} did not block",
                row
            );
        }
    }
}

#[test]
fn stalemate_is_not_checkmate() {
    let pos = Position::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!pos.is_in_check(Color::Black).unwrap());
    assert!(!pos.is_checkmate(Color::Black).unwrap());
    assert!(pos.is_stalemate(Color::Black).unwrap());
    assert_eq!(GameStatus::Stalemate, pos.status().unwrap());
    assert!(pos.legal_moves().unwrap().is_empty());
}
