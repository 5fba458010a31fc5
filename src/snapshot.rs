// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The whole-state document a game is stored and broadcast as.
//!
//! Each participant receives the complete document on every change:
//!
//! ```json
//! { "board": [["r", "n", ...], ...], "turn": "white",
//!   "whiteTime": 600, "blackTime": 600 }
//! ```
//!
//! Squares hold a piece letter (uppercase white, lowercase black) or the
//! empty string. Rows are listed from black's back rank down.
use std::convert::TryFrom;

use crate::board::Board;
use crate::clock::Clock;
use crate::error::RulesError;
use crate::position::Position;
use crate::types::{self, Color, Piece};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[String; 8]; 8],
    pub turn: Color,
    pub white_time: u32,
    pub black_time: u32,
}

impl GameSnapshot {
    pub fn new(pos: &Position, clock: &Clock) -> GameSnapshot {
        let mut board: [[String; 8]; 8] = Default::default();
        for (square, piece) in pos.board().pieces() {
            board[square.row()][square.col()] = piece.to_string();
        }

        GameSnapshot {
            board,
            turn: pos.side_to_move(),
            white_time: clock.remaining(Color::White),
            black_time: clock.remaining(Color::Black),
        }
    }

    /// Reads the board and turn out of the document.
    pub fn position(&self) -> Result<Position, RulesError> {
        let mut board = Board::empty();
        for square in types::squares() {
            let letter = &self.board[square.row()][square.col()];
            board.set(square, parse_letter(letter)?);
        }

        Ok(Position::new(board, self.turn))
    }

    pub fn clock(&self) -> Clock {
        Clock::with_remaining(self.white_time, self.black_time)
    }

    pub fn from_json(json: &str) -> serde_json::Result<GameSnapshot> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn parse_letter(letter: &str) -> Result<Option<Piece>, RulesError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Piece::try_from(c)
            .map(Some)
            .map_err(|_| RulesError::InvalidPieceLetter(letter.to_owned())),
        _ => Err(RulesError::InvalidPieceLetter(letter.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::GameSnapshot;
    use crate::clock::Clock;
    use crate::error::RulesError;
    use crate::position::Position;
    use crate::types::Color;

    const START_DOCUMENT: &str = r#"{
        "board": [
            ["r","n","b","q","k","b","n","r"],
            ["p","p","p","p","p","p","p","p"],
            ["","","","","","","",""],
            ["","","","","","","",""],
            ["","","","","","","",""],
            ["","","","","","","",""],
            ["P","P","P","P","P","P","P","P"],
            ["R","N","B","Q","K","B","N","R"]
        ],
        "turn": "white",
        "whiteTime": 600,
        "blackTime": 598
    }"#;

    #[test]
    fn reads_start_document() {
        let snapshot = GameSnapshot::from_json(START_DOCUMENT).unwrap();
        assert_eq!(Position::from_start_position(), snapshot.position().unwrap());
        let clock = snapshot.clock();
        assert_eq!(600, clock.remaining(Color::White));
        assert_eq!(598, clock.remaining(Color::Black));
    }

    #[test]
    fn writes_what_it_reads() {
        let pos = Position::from_start_position();
        let snapshot = GameSnapshot::new(&pos, &Clock::with_remaining(600, 598));
        assert_eq!(GameSnapshot::from_json(START_DOCUMENT).unwrap(), snapshot);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains(r#""turn":"white""#));
        assert!(json.contains(r#""whiteTime":600"#));
    }

    #[test]
    fn rejects_unknown_letters() {
        let mut snapshot = GameSnapshot::from_json(START_DOCUMENT).unwrap();
        snapshot.board[3][3] = "x".to_owned();
        assert_eq!(
            Err(RulesError::InvalidPieceLetter("x".to_owned())),
            snapshot.position()
        );

        snapshot.board[3][3] = "QQ".to_owned();
        assert_eq!(
            Err(RulesError::InvalidPieceLetter("QQ".to_owned())),
            snapshot.position()
        );
    }

    #[test]
    fn rejects_short_rows() {
        let json = START_DOCUMENT.replace(r#"["","","","","","","",""],"#, r#"["",""],"#);
        assert!(GameSnapshot::from_json(&json).is_err());
    }
}
