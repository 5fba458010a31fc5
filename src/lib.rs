// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
mod bot;
mod clock;
mod error;
mod game;
mod moves;
mod perft;
mod position;
mod rules;
mod snapshot;
mod types;

pub use board::Board;
pub use bot::{MoveSelector, RandomMover};
pub use clock::{format_time, Clock, GameConfig, DEFAULT_SECONDS};
pub use error::RulesError;
pub use game::{Game, GameState, Outcome};
pub use moves::Move;
pub use perft::perft;
pub use position::{FenParseError, MadeMove, Position};
pub use rules::{
    parse_promotion_choice, resolve_promotion, resolve_promotion_char, Destinations, GameStatus,
};
pub use snapshot::GameSnapshot;
pub use types::{
    squares, Color, Coord, Direction, Piece, PieceKind, TableIndex, COLORS, PIECE_KINDS,
    PROMOTION_KINDS,
};
