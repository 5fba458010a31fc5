// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single game driven by click intents.
//!
//! The presentation layer reports which square was clicked; the game turns
//! pairs of clicks into moves. A first click on one of the mover's pieces
//! that has somewhere to go selects it, and a second click on one of its
//! legal destinations plays the move. Any other click clears the selection
//! without touching the position. A pawn reaching its last rank waits for
//! the promotion choice before the move is played.
use std::mem;

use crate::clock::{Clock, GameConfig};
use crate::error::RulesError;
use crate::moves::Move;
use crate::position::Position;
use crate::rules::{resolve_promotion_char, Destinations, GameStatus};
use crate::snapshot::GameSnapshot;
use crate::types::{Color, Coord};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Timeout { winner: Color },
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::Timeout { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingSelection,
    AwaitingDestination {
        from: Coord,
        destinations: Destinations,
    },
    AwaitingPromotionChoice {
        from: Coord,
        to: Coord,
    },
    GameOver(Outcome),
}

pub struct Game {
    position: Position,
    clock: Clock,
    state: GameState,
    history: Vec<Move>,
}

impl Game {
    /// A game from the standard starting position.
    pub fn new(config: &GameConfig) -> Game {
        Game {
            position: Position::from_start_position(),
            clock: Clock::new(config.initial_seconds),
            state: GameState::AwaitingSelection,
            history: Vec::new(),
        }
    }

    /// Resumes a game from an arbitrary position, which may already be over.
    pub fn from_position(position: Position, clock: Clock) -> Result<Game, RulesError> {
        let mut game = Game {
            position,
            clock,
            state: GameState::AwaitingSelection,
            history: Vec::new(),
        };

        let side = game.position.side_to_move();
        if game.clock.is_flagged(side) {
            game.state = GameState::GameOver(Outcome::Timeout {
                winner: side.toggle(),
            });
        } else {
            game.state = game.state_after_move()?;
        }

        Ok(game)
    }

    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Game, RulesError> {
        Game::from_position(snapshot.position()?, snapshot.clock())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(&self.position, &self.clock)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The moves played since this game was constructed.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Handles a click on the given square.
    pub fn select(&mut self, at: Coord) -> Result<&GameState, RulesError> {
        match mem::replace(&mut self.state, GameState::AwaitingSelection) {
            GameState::AwaitingSelection => self.select_piece(at)?,
            GameState::AwaitingDestination { from, destinations } => {
                if !destinations.contains(&at) {
                    trace!("{} is not a destination of {}, clearing selection", at, from);
                } else if self.position.is_promotion_move(from, at) {
                    self.state = GameState::AwaitingPromotionChoice { from, to: at };
                } else {
                    self.finish_move(Move::new(from, at))?;
                }
            }
            pending @ GameState::AwaitingPromotionChoice { .. } => self.state = pending,
            over @ GameState::GameOver(_) => {
                self.state = over;
                return Err(RulesError::GameOver);
            }
        }

        Ok(&self.state)
    }

    fn select_piece(&mut self, at: Coord) -> Result<(), RulesError> {
        let side = self.position.side_to_move();
        match self.position.piece_at(at) {
            Some(piece) if piece.color == side => {
                let destinations = self.position.legal_moves_from(at)?;
                if destinations.is_empty() {
                    trace!("{} on {} has no legal moves", piece, at);
                } else {
                    self.state = GameState::AwaitingDestination {
                        from: at,
                        destinations,
                    };
                }
            }
            _ => trace!("{} holds nothing {} can move", at, side.name()),
        }

        Ok(())
    }

    /// Completes a pending promotion with the chosen piece letter. A missing
    /// or unreadable letter promotes to a queen.
    pub fn choose_promotion(&mut self, choice: Option<char>) -> Result<&GameState, RulesError> {
        match self.state {
            GameState::AwaitingPromotionChoice { from, to } => {
                let piece = resolve_promotion_char(self.position.side_to_move(), choice);
                self.finish_move(Move::promotion(from, to, piece.kind))?;
            }
            GameState::GameOver(_) => return Err(RulesError::GameOver),
            _ => trace!("no promotion pending"),
        }

        Ok(&self.state)
    }

    /// Plays a move directly, without the click protocol. Clears any
    /// selection in progress.
    pub fn play(&mut self, mov: Move) -> Result<&GameState, RulesError> {
        if let GameState::GameOver(_) = self.state {
            return Err(RulesError::GameOver);
        }

        let next = self.position.apply_move(mov)?;
        self.commit(mov, next)?;
        Ok(&self.state)
    }

    /// One second passes on the clock of the side to move.
    pub fn tick(&mut self) -> &GameState {
        if let GameState::GameOver(_) = self.state {
            return &self.state;
        }

        let side = self.position.side_to_move();
        if self.clock.tick(side) {
            debug!("{} ran out of time", side.name());
            self.state = GameState::GameOver(Outcome::Timeout {
                winner: side.toggle(),
            });
        }

        &self.state
    }

    fn finish_move(&mut self, mov: Move) -> Result<(), RulesError> {
        let next = self.position.apply_legal_move(mov);
        self.commit(mov, next)
    }

    fn commit(&mut self, mov: Move, next: Position) -> Result<(), RulesError> {
        debug!("{} plays {}", self.position.side_to_move().name(), mov);
        self.position = next;
        self.history.push(mov);
        self.state = GameState::AwaitingSelection;
        self.state = self.state_after_move()?;
        Ok(())
    }

    fn state_after_move(&self) -> Result<GameState, RulesError> {
        let side = self.position.side_to_move();
        let state = match self.position.status()? {
            GameStatus::Checkmate => GameState::GameOver(Outcome::Checkmate {
                winner: side.toggle(),
            }),
            GameStatus::Stalemate => GameState::GameOver(Outcome::Stalemate),
            GameStatus::Check => {
                debug!("{} is in check", side.name());
                GameState::AwaitingSelection
            }
            GameStatus::Ongoing => GameState::AwaitingSelection,
        };
        Ok(state)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameState, Outcome};
    use crate::clock::{Clock, GameConfig};
    use crate::error::RulesError;
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, Coord, Piece, PieceKind};

    fn sq(name: &str) -> Coord {
        name.parse().unwrap()
    }

    #[test]
    fn two_clicks_play_a_move() {
        let mut game = Game::default();
        match game.select(sq("e2")).unwrap() {
            GameState::AwaitingDestination { from, destinations } => {
                assert_eq!(sq("e2"), *from);
                assert_eq!(&[sq("e4"), sq("e3")], &destinations[..]);
            }
            other => panic!("unexpected state {:?}", other),
        }

        assert_eq!(&GameState::AwaitingSelection, game.select(sq("e4")).unwrap());
        assert_eq!(Color::Black, game.position().side_to_move());
        assert_eq!(&[Move::new(sq("e2"), sq("e4"))], game.history());
    }

    #[test]
    fn rejected_clicks_do_not_move() {
        let mut game = Game::default();

        // Empty square, enemy piece, piece without moves.
        for name in &["e4", "e7", "a1"] {
            assert_eq!(&GameState::AwaitingSelection, game.select(sq(name)).unwrap());
        }

        // A destination the pawn cannot reach clears the selection.
        game.select(sq("e2")).unwrap();
        assert_eq!(&GameState::AwaitingSelection, game.select(sq("e5")).unwrap());
        assert_eq!(&Position::from_start_position(), game.position());
        assert!(game.history().is_empty());
    }

    #[test]
    fn promotion_waits_for_choice() {
        let pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mut game = Game::from_position(pos, Clock::default()).unwrap();
        game.select(sq("a7")).unwrap();
        assert_eq!(
            &GameState::AwaitingPromotionChoice {
                from: sq("a7"),
                to: sq("a8")
            },
            game.select(sq("a8")).unwrap()
        );

        // Clicks are ignored until the choice arrives.
        game.select(sq("h8")).unwrap();
        assert!(game.position().piece_at(sq("a8")).is_none());

        game.choose_promotion(Some('N')).unwrap();
        assert_eq!(
            Some(Piece::new(PieceKind::Knight, Color::White)),
            game.position().piece_at(sq("a8"))
        );
        assert_eq!(Color::Black, game.position().side_to_move());
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::default();
        for mov in &["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play(mov.parse().unwrap()).unwrap();
        }

        assert_eq!(
            Some(Outcome::Checkmate {
                winner: Color::Black
            }),
            game.outcome()
        );
        assert_eq!(Err(RulesError::GameOver), game.select(sq("e1")).map(|_| ()));
        assert_eq!(
            Err(RulesError::GameOver),
            game.play("a2a3".parse().unwrap()).map(|_| ())
        );
    }

    #[test]
    fn stalemate_ends_the_game() {
        let pos = Position::from_fen("7k/5K2/8/6Q1/8/8/8/8 w - - 0 1").unwrap();
        let mut game = Game::from_position(pos, Clock::default()).unwrap();
        game.play("g5g6".parse().unwrap()).unwrap();
        assert_eq!(Some(Outcome::Stalemate), game.outcome());
        assert_eq!(None, Outcome::Stalemate.winner());
    }

    #[test]
    fn clock_runs_out() {
        let mut game = Game::new(&GameConfig { initial_seconds: 2 });
        assert_eq!(&GameState::AwaitingSelection, game.tick());
        assert_eq!(
            &GameState::GameOver(Outcome::Timeout {
                winner: Color::Black
            }),
            game.tick()
        );
        assert_eq!(0, game.clock().remaining(Color::White));
        assert_eq!(2, game.clock().remaining(Color::Black));
    }

    #[test]
    fn resumes_finished_games() {
        let mated = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w - - 0 1")
            .unwrap();
        let game = Game::from_position(mated, Clock::default()).unwrap();
        assert_eq!(
            Some(Outcome::Checkmate {
                winner: Color::Black
            }),
            game.outcome()
        );

        let flagged = Game::from_position(Position::from_start_position(), Clock::with_remaining(0, 10))
            .unwrap();
        assert_eq!(
            Some(Outcome::Timeout {
                winner: Color::Black
            }),
            flagged.outcome()
        );
    }

    #[test]
    fn snapshot_carries_clock() {
        let mut game = Game::default();
        game.tick();
        game.play("e2e4".parse().unwrap()).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(599, snapshot.white_time);
        assert_eq!(600, snapshot.black_time);
        assert_eq!(Color::Black, snapshot.turn);

        let resumed = Game::from_snapshot(&snapshot).unwrap();
        assert_eq!(game.position(), resumed.position());
        assert_eq!(game.clock(), resumed.clock());
    }
}
