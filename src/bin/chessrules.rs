// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::process;
use std::time::Instant;

use chessrules::{
    format_time, perft, Color, Coord, Game, GameConfig, GameSnapshot, GameStatus, Move,
    MoveSelector, Position, RandomMover,
};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .help("JSON file with game settings")
                .value_name("CONFIG")
                .long("--config")
                .takes_value(true)
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal destinations of a piece")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square of the piece to move, e.g. e2")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Report check, checkmate or stalemate for the side to move")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true)
                        .default_value("3"),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a move on a saved game and let the computer answer")
                .arg(
                    Arg::with_name("SNAPSHOT")
                        .help("JSON game document; a new game is started if it does not exist")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("MOVE")
                        .help("Move in coordinate notation, e.g. e2e4 or e7e8q")
                        .required(true)
                        .index(2),
                ),
        )
        .get_matches();

    let config = load_config(&matches);
    match matches.subcommand() {
        ("moves", Some(matches)) => run_moves(matches),
        ("status", Some(matches)) => run_status(matches),
        ("perft", Some(matches)) => run_perft(matches),
        ("play", Some(matches)) => run_play(matches, &config),
        _ => unreachable!(),
    }
}

fn fail<D: std::fmt::Display>(message: D) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn load_config(matches: &ArgMatches) -> GameConfig {
    let path = match matches.value_of("config") {
        Some(path) => path,
        None => return GameConfig::default(),
    };

    let file = File::open(path).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    let config: GameConfig =
        serde_json::from_reader(file).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    info!("loaded config from {}: {:?}", path, config);
    config
}

fn parse_fen(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap();
    Position::from_fen(fen).unwrap_or_else(|e| fail(format!("invalid fen: {}", e)))
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = parse_fen(matches);
    let square: Coord = matches
        .value_of("SQUARE")
        .unwrap()
        .parse()
        .unwrap_or_else(|e| fail(e));

    match pos.piece_at(square) {
        Some(piece) => println!("{} on {}", piece, square),
        None => fail(format!("{} is empty", square)),
    }

    let destinations = pos.legal_moves_from(square).unwrap_or_else(|e| fail(e));
    let names: Vec<String> = destinations.iter().map(|c| c.to_string()).collect();
    println!("{}", names.join(" "));
    process::exit(0);
}

fn run_status(matches: &ArgMatches) -> ! {
    let pos = parse_fen(matches);
    let side = pos.side_to_move();
    println!("{}", pos);
    println!();
    match pos.status().unwrap_or_else(|e| fail(e)) {
        GameStatus::Ongoing => println!("{} to move", side.name()),
        GameStatus::Check => println!("{} is in check", side.name()),
        GameStatus::Checkmate => println!("checkmate, {} wins", side.toggle().name()),
        GameStatus::Stalemate => println!("stalemate"),
    }

    process::exit(0);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_fen(matches);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i).unwrap_or_else(|e| fail(e));
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_play(matches: &ArgMatches, config: &GameConfig) -> ! {
    let path = matches.value_of("SNAPSHOT").unwrap();
    let mov: Move = matches
        .value_of("MOVE")
        .unwrap()
        .parse()
        .unwrap_or_else(|e| fail(e));

    let mut game = match File::open(path) {
        Ok(file) => {
            let snapshot: GameSnapshot = serde_json::from_reader(file)
                .unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
            Game::from_snapshot(&snapshot).unwrap_or_else(|e| fail(e))
        }
        Err(_) => {
            info!("{} not found, starting a new game", path);
            Game::new(config)
        }
    };

    if game.position().side_to_move() != Color::White {
        fail("it is not white's turn");
    }

    game.play(mov).unwrap_or_else(|e| fail(e));
    println!("you played {}", mov);
    if game.outcome().is_none() {
        let reply = RandomMover::new()
            .select(game.position())
            .unwrap_or_else(|e| fail(e));
        if let Some(reply) = reply {
            game.play(reply).unwrap_or_else(|e| fail(e));
            println!("computer played {}", reply);
        }
    }

    println!();
    println!("{}", game.position());
    println!(
        "white {}  black {}",
        format_time(game.clock().remaining(Color::White)),
        format_time(game.clock().remaining(Color::Black))
    );
    if let Some(outcome) = game.outcome() {
        match outcome.winner() {
            Some(winner) => println!("game over, {} wins", winner.name()),
            None => println!("game over, draw by stalemate"),
        }
    }

    let file = File::create(path).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    serde_json::to_writer_pretty(file, &game.snapshot())
        .unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    process::exit(0);
}
