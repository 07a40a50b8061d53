// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use rookery::notation::{self, Command, NotationError};
use rookery::{perft, Board, MoveInfo};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a two-player game at the terminal")
                .arg(
                    Arg::with_name("moves")
                        .help("Comma-separated moves to play before the prompt, e.g. e2e4,e7e5")
                        .value_name("MOVES")
                        .long("--moves")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count legal move paths from the starting position")
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    let moves = matches
        .subcommand_matches("play")
        .and_then(|m| m.value_of("moves"));
    if let Err(err) = run_play(moves) {
        eprintln!("io error: {}", err);
        process::exit(1);
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t!(matches, "depth", u32).unwrap_or(4);
    let board = Board::new();
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_play(moves: Option<&str>) -> io::Result<()> {
    let mut board = Board::new();
    if let Some(moves) = moves {
        if let Err(err) = board.play_sequence(moves) {
            println!("error: {}", err);
        }
    }

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        println!("{}", board);
        if let Some(color) = board.has_check() {
            println!("{} is in check", color);
        }

        let side = board.side_to_move();
        if board.is_checkmate(side) {
            println!("checkmate, {} wins", side.toggle());
            return Ok(());
        }

        if board.is_stalemate(side) {
            println!("stalemate");
            return Ok(());
        }

        print!("{} to move> ", side);
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let result: Result<(), NotationError> = match notation::parse_command(&line) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Undo) => board.undo_move().map_err(Into::into),
            Ok(Command::History) => {
                println!("{}", board.history());
                Ok(())
            }
            Ok(Command::HistoryJson) => {
                let infos: Vec<MoveInfo> = board.moves().iter().map(MoveInfo::from).collect();
                match serde_json::to_string_pretty(&infos) {
                    Ok(json) => println!("{}", json),
                    Err(err) => println!("error: {}", err),
                }
                Ok(())
            }
            Ok(Command::Move(mov)) => board.apply_move(mov).map_err(Into::into),
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            println!("error: {}", err);
        }
    }
}
