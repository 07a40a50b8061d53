// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of the commands typed at the interactive prompt.
use std::convert::TryFrom;

use regex::Regex;
use thiserror::Error;

use crate::error::RuleError;
use crate::moves::Move;
use crate::types::PieceKind;

lazy_static! {
    static ref MOVE_REGEX: Regex = Regex::new(r"^(\S{2}) ?(\S{2})([nbrqNBRQ])?$").unwrap();
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("allowed formats: l1 l2 or l1l2, optionally followed by n, b, r or q (e.g. a2 a4, a2a4 or e7e8n)")]
    Format,

    #[error(transparent)]
    Rule(#[from] RuleError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Undo,
    History,
    HistoryJson,
    Quit,
}

/// Parses a move written as two locations, with or without a space between
/// them: `"e2e4"` or `"e2 e4"`. A trailing piece letter picks the promotion
/// kind, as in `"e7e8n"`.
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let caps = MOVE_REGEX
        .captures(text.trim())
        .ok_or(NotationError::Format)?;
    let from = caps[1].parse()?;
    let to = caps[2].parse()?;
    let promotion = match caps.get(3).and_then(|m| m.as_str().chars().next()) {
        Some(chr) => Some(PieceKind::try_from(chr).map_err(|_| NotationError::Format)?),
        None => None,
    };

    Ok(match promotion {
        Some(kind) => Move::promoting(from, to, kind),
        None => Move::new(from, to),
    })
}

/// Parses one line of prompt input. `u` undoes, `p` prints the history,
/// `j` prints it as JSON and `q` quits; anything else must be a move.
pub fn parse_command(line: &str) -> Result<Command, NotationError> {
    match line.trim() {
        "u" => Ok(Command::Undo),
        "p" => Ok(Command::History),
        "j" => Ok(Command::HistoryJson),
        "q" | "quit" => Ok(Command::Quit),
        text => parse_move(text).map(Command::Move),
    }
}
