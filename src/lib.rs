// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine: board state, move legality (including castling,
//! en passant and promotion), check, checkmate and stalemate detection, and
//! move history with undo.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod bitboard;
mod board;
mod error;
mod game_end;
mod history;
mod legality;
mod moves;
pub mod notation;
mod perft;
mod special;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use board::{Board, Sighting};
pub use error::{RuleError, RuleResult};
pub use game_end::MoveVec;
pub use history::{Capture, MoveFlags, MoveRecord};
pub use legality::MoveClass;
pub use moves::{Move, MoveInfo};
pub use perft::perft;
pub use types::{Color, Direction, File, Piece, PieceId, PieceKind, Rank, Square};
pub use types::{COLORS, DIRECTIONS, FILES, PIECE_KINDS, RANKS};
