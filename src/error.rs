// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rule violations reported by the board. Every rejected move or undo
//! leaves the board exactly as it was before the call.
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("location string is invalid")]
    InvalidLocation,

    #[error("no piece at specified position")]
    NoPieceAtPosition,

    #[error("piece belongs to opponent")]
    OpponentsPiece,

    #[error("invalid move for piece")]
    InvalidPieceMove,

    #[error("position is already occupied")]
    OccupiedPosition,

    #[error("move is blocked by another piece")]
    MoveBlocked,

    #[error("move puts king in check")]
    MovingIntoCheck,

    #[error("can't move piece while in check")]
    MoveWhileInCheck,

    #[error("king can't be that close to another king")]
    KingTooCloseToKing,

    #[error("rook not found to castle with")]
    NoRookToCastleWith,

    #[error("king or rook has already moved before")]
    KingOrRookMoved,

    #[error("castle while king is in check")]
    CastleWithKingInCheck,

    #[error("castle with pieces between king and rook")]
    CastleWithPieceBetween,

    #[error("castle moving king through check")]
    CastleMoveThroughCheck,

    #[error("castle to an invalid file")]
    InvalidCastleTarget,

    #[error("no previous move available")]
    NoPreviousMove,

    #[error("pawns may only promote to a knight, bishop, rook or queen")]
    InvalidPromotion,

    #[error("a king of that color is already on the board")]
    DuplicateKing,

    #[error("no room on the board for another piece")]
    PieceLimit,
}

pub type RuleResult<T> = Result<T, RuleError>;
