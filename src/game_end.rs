// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move enumeration and the end-of-game conditions built on it.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, File, PieceKind, Square};

/// No chess position has more than 218 legal moves.
pub type MoveVec = ArrayVec<[Move; 256]>;

static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl Board {
    /// Every legal move available to `color`, whether or not it is that
    /// color's turn. Promotions are listed once per promotion kind.
    ///
    /// Hand-built positions can have more moves than a `MoveVec` holds. The
    /// list then stops at capacity.
    pub fn legal_moves(&mut self, color: Color) -> MoveVec {
        let mut moves = MoveVec::new();
        self.collect_moves(color, &mut moves, false);
        moves
    }

    /// Whether `color` has at least one legal move. Stops at the first one
    /// found.
    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let mut moves = MoveVec::new();
        self.collect_moves(color, &mut moves, true);
        !moves.is_empty()
    }

    /// `color` is in check and has no legal move.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_check(color) && !self.has_legal_move(color)
    }

    /// `color` is not in check but has no legal move.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_check(color) && !self.has_legal_move(color)
    }

    fn collect_moves(&mut self, color: Color, moves: &mut MoveVec, first_only: bool) {
        let evasions = self.evasion_mask(color);
        let pieces: Vec<_> = self.pieces_of(color).collect();
        for (from, _, piece) in pieces {
            let mut targets = attacks::reachable_squares(piece, from);
            match piece.kind {
                PieceKind::King => {
                    if self.is_castle_attempt(piece, from, Square::of(from.rank(), File::G)) {
                        targets.set(Square::of(from.rank(), File::C));
                        targets.set(Square::of(from.rank(), File::G));
                    }
                }
                PieceKind::Pawn => {}
                _ => {
                    if let Some(mask) = evasions {
                        targets = targets & mask;
                    }
                }
            }

            for to in targets {
                // Pawns are left out of the evasion mask: an en passant
                // capture can remove a checking pawn without landing on it.
                if piece.kind == PieceKind::Pawn
                    && from.file() == to.file()
                    && evasions.map_or(false, |mask| !mask.test(to))
                {
                    continue;
                }

                if self.validate_move(from, to).is_err() {
                    continue;
                }

                let promotes = piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank();
                let pushed = if promotes {
                    PROMOTION_KINDS
                        .iter()
                        .try_for_each(|&kind| moves.try_push(Move::promoting(from, to, kind)))
                } else {
                    moves.try_push(Move::new(from, to))
                };

                if pushed.is_err() {
                    warn!("move list for {} is full at {} moves", color, moves.len());
                    return;
                }

                if first_only {
                    return;
                }
            }
        }
    }

    /// When `color` is in check, the squares a non-king move has to land on
    /// to resolve it: the checking piece or a square between it and the
    /// king. Empty under double check.
    fn evasion_mask(&self, color: Color) -> Option<Bitboard> {
        if !self.is_check(color) {
            return None;
        }

        let king = self.king_square(color)?;
        let checkers = self.attackers_of(king, color.toggle());
        if checkers.count() != 1 {
            return Some(Bitboard::none());
        }

        let checker = checkers.first()?;
        let mut mask = attacks::between(checker, king);
        mask.set(checker);
        Some(mask)
    }
}
