// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality. A move is checked in a fixed order and the first rule it
//! breaks is reported:
//!
//!   1. the destination must not hold a piece of the mover's color,
//!   2. pawns only capture diagonally and only push onto empty squares
//!      (diagonal moves onto empty squares must be en passant),
//!   3. nothing may stand between source and destination,
//!   4. a non-king move must not expose its own king, and must resolve
//!      any check that is already on the board,
//!   5. a king may not step next to the other king or onto an attacked
//!      square.
//!
//! Steps 4 and 5 are answered by simulating the move on the board itself
//! through a `Scratch` guard, which puts every touched square back when it
//! goes out of scope.
use arrayvec::ArrayVec;
use std::ops::Deref;

use crate::attacks;
use crate::board::Board;
use crate::error::{RuleError, RuleResult};
use crate::types::TableIndex;
use crate::types::{Piece, PieceId, PieceKind, Square};

/// How an accepted move is carried out on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveClass {
    /// A plain move or capture on the destination square.
    Normal,
    /// A pawn capture where the captured pawn stands beside the mover
    /// rather than on the destination.
    EnPassant { captured: Square },
    /// A king's two-file move that also relocates a rook.
    Castle { rook_from: Square, rook_to: Square },
}

/// A scoped edit of the board's occupancy. Each square changed through
/// `put` is restored, latest first, when the guard is dropped, together
/// with the king-square cache. Reads go through `Deref`.
pub(crate) struct Scratch<'a> {
    board: &'a mut Board,
    saved: ArrayVec<[(Square, Option<PieceId>); 4]>,
    kings: [Option<Square>; 2],
}

impl<'a> Scratch<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Scratch<'a> {
        let kings = board.kings;
        Scratch {
            board,
            saved: ArrayVec::new(),
            kings,
        }
    }

    pub(crate) fn put(&mut self, square: Square, occupant: Option<PieceId>) {
        let previous = self.board.squares[square.index()];
        self.saved.push((square, previous));
        self.board.squares[square.index()] = occupant;
        if let Some(id) = occupant {
            let piece = self.board.pieces[id.index()];
            if piece.kind == PieceKind::King {
                self.board.kings[piece.color.as_index()] = Some(square);
            }
        }
    }
}

impl<'a> Deref for Scratch<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> Drop for Scratch<'a> {
    fn drop(&mut self) {
        while let Some((square, occupant)) = self.saved.pop() {
            self.board.squares[square.index()] = occupant;
        }
        self.board.kings = self.kings;
    }
}

impl Board {
    /// Checks whether the piece on `from` may move to `to`, without regard
    /// to whose turn it is. On success the board is unchanged and the
    /// returned `MoveClass` says how the move would be carried out.
    pub fn validate_move(&mut self, from: Square, to: Square) -> RuleResult<MoveClass> {
        let id = self
            .piece_id_at(from)
            .ok_or(RuleError::NoPieceAtPosition)?;
        let piece = self.piece(id);
        let result = if self.is_castle_attempt(piece, from, to) {
            self.check_castle(id, from, to)
        } else if !attacks::reachable_squares(piece, from).test(to) {
            Err(RuleError::InvalidPieceMove)
        } else {
            self.is_legal_move(id, from, to)
        };

        if let Err(err) = result {
            trace!("rejected {} {}{}: {}", piece, from, to, err);
        }
        result
    }

    /// Legality of moving piece `id` from `from` to `to`, assuming `to` is
    /// already known to be in the piece's raw reach.
    pub fn is_legal_move(&mut self, id: PieceId, from: Square, to: Square) -> RuleResult<MoveClass> {
        let piece = self.piece(id);
        let target = self.piece_at(to);
        if let Some(occupant) = target {
            if occupant.color == piece.color {
                return Err(RuleError::OccupiedPosition);
            }
        }

        let mut class = MoveClass::Normal;
        if piece.kind == PieceKind::Pawn {
            if from.file() == to.file() {
                if target.is_some() {
                    return Err(RuleError::InvalidPieceMove);
                }
            } else if target.is_none() {
                class = match self.en_passant_capture(piece, from, to) {
                    Some(captured) => MoveClass::EnPassant { captured },
                    None => return Err(RuleError::InvalidPieceMove),
                };
            }
        }

        if self.is_path_blocked(piece, from, to) {
            return Err(RuleError::MoveBlocked);
        }

        if piece.kind == PieceKind::King {
            self.check_king_destination(piece, from, to)?;
        } else {
            self.check_king_exposure(id, piece, from, to, class)?;
        }

        Ok(class)
    }

    /// Re-validates every entry in the mover's line-of-sight cache against
    /// the proposed move.
    fn check_king_exposure(
        &mut self,
        id: PieceId,
        piece: Piece,
        from: Square,
        to: Square,
        class: MoveClass,
    ) -> RuleResult<()> {
        let color = piece.color;
        let king = match self.king_square(color) {
            Some(king) => king,
            None => return Ok(()),
        };

        let in_check = self.is_check(color);
        let capture_square = match class {
            MoveClass::EnPassant { captured } => captured,
            _ => to,
        };

        let sightings: Vec<_> = self.line_of_sight(color).cloned().collect();
        for sighting in sightings {
            let attacker = match self.piece_id_at(sighting.square) {
                Some(occupant) if occupant == sighting.attacker => self.piece(occupant),
                _ => continue,
            };

            if !attacks::attack_squares(attacker, sighting.square).test(king) {
                continue;
            }

            // Taking the attacker removes the threat entirely.
            if capture_square == sighting.square {
                continue;
            }

            if !in_check && !attacks::between(sighting.square, king).test(from) {
                continue;
            }

            let exposed = {
                let mut scratch = Scratch::new(self);
                scratch.put(from, None);
                scratch.put(to, Some(id));
                if let MoveClass::EnPassant { captured } = class {
                    scratch.put(captured, None);
                }
                !scratch.is_path_blocked(attacker, sighting.square, king)
            };

            if exposed {
                return Err(if in_check {
                    RuleError::MoveWhileInCheck
                } else {
                    RuleError::MovingIntoCheck
                });
            }
        }

        // An en passant capture empties two squares on one rank, which can
        // open a line that had two blockers and so is not in the cache.
        if let MoveClass::EnPassant { captured } = class {
            let exposed = {
                let mut scratch = Scratch::new(self);
                scratch.put(from, None);
                scratch.put(to, Some(id));
                scratch.put(captured, None);
                scratch.is_square_attacked(king, color.toggle())
            };

            if exposed {
                return Err(if in_check {
                    RuleError::MoveWhileInCheck
                } else {
                    RuleError::MovingIntoCheck
                });
            }
        }

        Ok(())
    }

    fn check_king_destination(&mut self, king: Piece, from: Square, to: Square) -> RuleResult<()> {
        let enemy = king.color.toggle();
        if let Some(enemy_king) = self.king_square(enemy) {
            if attacks::king_moves(enemy_king).test(to) {
                return Err(RuleError::KingTooCloseToKing);
            }
        }

        // The king is lifted off its square so it doesn't shadow a slider
        // looking through it.
        let attacked = {
            let mut scratch = Scratch::new(self);
            scratch.put(from, None);
            scratch.is_square_attacked(to, enemy)
        };

        if attacked {
            return Err(RuleError::MovingIntoCheck);
        }

        Ok(())
    }
}
