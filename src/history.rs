// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::error::{RuleError, RuleResult};
use crate::legality::MoveClass;
use crate::moves::Move;
use crate::special::castle_rook_squares;
use crate::types::TableIndex;
use crate::types::{PieceId, PieceKind, Square};

bitflags! {
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const EN_PASSANT = 0b0000_0010;
        const CASTLE = 0b0000_0100;
        const DOUBLE_PAWN_PUSH = 0b0000_1000;
        const PROMOTION = 0b0001_0000;
    }
}

/// A piece taken off the board by a move, and the square it was taken
/// from. For en passant the square is not the move's destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub piece: PieceId,
    pub square: Square,
}

/// One applied move, with enough information to take it back exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Capture>,
    pub flags: MoveFlags,
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }
}

//
// Making moves
//

impl Board {
    /// Moves the piece at `from` to `to` for the side to move. Pawns
    /// reaching the last rank become queens.
    pub fn make_move(&mut self, from: Square, to: Square) -> RuleResult<()> {
        self.play(from, to, None)
    }

    /// Like `make_move`, but a pawn reaching the last rank becomes `kind`.
    /// Supplying a promotion for a move that doesn't promote is an error.
    pub fn make_move_promoting(&mut self, from: Square, to: Square, kind: PieceKind) -> RuleResult<()> {
        self.play(from, to, Some(kind))
    }

    pub fn apply_move(&mut self, mov: Move) -> RuleResult<()> {
        self.play(mov.source(), mov.destination(), mov.promotion())
    }

    /// Moves a piece using textual locations, e.g. `("e2", "e4")`.
    pub fn move_by_location(&mut self, from: &str, to: &str) -> RuleResult<()> {
        let from = from.parse()?;
        let to = to.parse()?;
        self.make_move(from, to)
    }

    /// Plays a comma-separated list of moves such as `"e2e4,e7e5"`,
    /// stopping at the first one that fails.
    pub fn play_sequence(&mut self, moves: &str) -> RuleResult<()> {
        for text in moves.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match (text.get(0..2), text.get(2..)) {
                (Some(from), Some(to)) => self.move_by_location(from, to.trim())?,
                _ => return Err(RuleError::InvalidLocation),
            }
        }

        Ok(())
    }

    fn play(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> RuleResult<()> {
        let id = self
            .piece_id_at(from)
            .ok_or(RuleError::NoPieceAtPosition)?;
        let piece = self.piece(id);
        if piece.color != self.side_to_move {
            return Err(RuleError::OpponentsPiece);
        }

        let class = self.validate_move(from, to)?;
        let promotes = piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank();
        let promotion = match (promotes, promotion) {
            (true, None) => Some(PieceKind::Queen),
            (true, Some(kind)) if kind.is_promotion_target() => Some(kind),
            (false, None) => None,
            _ => return Err(RuleError::InvalidPromotion),
        };

        self.apply(id, from, to, class, promotion);
        Ok(())
    }

    /// Carries out a move that has already been validated.
    fn apply(
        &mut self,
        id: PieceId,
        from: Square,
        to: Square,
        class: MoveClass,
        promotion: Option<PieceKind>,
    ) {
        let piece = self.piece(id);
        let mut flags = MoveFlags::QUIET;

        let captured = match class {
            MoveClass::EnPassant { captured } => {
                flags |= MoveFlags::EN_PASSANT;
                self.squares[captured.index()]
                    .take()
                    .map(|victim| Capture {
                        piece: victim,
                        square: captured,
                    })
            }
            _ => self.squares[to.index()].map(|victim| Capture {
                piece: victim,
                square: to,
            }),
        };

        if captured.is_some() {
            flags |= MoveFlags::CAPTURE;
        }

        self.squares[from.index()] = None;
        self.squares[to.index()] = Some(id);

        if let MoveClass::Castle { rook_from, rook_to } = class {
            flags |= MoveFlags::CASTLE;
            let rook = self.squares[rook_from.index()].take();
            self.squares[rook_to.index()] = rook;
            if let Some(rook) = rook {
                self.move_counts[rook.index()] += 1;
            }
        }

        if piece.kind == PieceKind::Pawn && (to.rank_index() - from.rank_index()).abs() == 2 {
            flags |= MoveFlags::DOUBLE_PAWN_PUSH;
        }

        if let Some(kind) = promotion {
            flags |= MoveFlags::PROMOTION;
            self.pieces[id.index()].kind = kind;
        }

        if piece.kind == PieceKind::King {
            self.kings[piece.color.as_index()] = Some(to);
        }

        self.move_counts[id.index()] += 1;

        let record = MoveRecord {
            piece: id,
            from,
            to,
            captured,
            flags,
            promotion,
        };
        self.history.truncate(self.applied);
        self.history.push(record);
        self.applied += 1;

        self.side_to_move = piece.color.toggle();
        self.refresh_checks();
        debug!("{} {}{} ({:?})", piece, from, to, flags);
    }
}

//
// History queries and undo
//

impl Board {
    /// Takes back the most recently applied move.
    pub fn undo_move(&mut self) -> RuleResult<()> {
        if self.applied == 0 {
            return Err(RuleError::NoPreviousMove);
        }

        let record = self.history[self.applied - 1];
        let piece = self.piece(record.piece);
        let castle = if record.is_castle() {
            Some(castle_rook_squares(piece.color, record.to)?)
        } else {
            None
        };

        self.squares[record.to.index()] = None;
        self.squares[record.from.index()] = Some(record.piece);
        if let Some(capture) = record.captured {
            self.squares[capture.square.index()] = Some(capture.piece);
        }

        if let Some((rook_from, rook_to)) = castle {
            let rook = self.squares[rook_to.index()].take();
            self.squares[rook_from.index()] = rook;
            if let Some(rook) = rook {
                self.move_counts[rook.index()] -= 1;
            }
        }

        if record.promotion.is_some() {
            self.pieces[record.piece.index()].kind = PieceKind::Pawn;
        }

        if piece.kind == PieceKind::King {
            self.kings[piece.color.as_index()] = Some(record.from);
        }

        self.move_counts[record.piece.index()] -= 1;
        self.side_to_move = piece.color;
        self.applied -= 1;
        self.refresh_checks();
        debug!("undo {}{}", record.from, record.to);
        Ok(())
    }

    /// The most recently applied move, if any.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.applied.checked_sub(1).map(|idx| &self.history[idx])
    }

    /// Every applied move, oldest first. Undone moves are not included.
    pub fn moves(&self) -> &[MoveRecord] {
        &self.history[..self.applied]
    }

    /// The applied moves as text, e.g. `"e2e4,e7e5"`.
    pub fn history(&self) -> String {
        self.moves()
            .iter()
            .map(|record| format!("{}{}", record.from, record.to))
            .collect::<Vec<_>>()
            .join(",")
    }
}
