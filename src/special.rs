// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Castling and en passant, the two moves whose legality depends on more
//! than the current occupancy.
use crate::attacks;
use crate::board::Board;
use crate::error::{RuleError, RuleResult};
use crate::legality::MoveClass;
use crate::types::{Color, File, Piece, PieceId, PieceKind, Square};

/// The rook's source and destination for a castle by `color` whose king
/// lands on `king_to`. Only the c- and g-files are castling targets.
pub(crate) fn castle_rook_squares(color: Color, king_to: Square) -> RuleResult<(Square, Square)> {
    let rank = color.home_rank();
    match king_to.file() {
        File::C => Ok((Square::of(rank, File::A), Square::of(rank, File::D))),
        File::G => Ok((Square::of(rank, File::H), Square::of(rank, File::F))),
        _ => Err(RuleError::InvalidCastleTarget),
    }
}

impl Board {
    /// Whether moving `piece` from `from` to `to` is an attempt to castle:
    /// a king on its home square moving to the c- or g-file of its home
    /// rank.
    pub(crate) fn is_castle_attempt(&self, piece: Piece, from: Square, to: Square) -> bool {
        let home = piece.color.home_rank();
        piece.kind == PieceKind::King
            && from == Square::of(home, File::E)
            && to.rank() == home
            && (to.file() == File::C || to.file() == File::G)
    }

    /// Checks every precondition of a castle, in order: the king is not in
    /// check, neither the king nor the rook has ever moved, the rook is on
    /// its corner, the squares between them are empty and the king does not
    /// pass through or land on an attacked square.
    pub(crate) fn check_castle(&self, king: PieceId, from: Square, to: Square) -> RuleResult<MoveClass> {
        let color = self.piece(king).color;
        let (rook_from, rook_to) = castle_rook_squares(color, to)?;

        if self.is_check(color) {
            return Err(RuleError::CastleWithKingInCheck);
        }

        if self.move_count(king) != 0 {
            return Err(RuleError::KingOrRookMoved);
        }

        let rook = match self.piece_id_at(rook_from) {
            Some(id) if self.piece(id) == Piece::new(PieceKind::Rook, color) => id,
            _ => return Err(RuleError::NoRookToCastleWith),
        };

        if self.move_count(rook) != 0 {
            return Err(RuleError::KingOrRookMoved);
        }

        let between_occupied = attacks::between(from, rook_from)
            .iter()
            .any(|sq| self.piece_id_at(sq).is_some());
        if between_occupied {
            return Err(RuleError::CastleWithPieceBetween);
        }

        let mut path = attacks::between(from, to);
        path.set(to);
        if path
            .iter()
            .any(|sq| self.is_square_attacked(sq, color.toggle()))
        {
            return Err(RuleError::CastleMoveThroughCheck);
        }

        Ok(MoveClass::Castle { rook_from, rook_to })
    }

    /// If a pawn moving diagonally from `from` onto the empty square `to`
    /// is a legal en passant capture, the square of the pawn it captures.
    ///
    /// The mover has to be on its en passant rank, and the pawn beside it
    /// on the destination file must be an opposing pawn that arrived there
    /// with a two-square advance on the immediately preceding move.
    pub(crate) fn en_passant_capture(&self, pawn: Piece, from: Square, to: Square) -> Option<Square> {
        if pawn.kind != PieceKind::Pawn
            || from.rank() != pawn.color.en_passant_rank()
            || from.file() == to.file()
            || self.piece_id_at(to).is_some()
        {
            return None;
        }

        let captured = Square::of(from.rank(), to.file());
        let victim = self.piece_id_at(captured)?;
        if self.piece(victim) != Piece::new(PieceKind::Pawn, pawn.color.toggle()) {
            return None;
        }

        let last = self.last_move()?;
        let advanced_two = (last.from.rank_index() - last.to.rank_index()).abs() == 2;
        if last.piece == victim && last.to == captured && advanced_two {
            Some(captured)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn castling_board() -> Board {
        let mut board = Board::empty();
        for &(text, chr) in &[
            ("e1", 'K'),
            ("a1", 'R'),
            ("h1", 'R'),
            ("e8", 'k'),
            ("a8", 'r'),
            ("h8", 'r'),
        ] {
            board
                .add_piece(sq(text), Piece::try_from(chr).unwrap())
                .unwrap();
        }
        board
    }

    #[test]
    fn rook_squares() {
        assert_eq!(
            Ok((sq("a1"), sq("d1"))),
            castle_rook_squares(Color::White, sq("c1"))
        );
        assert_eq!(
            Ok((sq("h8"), sq("f8"))),
            castle_rook_squares(Color::Black, sq("g8"))
        );
        assert_eq!(
            Err(RuleError::InvalidCastleTarget),
            castle_rook_squares(Color::White, sq("d1"))
        );
    }

    #[test]
    fn castle_attempt_detection() {
        let board = castling_board();
        let king = Piece::new(PieceKind::King, Color::White);
        assert!(board.is_castle_attempt(king, sq("e1"), sq("c1")));
        assert!(board.is_castle_attempt(king, sq("e1"), sq("g1")));
        assert!(!board.is_castle_attempt(king, sq("e1"), sq("f1")));
        assert!(!board.is_castle_attempt(king, sq("e1"), sq("g2")));
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert!(!board.is_castle_attempt(rook, sq("e1"), sq("c1")));
    }

    #[test]
    fn castle_both_sides() {
        let board = castling_board();
        let white_king = board.piece_id_at(sq("e1")).unwrap();
        let black_king = board.piece_id_at(sq("e8")).unwrap();
        assert_eq!(
            Ok(MoveClass::Castle {
                rook_from: sq("a1"),
                rook_to: sq("d1")
            }),
            board.check_castle(white_king, sq("e1"), sq("c1"))
        );
        assert_eq!(
            Ok(MoveClass::Castle {
                rook_from: sq("h8"),
                rook_to: sq("f8")
            }),
            board.check_castle(black_king, sq("e8"), sq("g8"))
        );
    }

    #[test]
    fn castle_needs_rook() {
        let mut board = castling_board();
        board.remove_piece(sq("h1")).unwrap();
        let king = board.piece_id_at(sq("e1")).unwrap();
        assert_eq!(
            Err(RuleError::NoRookToCastleWith),
            board.check_castle(king, sq("e1"), sq("g1"))
        );
    }

    #[test]
    fn castle_queenside_ignores_attacks_on_b_file() {
        let mut board = castling_board();
        board
            .add_piece(sq("b5"), Piece::new(PieceKind::Rook, Color::Black))
            .unwrap();
        let king = board.piece_id_at(sq("e1")).unwrap();
        assert!(board.check_castle(king, sq("e1"), sq("c1")).is_ok());
    }

    #[test]
    fn castle_into_attack() {
        let mut board = castling_board();
        board
            .add_piece(sq("g5"), Piece::new(PieceKind::Rook, Color::Black))
            .unwrap();
        let king = board.piece_id_at(sq("e1")).unwrap();
        assert_eq!(
            Err(RuleError::CastleMoveThroughCheck),
            board.check_castle(king, sq("e1"), sq("g1"))
        );
    }

    #[test]
    fn castle_in_check() {
        let mut board = castling_board();
        board
            .add_piece(sq("e5"), Piece::new(PieceKind::Rook, Color::Black))
            .unwrap();
        let king = board.piece_id_at(sq("e1")).unwrap();
        assert_eq!(
            Err(RuleError::CastleWithKingInCheck),
            board.check_castle(king, sq("e1"), sq("g1"))
        );
    }

    #[test]
    fn en_passant_requires_previous_double_push() {
        let mut board = Board::empty();
        for &(text, chr) in &[("e1", 'K'), ("e8", 'k'), ("e5", 'P'), ("d5", 'p')] {
            board
                .add_piece(sq(text), Piece::try_from(chr).unwrap())
                .unwrap();
        }

        // The black pawn was placed there, not advanced: no capture.
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        assert_eq!(None, board.en_passant_capture(pawn, sq("e5"), sq("d6")));
    }
}
