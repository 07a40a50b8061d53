// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hashbrown::HashSet;
use std::fmt;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::error::{RuleError, RuleResult};
use crate::history::MoveRecord;
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceId, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, RANKS};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An entry in a king's line-of-sight cache: an opposing piece that either
/// attacks the king outright or would attack it if a single piece between
/// them moved away.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sighting {
    pub attacker: PieceId,
    pub square: Square,
}

#[derive(Clone, Debug)]
pub struct Board {
    /// Every piece that has ever been placed on this board, indexed by
    /// `PieceId`. Captured pieces stay here so undo can put them back.
    pub(crate) pieces: Vec<Piece>,
    pub(crate) move_counts: Vec<u32>,
    pub(crate) squares: [Option<PieceId>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) kings: [Option<Square>; 2],
    pub(crate) check: [bool; 2],
    pub(crate) king_los: [HashSet<Sighting>; 2],
    pub(crate) history: Vec<MoveRecord>,

    /// Number of records in `history` that are currently applied. Records
    /// at or past this index were undone and are discarded by the next move.
    pub(crate) applied: usize,
}

//
// Construction and setup
//

impl Board {
    /// A board with the standard 32-piece starting layout, White to move.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for &(color, back, pawns) in &[
            (Color::White, Rank::One, Rank::Two),
            (Color::Black, Rank::Eight, Rank::Seven),
        ] {
            for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
                board.place(Square::of(back, file), Piece::new(kind, color));
            }
            for &file in FILES.iter() {
                board.place(
                    Square::of(pawns, file),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }

        board.refresh_derived();
        board
    }

    /// A board with no pieces on it, White to move. Pieces are added with
    /// `add_piece`; the engine expects exactly one king per color before
    /// any moves are made.
    pub fn empty() -> Board {
        Board {
            pieces: Vec::with_capacity(32),
            move_counts: Vec::with_capacity(32),
            squares: [None; 64],
            side_to_move: Color::White,
            kings: [None; 2],
            check: [false; 2],
            king_los: [HashSet::new(), HashSet::new()],
            history: Vec::new(),
            applied: 0,
        }
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> RuleResult<PieceId> {
        if self.squares[square.index()].is_some() {
            return Err(RuleError::OccupiedPosition);
        }

        if piece.kind == PieceKind::King && self.kings[piece.color.as_index()].is_some() {
            return Err(RuleError::DuplicateKing);
        }

        // Removed pieces keep their arena slot, so the arena only grows.
        if self.pieces.len() > u8::max_value() as usize {
            return Err(RuleError::PieceLimit);
        }

        let id = self.place(square, piece);
        self.refresh_derived();
        Ok(id)
    }

    pub fn remove_piece(&mut self, square: Square) -> RuleResult<Piece> {
        let id = self.squares[square.index()]
            .take()
            .ok_or(RuleError::NoPieceAtPosition)?;
        self.refresh_derived();
        Ok(self.pieces[id.index()])
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    fn place(&mut self, square: Square, piece: Piece) -> PieceId {
        debug_assert!(self.pieces.len() <= u8::max_value() as usize);
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(piece);
        self.move_counts.push(0);
        self.squares[square.index()] = Some(id);
        id
    }

    /// Re-derives every cached fact (king squares, check flags and
    /// line-of-sight sets) from occupancy alone.
    fn refresh_derived(&mut self) {
        self.kings = [None; 2];
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                if piece.kind == PieceKind::King {
                    self.kings[piece.color.as_index()] = Some(sq);
                }
            }
        }

        self.refresh_checks();
    }
}

//
// Board state getters
//

impl Board {
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn turn(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.piece_id_at(square).map(|id| self.pieces[id.index()])
    }

    /// Looks up a piece by its textual location, e.g. `"e4"`.
    pub fn get_piece_at(&self, location: &str) -> RuleResult<Piece> {
        let square = location.parse()?;
        self.piece_at(square).ok_or(RuleError::NoPieceAtPosition)
    }

    pub fn piece(&self, id: PieceId) -> Piece {
        self.pieces[id.index()]
    }

    pub fn move_count(&self, id: PieceId) -> u32 {
        self.move_counts[id.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.as_index()]
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.check[color.as_index()]
    }

    /// The color currently in check, if any. Black is reported first.
    pub fn has_check(&self) -> Option<Color> {
        [Color::Black, Color::White]
            .iter()
            .cloned()
            .find(|&color| self.is_check(color))
    }

    pub fn line_of_sight(&self, color: Color) -> impl Iterator<Item = &Sighting> {
        self.king_los[color.as_index()].iter()
    }

    pub fn occupancy(&self) -> Bitboard {
        Square::all()
            .filter(|sq| self.squares[sq.index()].is_some())
            .collect()
    }

    /// Every piece of the given color with the square it stands on.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceId, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            let id = self.squares[sq.index()]?;
            let piece = self.pieces[id.index()];
            if piece.color == color {
                Some((sq, id, piece))
            } else {
                None
            }
        })
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|occupant| occupant.is_some()).count()
    }
}

//
// Board analysis (blocking, attacks, line of sight)
//

impl Board {
    /// Whether any square strictly between `from` and `to` is occupied
    /// along the line the given piece would travel. Knights and kings are
    /// never blocked.
    pub fn is_path_blocked(&self, piece: Piece, from: Square, to: Square) -> bool {
        match piece.kind {
            PieceKind::Knight | PieceKind::King => false,
            _ => attacks::between(from, to)
                .iter()
                .any(|sq| self.squares[sq.index()].is_some()),
        }
    }

    /// The squares holding pieces of color `by` that attack `target`.
    pub fn attackers_of(&self, target: Square, by: Color) -> Bitboard {
        self.pieces_of(by)
            .filter(|&(sq, _, piece)| {
                attacks::attack_squares(piece, sq).test(target)
                    && !self.is_path_blocked(piece, sq, target)
            })
            .map(|(sq, _, _)| sq)
            .collect()
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces_of(by).any(|(sq, _, piece)| {
            attacks::attack_squares(piece, sq).test(target)
                && !self.is_path_blocked(piece, sq, target)
        })
    }

    /// Recomputes both check flags and both line-of-sight caches from
    /// scratch.
    pub(crate) fn refresh_checks(&mut self) {
        for &color in COLORS.iter() {
            self.check[color.as_index()] = match self.kings[color.as_index()] {
                Some(king) => self.is_square_attacked(king, color.toggle()),
                None => false,
            };
            self.refresh_line_of_sight(color);
        }
    }

    /// Rebuilds the line-of-sight cache for `color`'s king: every opposing
    /// piece that attacks the king, or that is aligned with it with exactly
    /// one piece in between.
    fn refresh_line_of_sight(&mut self, color: Color) {
        let mut sightings = HashSet::new();
        if let Some(king) = self.kings[color.as_index()] {
            let occupancy = self.occupancy();
            for (sq, id, piece) in self.pieces_of(color.toggle()) {
                if !attacks::attack_squares(piece, sq).test(king) {
                    continue;
                }

                if (attacks::between(sq, king) & occupancy).count() <= 1 {
                    sightings.insert(Sighting {
                        attacker: id,
                        square: sq,
                    });
                }
            }
        }

        trace!(
            "line of sight for {} king: {} entries",
            color,
            sightings.len()
        );
        self.king_los[color.as_index()] = sightings;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            write!(f, " {} ", rank)?;
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f)?;
        }

        write!(f, "   ")?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn starting_layout() {
        let board = Board::new();
        assert_eq!(32, board.piece_count());
        assert_eq!(Color::White, board.side_to_move());
        assert_eq!(Some(sq("e1")), board.king_square(Color::White));
        assert_eq!(Some(sq("e8")), board.king_square(Color::Black));
        assert_eq!(None, board.has_check());

        for &file in FILES.iter() {
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::White)),
                board.piece_at(Square::of(Rank::Two, file))
            );
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
                board.piece_at(Square::of(Rank::Seven, file))
            );
            for &rank in &[Rank::Three, Rank::Four, Rank::Five, Rank::Six] {
                assert_eq!(None, board.piece_at(Square::of(rank, file)));
            }
        }

        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            board.piece_at(sq("d1"))
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::Black)),
            board.piece_at(sq("d8"))
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Knight, Color::Black)),
            board.piece_at(sq("g8"))
        );
    }

    #[test]
    fn pieces_have_distinct_identities() {
        let board = Board::new();
        let a = board.piece_id_at(sq("a2")).unwrap();
        let b = board.piece_id_at(sq("b2")).unwrap();
        assert_eq!(board.piece(a), board.piece(b));
        assert_ne!(a, b);
    }

    #[test]
    fn add_piece_rejects_occupied_square() {
        let mut board = Board::new();
        let res = board.add_piece(sq("e2"), Piece::new(PieceKind::Queen, Color::White));
        assert_eq!(Err(RuleError::OccupiedPosition), res);
    }

    #[test]
    fn add_piece_rejects_second_king() {
        let mut board = Board::empty();
        board
            .add_piece(sq("e1"), Piece::new(PieceKind::King, Color::White))
            .unwrap();
        let res = board.add_piece(sq("e2"), Piece::new(PieceKind::King, Color::White));
        assert_eq!(Err(RuleError::DuplicateKing), res);
    }

    #[test]
    fn get_piece_at_text() {
        let board = Board::new();
        assert_eq!(
            Ok(Piece::new(PieceKind::King, Color::White)),
            board.get_piece_at("E1")
        );
        assert_eq!(Err(RuleError::NoPieceAtPosition), board.get_piece_at("e4"));
        assert_eq!(Err(RuleError::InvalidLocation), board.get_piece_at("e9"));
    }

    #[test]
    fn blocked_paths() {
        let board = Board::new();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert!(board.is_path_blocked(rook, sq("a1"), sq("a3")));
        assert!(!board.is_path_blocked(rook, sq("a1"), sq("a2")));
        assert!(!board.is_path_blocked(knight, sq("b1"), sq("c3")));
    }

    #[test]
    fn setup_computes_check() {
        let mut board = Board::empty();
        board
            .add_piece(sq("e1"), Piece::new(PieceKind::King, Color::White))
            .unwrap();
        board
            .add_piece(sq("e8"), Piece::new(PieceKind::King, Color::Black))
            .unwrap();
        board
            .add_piece(sq("e5"), Piece::new(PieceKind::Rook, Color::Black))
            .unwrap();

        assert!(board.is_check(Color::White));
        assert_eq!(Some(Color::White), board.has_check());
        assert_eq!(1, board.line_of_sight(Color::White).count());
        assert_eq!(0, board.line_of_sight(Color::Black).count());
    }

    #[test]
    fn line_of_sight_tracks_single_blockers() {
        use std::convert::TryFrom;

        let mut board = Board::empty();
        for &(text, piece) in &[
            ("e1", 'K'),
            ("e8", 'k'),
            ("e2", 'N'),
            ("e5", 'r'),
            ("a6", 'b'),
            ("h4", 'q'),
            ("g3", 'P'),
            ("f2", 'P'),
        ] {
            board
                .add_piece(sq(text), Piece::try_from(piece).unwrap())
                .unwrap();
        }

        // The rook pins the knight, the bishop is not aligned with the king
        // and the queen is behind two pawns.
        assert!(!board.is_check(Color::White));
        let attackers: Vec<_> = board.line_of_sight(Color::White).map(|s| s.square).collect();
        assert!(attackers.contains(&sq("e5")));
        assert!(!attackers.contains(&sq("a6")));
        assert!(!attackers.contains(&sq("h4")));
    }

    #[test]
    fn display_has_eight_ranks() {
        let board = Board::new();
        let text = board.to_string();
        assert_eq!(9, text.lines().count());
        assert!(text.lines().next().unwrap().contains("r  n  b  q  k  b  n  r"));
    }

    #[test]
    fn arena_full_rejects_new_pieces() {
        let mut board = Board::new();
        let knight = Piece::new(PieceKind::Knight, Color::White);
        for _ in 0..224 {
            board.add_piece(sq("e4"), knight).unwrap();
            board.remove_piece(sq("e4")).unwrap();
        }

        let queen = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(Err(RuleError::PieceLimit), board.add_piece(sq("e4"), queen));
        assert_eq!(None, board.piece_at(sq("e4")));
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::White)),
            board.piece_at(sq("a1"))
        );
        assert_eq!(32, board.piece_count());
    }
}
