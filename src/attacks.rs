// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The piece catalog: raw reachability for every piece kind. Everything in
//! this module is board-independent; it answers "where could this piece
//! go from here on an empty board", never consulting occupancy.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, Piece, PieceKind, Square, TableIndex};
use crate::types::{COLORS, DIRECTIONS};

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// Precomputed single-step reach for pieces that jump or step (kings and
/// knights). Off-board offsets are filtered out while building the table.
struct StepTable {
    table: [Bitboard; 64],
}

impl StepTable {
    fn new(steps: &[(i8, i8)]) -> StepTable {
        let mut st = StepTable {
            table: [Bitboard::none(); 64],
        };

        for sq in Square::all() {
            st.table[sq.index()] = steps
                .iter()
                .filter_map(|&(files, ranks)| sq.offset(files, ranks))
                .collect();
        }

        st
    }

    fn moves(&self, sq: Square) -> Bitboard {
        self.table[sq.index()]
    }
}

struct PawnTable {
    pushes: [[Bitboard; 2]; 64],
    captures: [[Bitboard; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            pushes: [[Bitboard::none(); 2]; 64],
            captures: [[Bitboard::none(); 2]; 64],
        };

        for sq in Square::all() {
            for &color in COLORS.iter() {
                let forward = color.forward();
                let mut pushes = Bitboard::none();
                if let Some(one) = sq.offset(0, forward) {
                    pushes.set(one);
                    if sq.rank() == color.pawn_rank() {
                        if let Some(two) = sq.offset(0, 2 * forward) {
                            pushes.set(two);
                        }
                    }
                }

                let captures: Bitboard = [-1, 1]
                    .iter()
                    .filter_map(|&files| sq.offset(files, forward))
                    .collect();

                pt.pushes[sq.index()][color.as_index()] = pushes;
                pt.captures[sq.index()][color.as_index()] = captures;
            }
        }

        pt
    }
}

/// Rays in each of the eight directions, running from (but excluding) a
/// square to the edge of the board.
struct RayTable {
    table: [[Bitboard; 8]; 64],
}

impl RayTable {
    fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[Bitboard::none(); 8]; 64],
        };

        for sq in Square::all() {
            for &dir in DIRECTIONS.iter() {
                let mut entry = Bitboard::none();
                let mut cursor = sq.towards(dir);
                while let Some(next) = cursor {
                    entry.set(next);
                    cursor = next.towards(dir);
                }
                rt.table[sq.index()][dir.as_index()] = entry;
            }
        }

        rt
    }

    fn ray(&self, sq: Square, dir: Direction) -> Bitboard {
        self.table[sq.index()][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: StepTable = StepTable::new(&KING_STEPS);
    static ref KNIGHT_TABLE: StepTable = StepTable::new(&KNIGHT_STEPS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

/// Forward squares for a pawn: one step, plus two steps from the starting
/// rank.
pub fn pawn_pushes(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.pushes[sq.index()][color.as_index()]
}

/// The diagonal-forward squares a pawn captures on.
pub fn pawn_captures(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.captures[sq.index()][color.as_index()]
}

pub fn knight_moves(sq: Square) -> Bitboard {
    KNIGHT_TABLE.moves(sq)
}

pub fn king_moves(sq: Square) -> Bitboard {
    KING_TABLE.moves(sq)
}

pub fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAY_TABLE.ray(sq, dir)
}

pub fn bishop_moves(sq: Square) -> Bitboard {
    DIRECTIONS
        .iter()
        .filter(|dir| dir.is_diagonal())
        .fold(Bitboard::none(), |acc, &dir| acc | ray(sq, dir))
}

pub fn rook_moves(sq: Square) -> Bitboard {
    DIRECTIONS
        .iter()
        .filter(|dir| !dir.is_diagonal())
        .fold(Bitboard::none(), |acc, &dir| acc | ray(sq, dir))
}

pub fn queen_moves(sq: Square) -> Bitboard {
    bishop_moves(sq) | rook_moves(sq)
}

/// Every square the given piece could move to from `sq` on an empty board.
/// Pawn captures are included; whether a capture is actually possible is
/// up to the legality evaluator.
pub fn reachable_squares(piece: Piece, sq: Square) -> Bitboard {
    match piece.kind {
        PieceKind::Pawn => pawn_pushes(sq, piece.color) | pawn_captures(sq, piece.color),
        PieceKind::Knight => knight_moves(sq),
        PieceKind::Bishop => bishop_moves(sq),
        PieceKind::Rook => rook_moves(sq),
        PieceKind::Queen => queen_moves(sq),
        PieceKind::King => king_moves(sq),
    }
}

/// The squares a piece threatens from `sq` on an empty board. This is the
/// raw reach with pawn pushes removed, since a pawn never attacks the
/// square straight ahead of it.
pub fn attack_squares(piece: Piece, sq: Square) -> Bitboard {
    match piece.kind {
        PieceKind::Pawn => pawn_captures(sq, piece.color),
        _ => reachable_squares(piece, sq),
    }
}

/// The direction of a straight line (rank, file or diagonal) from `from`
/// to `to`, or `None` if the two squares are not aligned.
pub fn line_direction(from: Square, to: Square) -> Option<Direction> {
    let files = to.file_index() - from.file_index();
    let ranks = to.rank_index() - from.rank_index();
    if files == 0 && ranks == 0 {
        return None;
    }

    if files != 0 && ranks != 0 && files.abs() != ranks.abs() {
        return None;
    }

    Direction::from_vector(files.signum(), ranks.signum())
}

/// The squares strictly between `from` and `to` along their shared line.
/// Empty if the squares are adjacent or not aligned.
pub fn between(from: Square, to: Square) -> Bitboard {
    let dir = match line_direction(from, to) {
        Some(dir) => dir,
        None => return Bitboard::none(),
    };

    let mut squares = Bitboard::none();
    let mut cursor = from.towards(dir);
    while let Some(sq) = cursor {
        if sq == to {
            break;
        }
        squares.set(sq);
        cursor = sq.towards(dir);
    }

    squares
}
