// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;

use rookery::{Board, Color, MoveFlags, Piece, PieceKind, RuleError, Square};

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn board_with(pieces: &[(&str, char)]) -> Board {
    let mut board = Board::empty();
    for &(text, chr) in pieces {
        board
            .add_piece(sq(text), Piece::try_from(chr).unwrap())
            .unwrap();
    }
    board
}

#[test]
fn en_passant_capture() {
    let mut board = Board::new();
    board.play_sequence("a2a4,a7a6,a4a5,b7b5,a5b6").unwrap();
    assert_eq!(None, board.piece_at(sq("b5")));
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        board.piece_at(sq("b6"))
    );
    assert_eq!(31, board.piece_count());

    let last = *board.last_move().unwrap();
    assert!(last.is_en_passant());
    assert!(last.flags.contains(MoveFlags::CAPTURE));
    assert_eq!(sq("b5"), last.captured.unwrap().square);

    board.undo_move().unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        board.piece_at(sq("b5"))
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        board.piece_at(sq("a5"))
    );
    assert_eq!(None, board.piece_at(sq("b6")));
}

#[test]
fn en_passant_only_immediately() {
    let mut board = Board::new();
    board
        .play_sequence("e2e4,a7a6,e4e5,d7d5,h2h3,h7h6")
        .unwrap();
    assert_eq!(
        Err(RuleError::InvalidPieceMove),
        board.move_by_location("e5", "d6")
    );
}

#[test]
fn en_passant_needs_double_step() {
    let mut board = Board::new();
    board.play_sequence("e2e4,d7d6,e4e5,a7a6").unwrap();
    board.move_by_location("h2", "h3").unwrap();
    board.move_by_location("d6", "d5").unwrap();
    assert_eq!(
        Err(RuleError::InvalidPieceMove),
        board.move_by_location("e5", "d6")
    );
}

#[test]
fn en_passant_from_wrong_rank() {
    // The white pawn sits beside the square the black pawn skipped, not
    // beside the pawn itself.
    let mut board = board_with(&[("e1", 'K'), ("h8", 'k'), ("a6", 'P'), ("b7", 'p')]);
    board.set_side_to_move(Color::Black);
    board.move_by_location("b7", "b5").unwrap();
    let before = board.to_string();

    assert_eq!(
        Err(RuleError::InvalidPieceMove),
        board.move_by_location("a6", "b7")
    );
    assert_eq!(before, board.to_string());
    assert_eq!("b7b5", board.history());
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        board.piece_at(sq("b5"))
    );
    assert_eq!(Color::White, board.side_to_move());
}

#[test]
fn en_passant_cannot_expose_king_on_rank() {
    // Both pawns leave the fifth rank, opening it for the rook.
    let mut board = board_with(&[("a5", 'K'), ("b5", 'P'), ("h5", 'r'), ("h8", 'k'), ("c7", 'p')]);
    board.set_side_to_move(Color::Black);
    board.move_by_location("c7", "c5").unwrap();
    assert!(!board.is_check(Color::White));
    assert_eq!(
        Err(RuleError::MovingIntoCheck),
        board.move_by_location("b5", "c6")
    );
    board.move_by_location("b5", "b6").unwrap();
}

#[test]
fn castle_queenside() {
    let mut board = Board::new();
    board
        .play_sequence("d2d4,d7d5,c1f4,c8f5,b1c3,b8c6,d1d2,d8d7,e1c1")
        .unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::King, Color::White)),
        board.piece_at(sq("c1"))
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        board.piece_at(sq("d1"))
    );
    assert_eq!(None, board.piece_at(sq("a1")));
    assert_eq!(None, board.piece_at(sq("e1")));
    assert!(board.last_move().unwrap().is_castle());
    assert_eq!(Some(sq("c1")), board.king_square(Color::White));

    board.move_by_location("e8", "c8").unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::Black)),
        board.piece_at(sq("d8"))
    );

    board.undo_move().unwrap();
    board.undo_move().unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        board.piece_at(sq("a1"))
    );
    assert_eq!(Some(sq("e1")), board.king_square(Color::White));
    let rook = board.piece_id_at(sq("a1")).unwrap();
    assert_eq!(0, board.move_count(rook));
}

#[test]
fn castle_after_rook_moved() {
    let mut board = Board::new();
    board
        .play_sequence("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,h1g1,a7a6,g1h1,a6a5")
        .unwrap();
    assert_eq!(
        Err(RuleError::KingOrRookMoved),
        board.move_by_location("e1", "g1")
    );
}

#[test]
fn castle_after_king_moved() {
    let mut board = Board::new();
    board
        .play_sequence("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,e1e2,a7a6,e2e1,a6a5")
        .unwrap();
    assert_eq!(
        Err(RuleError::KingOrRookMoved),
        board.move_by_location("e1", "g1")
    );
}

#[test]
fn castle_with_pieces_between() {
    let mut board = Board::new();
    assert_eq!(
        Err(RuleError::CastleWithPieceBetween),
        board.move_by_location("e1", "g1")
    );
    assert_eq!(
        Err(RuleError::CastleWithPieceBetween),
        board.move_by_location("e1", "c1")
    );
}

#[test]
fn castle_through_check() {
    let mut board = board_with(&[("e1", 'K'), ("h1", 'R'), ("e8", 'k'), ("f8", 'r')]);
    assert_eq!(
        Err(RuleError::CastleMoveThroughCheck),
        board.move_by_location("e1", "g1")
    );
}

#[test]
fn castle_out_of_check() {
    let mut board = board_with(&[("e1", 'K'), ("h1", 'R'), ("a8", 'k'), ("e8", 'r')]);
    assert_eq!(
        Err(RuleError::CastleWithKingInCheck),
        board.move_by_location("e1", "g1")
    );
}

#[test]
fn castle_without_rook() {
    let mut board = board_with(&[("e1", 'K'), ("a1", 'R'), ("e8", 'k')]);
    assert_eq!(
        Err(RuleError::NoRookToCastleWith),
        board.move_by_location("e1", "g1")
    );
    board.move_by_location("e1", "c1").unwrap();
}
