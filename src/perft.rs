// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;

/// Counts the legal move paths of length `depth` from `board`, with the
/// side to move moving first.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = board.clone();
    let moves = root.legal_moves(board.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut next = board.clone();
            match next.apply_move(mov) {
                Ok(()) => perft(&next, depth - 1),
                Err(err) => {
                    debug_assert!(false, "generated move {} rejected: {}", mov, err);
                    0
                }
            }
        })
        .sum()
}
