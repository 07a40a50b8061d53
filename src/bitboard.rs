// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, which is conceptually a set of
//! squares on the chess board. The piece catalog in `attacks` answers
//! every reachability query with a bitboard, and the board uses them for
//! occupancy and "squares between" tests.
//!
//! A bitboard is a single 64-bit integer and it behaves like a set, using
//! bitwise operations for the normal set operations.
use std::default::Default;
use std::fmt;
use std::iter::Iterator;
use std::ops;

use crate::types::{self, Square};

/// A Bitboard is a 64-bit integer in which one bit represents one of the
/// sixty-four squares on the board.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Bitboard {
    bits: u64,
}

impl Default for Bitboard {
    fn default() -> Bitboard {
        Bitboard::none()
    }
}

impl Bitboard {
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    /// Tests whether or not a square is a member of this bitboard.
    pub fn test(self, square: Square) -> bool {
        (self.bits & (1u64 << square.index())) != 0
    }

    /// Sets a square to be a member of this bitboard.
    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << square.index();
    }

    /// Removes a square from this bitboard.
    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << square.index());
    }

    /// Set intersection.
    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    /// Set union.
    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self.bits)
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                if self.test(Square::of(rank, file)) {
                    write!(f, " 1 ")?
                } else {
                    write!(f, " . ")?
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for file in &types::FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

/// BitboardIterator is an iterator over squares that are set in a
/// given bitboard, in ascending square order.
pub struct BitboardIterator {
    bits: u64,
}

impl BitboardIterator {
    fn new(bits: u64) -> BitboardIterator {
        BitboardIterator { bits }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(Square::from_index(next as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

impl std::iter::FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut board = Bitboard::none();
        for sq in iter {
            board.set(sq);
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn smoke_test() {
        let mut board = Bitboard::default();
        assert!(!board.test(sq("a1")));

        board.set(sq("a1"));
        assert!(board.test(sq("a1")));
    }

    #[test]
    fn union_and_intersection() {
        let one: Bitboard = vec![sq("a2"), sq("b2")].into_iter().collect();
        let two: Bitboard = vec![sq("a2"), sq("c2")].into_iter().collect();

        let both = one & two;
        assert!(both.test(sq("a2")));
        assert!(!both.test(sq("b2")));

        let either = one | two;
        assert_eq!(3, either.count());
    }

    #[test]
    fn enumerating_is_ordered() {
        let board: Bitboard = vec![sq("h8"), sq("b2"), sq("a2")].into_iter().collect();
        let squares: Vec<_> = board.iter().collect();
        assert_eq!(vec![sq("a2"), sq("b2"), sq("h8")], squares);
    }

    #[test]
    fn unset() {
        let mut board = Bitboard::none();
        board.set(sq("h2"));
        board.unset(sq("h2"));
        assert!(board.empty());
        assert_eq!(None, board.first());
    }
}
