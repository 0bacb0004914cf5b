/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, Not},
};

use super::{Square, BOARD_SIZE};

/// A set of squares, stored as one bit per square.
///
/// This is the boolean `8x8` mask handed out as "legal destinations" for a selected piece,
/// and the scratch space that move generation writes into.
///
/// Bit `i` corresponds to the [`Square`] with index `i`, so bit `0` is a8 (row `0`, column `0`)
/// and bit `63` is h1 (row `7`, column `7`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0);
    pub const FULL_BOARD: Self = Self(u64::MAX);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a [`Bitboard`] with only the bit for `square` set.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Bitboard, Square};
    /// let e4 = Square::from_coords(4, 4).unwrap();
    /// let mask = Bitboard::from_square(e4);
    /// assert!(mask.contains(e4));
    /// assert_eq!(mask.population(), 1);
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.0)
    }

    /// Constructs a [`Bitboard`] from an `8x8` grid of booleans, indexed `[row][col]`.
    pub fn from_grid(grid: &[[bool; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Square::iter()
            .filter(|sq| grid[sq.row() as usize][sq.col() as usize])
            .collect()
    }

    /// Converts this [`Bitboard`] into an `8x8` grid of booleans, indexed `[row][col]`.
    ///
    /// This is the shape rendering collaborators use to highlight squares.
    pub fn to_grid(&self) -> [[bool; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[false; BOARD_SIZE]; BOARD_SIZE];
        for square in self.iter() {
            grid[square.row() as usize][square.col() as usize] = true;
        }
        grid
    }

    /// Returns the inner `u64` of this [`Bitboard`].
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Returns `true` if no squares are set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one square is set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `square` is set.
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1 << square.0) != 0
    }

    /// Sets the bit(s) at the location(s) specified by `other` to `1` (on).
    ///
    /// # Example
    /// ```
    /// # use tempo::{Bitboard, Square};
    /// let mut mask = Bitboard::EMPTY_BOARD;
    /// mask.set(Square::from_coords(0, 1).unwrap());
    /// assert_eq!(mask.inner(), 0b10);
    /// ```
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        *self |= other.into()
    }

    /// Clears the bit(s) at the location(s) specified by `other` to `0` (off).
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        *self &= !other.into()
    }

    /// Turns every bit off.
    #[inline(always)]
    pub fn clear_all(&mut self) {
        *self = Self::EMPTY_BOARD;
    }

    /// Number of squares set.
    #[inline(always)]
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the lowest set square, if any.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        self.is_nonempty()
            .then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// Pops and returns the lowest set square, if any.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.0 &= self.0.wrapping_sub(1);
        lsb
    }

    /// Returns a [`BitboardIter`] to iterate over all of the set bits as [`Square`]s.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl Index<Square> for Bitboard {
    type Output = bool;

    /// Wrapper over [`Bitboard::contains`].
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        if self.contains(index) {
            &true
        } else {
            &false
        }
    }
}

impl From<Square> for Bitboard {
    /// Wrapper for [`Bitboard::from_square`].
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<u64> for Bitboard {
    /// Wrapper for [`Bitboard::new`].
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    /// Prints the mask with row `0` on top, `X` for set squares and `.` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(136);

        for square in Square::iter() {
            board.push(if self.contains(square) { 'X' } else { '.' });
            board.push(' ');
            if square.col() as usize == BOARD_SIZE - 1 {
                board.push('\n');
            }
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    /// Same as [`fmt::Display`], but with rank and file labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for square in Square::iter() {
            if square.col() == 0 {
                board += &format!("{}| ", square.rank_char());
            }
            board.push(if self.contains(square) { 'X' } else { '.' });
            board.push(' ');
            if square.col() as usize == BOARD_SIZE - 1 {
                board.push('\n');
            }
        }
        board += " +";
        board += &"--".repeat(BOARD_SIZE);
        board += "\n   ";
        for file in 'a'..='h' {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

/// An iterator over all set bits in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bitboard.population() as usize
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: *self }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bitboard_to_string() {
        let mask: Bitboard = (0..8)
            .map(|i| Square::from_coords_unchecked(i, i))
            .collect();
        let expected = "X . . . . . . . \n\
                        . X . . . . . . \n\
                        . . X . . . . . \n\
                        . . . X . . . . \n\
                        . . . . X . . . \n\
                        . . . . . X . . \n\
                        . . . . . . X . \n\
                        . . . . . . . X \n";
        assert_eq!(mask.to_string(), expected);

        let second_row: Bitboard = (0..8).map(|c| Square::from_coords_unchecked(1, c)).collect();
        let expected = ". . . . . . . . \n\
                        X X X X X X X X \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n";
        assert_eq!(second_row.to_string(), expected);
    }

    #[test]
    fn test_bitboard_grid() {
        let e4 = Square::from_coords_unchecked(4, 4);
        let h8 = Square::from_coords_unchecked(0, 7);
        let mask = Bitboard::from_square(e4) | h8;

        let grid = mask.to_grid();
        assert!(grid[4][4]);
        assert!(grid[0][7]);
        assert_eq!(grid.iter().flatten().filter(|b| **b).count(), 2);
        assert_eq!(Bitboard::from_grid(&grid), mask);
    }

    #[test]
    fn test_bitboard_set_clear() {
        let a8 = Square::from_coords_unchecked(0, 0);
        let mut mask = Bitboard::EMPTY_BOARD;
        mask.set(a8);
        assert!(mask[a8]);
        mask.clear(a8);
        assert!(!mask[a8]);
        assert!(mask.is_empty());

        mask = Bitboard::FULL_BOARD;
        assert_eq!(mask.iter().len(), Square::COUNT);
        mask.clear_all();
        assert_eq!(mask, Bitboard::default());
    }
}
