/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Represents a single square on an `8x8` chess board.
///
/// Squares are addressed by `(row, col)`, with row `0` being Black's back rank and row `7` being White's back rank,
/// so the board is oriented with White at the bottom, the way it is drawn on screen.
///
/// Internally stored as `row * 8 + col`:
/// ```text
/// 8| 0  1  2  3  4  5  6  7     <- row 0
/// 7| 8  9 10 11 12 13 14 15
/// 6|16 17 18 19 20 21 22 23
/// 5|24 25 26 27 28 29 30 31
/// 4|32 33 34 35 36 37 38 39
/// 3|40 41 42 43 44 45 46 47
/// 2|48 49 50 51 52 53 54 55
/// 1|56 57 58 59 60 61 62 63     <- row 7
///  +-----------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    /// Largest valid row or column value.
    const MAX: u8 = BOARD_SIZE as u8 - 1;

    /// Creates a [`Square`] from a pair of signed coordinates, if both lie on the board.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert!(Square::new(7, 4).is_some());
    /// assert!(Square::new(-1, 4).is_none());
    /// assert!(Square::new(3, 8).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(row: i32, col: i32) -> Option<Self> {
        if row < 0 || col < 0 || row > Self::MAX as i32 || col > Self::MAX as i32 {
            return None;
        }

        Some(Self::from_coords_unchecked(row as u8, col as u8))
    }

    /// Creates a [`Square`] from a pair of signed coordinates, returning an error if either is off the board.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// let e1 = Square::from_coords(7, 4).unwrap();
    /// assert_eq!(e1.to_string(), "e1");
    ///
    /// assert!(Square::from_coords(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn from_coords(row: i32, col: i32) -> Result<Self> {
        match Self::new(row, col) {
            Some(square) => Ok(square),
            None => bail!("Invalid coordinates for Square: ({row}, {col}) is not on the board"),
        }
    }

    /// Creates a [`Square`] from a row and column without bounds checking.
    ///
    /// # Panics
    /// If `row` or `col` is greater than `7` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_coords_unchecked(row: u8, col: u8) -> Self {
        debug_assert!(
            row <= Self::MAX && col <= Self::MAX,
            "Invalid coordinates for Square: row and col must be between [0,7]"
        );

        Self(row * BOARD_SIZE as u8 + col)
    }

    /// Returns an iterator over all 64 squares, starting at `(0, 0)` (a8) and proceeding row by row.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// The row of this [`Square`], `[0,7]`, where row `0` is Black's back rank.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    /// The column of this [`Square`], `[0,7]`, where column `0` is the a-file.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// Returns `(row, col)`.
    #[inline(always)]
    pub const fn coords(&self) -> (u8, u8) {
        (self.row(), self.col())
    }

    /// Returns this [`Square`] as a `usize`, useful for indexing into lists of 64 elements.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts this [`Square`] by `row_delta` rows and `col_delta` columns.
    ///
    /// Returns [`None`] if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// let e2 = Square::from_coords(6, 4).unwrap();
    /// assert_eq!(e2.offset(-2, 0), Square::new(4, 4));
    /// assert_eq!(e2.offset(2, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        Self::new(
            self.row() as i32 + row_delta as i32,
            self.col() as i32 + col_delta as i32,
        )
    }

    /// Absolute number of rows between `self` and `other`.
    #[inline(always)]
    pub const fn distance_rows(&self, other: Self) -> u8 {
        self.row().abs_diff(other.row())
    }

    /// Absolute number of columns between `self` and `other`.
    #[inline(always)]
    pub const fn distance_cols(&self, other: Self) -> u8 {
        self.col().abs_diff(other.col())
    }

    /// The file letter of this [`Square`], `'a'..='h'`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// The rank digit of this [`Square`], `'1'..='8'`. Row `7` is rank `1`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'1' + Self::MAX - self.row()) as char
    }

    /// Parses a [`Square`] from its algebraic name, such as `e4`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// let e4 = Square::from_algebraic("e4").unwrap();
    /// assert_eq!(e4.coords(), (4, 4));
    ///
    /// assert!(Square::from_algebraic("z9").is_err());
    /// ```
    pub fn from_algebraic(s: &str) -> Result<Self> {
        let &[file, rank] = s.as_bytes() else {
            bail!("Invalid str for Square: Must be a str of len 2. Got {s:?}");
        };

        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            bail!("Invalid str for Square: {s:?} is not a square between a1 and h8");
        }

        let col = file - b'a';
        let row = Self::MAX - (rank - b'1');
        Ok(Self::from_coords_unchecked(row, col))
    }

    /// Converts this [`Square`] to its algebraic name, such as `e4`.
    #[inline(always)]
    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    /// Displays the algebraic name along with the `(row, col)` coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // The four corners
        assert_eq!(Square::from_coords(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Square::from_coords(0, 7).unwrap().to_string(), "h8");
        assert_eq!(Square::from_coords(7, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::from_coords(7, 7).unwrap().to_string(), "h1");

        // And the kings' starting squares
        assert_eq!(Square::from_coords(7, 4).unwrap().to_string(), "e1");
        assert_eq!(Square::from_coords(0, 4).unwrap().to_string(), "e8");
    }

    #[test]
    fn test_out_of_bounds() {
        for (row, col) in [(-1, 0), (0, -1), (8, 0), (0, 8), (i32::MIN, i32::MAX)] {
            assert!(Square::new(row, col).is_none(), "({row}, {col})");
            assert!(Square::from_coords(row, col).is_err(), "({row}, {col})");
        }
    }

    #[test]
    fn test_parsing() {
        for square in Square::iter() {
            let parsed: Square = square.to_string().parse().unwrap();
            assert_eq!(parsed, square);
        }

        assert_eq!("E2".parse::<Square>().unwrap().coords(), (6, 4));
        assert!("e".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset() {
        let a8 = Square::from_coords_unchecked(0, 0);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 2), Some(Square::from_coords_unchecked(1, 2)));

        let h1 = Square::from_coords_unchecked(7, 7);
        assert_eq!(h1.offset(1, 0), None);
        assert_eq!(h1.offset(-7, -7), Some(a8));
    }
}
