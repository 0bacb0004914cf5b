/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use crate::{Board, Color, MoveRecord, PieceKind, Square};

/// Which side of the board a King castles towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the h-file Rook (`O-O`).
    Short,
    /// Towards the a-file Rook (`O-O-O`).
    Long,
}

impl CastleSide {
    /// Both sides, short first.
    #[inline(always)]
    pub const fn all() -> [Self; 2] {
        [Self::Short, Self::Long]
    }

    /// Column the Rook starts on for this side.
    #[inline(always)]
    pub const fn rook_col(&self) -> u8 {
        match self {
            Self::Short => 7,
            Self::Long => 0,
        }
    }

    /// Column the King lands on after castling to this side.
    #[inline(always)]
    pub const fn king_target_col(&self) -> u8 {
        match self {
            Self::Short => 6,
            Self::Long => 2,
        }
    }

    /// Columns strictly between the King and the Rook, which must all be empty.
    #[inline(always)]
    pub const fn between_cols(&self) -> &'static [u8] {
        match self {
            Self::Short => &[5, 6],
            Self::Long => &[1, 2, 3],
        }
    }

    /// Columns the King crosses or lands on, none of which may be attacked.
    #[inline(always)]
    pub const fn king_path_cols(&self) -> [u8; 2] {
        match self {
            Self::Short => [5, 6],
            Self::Long => [3, 2],
        }
    }

    const fn bit(&self, color: Color) -> u8 {
        1 << (color.index() * 2 + *self as usize)
    }
}

/// Column both Kings start on.
pub const KING_START_COL: u8 = 4;

/// Tracks which castling moves each side may still make.
///
/// A right is lost for good once the King or the corresponding Rook leaves its starting square,
/// or once that Rook is captured. Rights are copied into every [`MoveRecord`], so undoing a move restores them.
///
/// Defaults to all four rights being available.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// Every right available.
    pub const ALL: Self = Self(0b1111);

    /// No rights available.
    pub const NONE: Self = Self(0);

    /// Grants exactly the rights whose King and Rook stand on their original squares on `board`.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, CastlingRights};
    /// let board = Board::from_fen("r3k3/8/8/8/8/8/8/4K2R").unwrap();
    /// assert_eq!(CastlingRights::from_board(&board).to_string(), "Kq");
    /// ```
    pub fn from_board(board: &Board) -> Self {
        let mut rights = Self::NONE;

        for color in Color::all() {
            let row = color.back_row();
            let king = Square::from_coords_unchecked(row, KING_START_COL);
            if !board
                .piece_at(king)
                .is_some_and(|p| p.is_king() && p.color() == color)
            {
                continue;
            }

            for side in CastleSide::all() {
                let corner = Square::from_coords_unchecked(row, side.rook_col());
                if board
                    .piece_at(corner)
                    .is_some_and(|p| p.is_rook() && p.color() == color)
                {
                    rights.grant(color, side);
                }
            }
        }

        rights
    }

    /// Returns `true` if `color` still has the right to castle towards `side`.
    #[inline(always)]
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.0 & side.bit(color) != 0
    }

    /// Returns `true` if `color` has any castling right left.
    #[inline(always)]
    pub const fn has_any(&self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Short) || self.can_castle(color, CastleSide::Long)
    }

    #[inline(always)]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= side.bit(color);
    }

    #[inline(always)]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !side.bit(color);
    }

    /// Removes both of `color`'s rights.
    #[inline(always)]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::Short);
        self.revoke(color, CastleSide::Long);
    }

    /// Revokes whatever rights `record` makes impossible.
    pub fn update_for(&mut self, record: &MoveRecord) {
        let mover = record.piece();
        let from = record.from();

        match mover.kind() {
            PieceKind::King => self.revoke_all(mover.color()),
            PieceKind::Rook => self.revoke_corner(mover.color(), from),
            _ => {}
        }

        if let Some(captured) = record.captured() {
            if captured.is_rook() {
                self.revoke_corner(captured.color(), record.capture_square());
            }
        }
    }

    /// Revokes `color`'s right tied to `square`, if `square` is one of its Rook corners.
    fn revoke_corner(&mut self, color: Color, square: Square) {
        if square.row() != color.back_row() {
            return;
        }

        for side in CastleSide::all() {
            if square.col() == side.rook_col() {
                self.revoke(color, side);
            }
        }
    }
}

impl Default for CastlingRights {
    #[inline(always)]
    fn default() -> Self {
        Self::ALL
    }
}

impl FromStr for CastlingRights {
    type Err = anyhow::Error;
    /// Parses the castling field of a FEN string, such as `KQkq`, `Kq`, or `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rights = Self::NONE;
        if s == "-" {
            return Ok(rights);
        }

        for c in s.chars() {
            match c {
                'K' => rights.grant(Color::White, CastleSide::Short),
                'Q' => rights.grant(Color::White, CastleSide::Long),
                'k' => rights.grant(Color::Black, CastleSide::Short),
                'q' => rights.grant(Color::Black, CastleSide::Long),
                _ => bail!("Invalid castling rights {s:?}: expected some of \"KQkq\" or \"-\""),
            }
        }

        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// Formats the rights like the castling field of a FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return write!(f, "-");
        }

        let flags = [
            (Color::White, CastleSide::Short, 'K'),
            (Color::White, CastleSide::Long, 'Q'),
            (Color::Black, CastleSide::Short, 'k'),
            (Color::Black, CastleSide::Long, 'q'),
        ];

        for (color, side, c) in flags {
            if self.can_castle(color, side) {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({self})")
    }
}
