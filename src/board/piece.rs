/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Neg, str::FromStr};

use anyhow::{bail, Result};

/// Represents the color of a player or piece.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use tempo::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`: `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Row delta of a single pawn step for this color.
    ///
    /// White moves "up" the board (towards row `0`), Black moves "down".
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The row holding this color's King and Rooks at the start of the game.
    #[inline(always)]
    pub const fn back_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The row holding this color's Pawns at the start of the game.
    #[inline(always)]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The row on which this color's Pawns promote, which is the opponent's back row.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        self.opponent().back_row()
    }

    /// Code used by collaborators that speak the numeric piece encoding: `1` for White, `2` for Black.
    #[inline(always)]
    pub const fn code(&self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => 2,
        }
    }

    /// Creates a [`Color`] from a `char`, `w` or `b` (case-insensitive).
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color}"),
        }
    }

    /// Converts this [`Color`] to `w` or `b`.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use tempo::Color;
    /// assert_eq!(Color::Black.name(), "black");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    /// Accepts `w`/`b` as well as the full names `white`/`black`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            _ if s.len() == 1 => Self::from_char(s.as_bytes()[0] as char),
            _ => bail!("Invalid str for Color: Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The order of pieces on each back rank, from column `0` to column `7`.
    pub const BACK_RANK: [Self; 8] = {
        use PieceKind::*;
        [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
    };

    /// Numeric code of this [`PieceKind`].
    ///
    /// Note that Rook precedes Bishop in this encoding: `1` Pawn, `2` Knight, `3` Rook, `4` Bishop, `5` Queen, `6` King.
    /// `0` is reserved for "no piece".
    #[inline(always)]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 2,
            Self::Rook => 3,
            Self::Bishop => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }

    /// Creates a [`PieceKind`] from its letter, in either case.
    ///
    /// # Example
    /// ```
    /// # use tempo::PieceKind;
    /// assert_eq!(PieceKind::from_char('n').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// Converts this [`PieceKind`] to a lowercase letter.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Uppercase letter used in move notation. Pawns have none.
    #[inline(always)]
    pub const fn notation(&self) -> Option<char> {
        match self {
            Self::Pawn => None,
            _ => Some(self.to_char().to_ascii_uppercase()),
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decorative style a piece is drawn in. Never affects the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Theme {
    #[default]
    Default,
    Wood,
}

impl Theme {
    /// Numeric code of this [`Theme`]: `0` for Default, `1` for Wood.
    #[inline(always)]
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    /// Fetches a human-readable name for this [`Theme`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Wood => "wood",
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "standard" => Ok(Self::Default),
            "wood" => Ok(Self::Wood),
            _ => bail!("Invalid str for Theme: Got {s:?}"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a chess piece on the game board.
///
/// An empty square is `Option::<Piece>::None`, so a [`Piece`] always has both a kind and a color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    theme: Theme,
}

impl Piece {
    /// Creates a new [`Piece`] drawn in the default [`Theme`].
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Piece, PieceKind, Theme};
    /// let knight = Piece::new(Color::White, PieceKind::Knight);
    /// assert_eq!(knight.theme(), Theme::Default);
    /// assert_eq!(knight.to_string(), "N");
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self::with_theme(color, kind, Theme::Default)
    }

    /// Creates a new [`Piece`] drawn in the provided [`Theme`].
    #[inline(always)]
    pub const fn with_theme(color: Color, kind: PieceKind, theme: Theme) -> Self {
        Self { color, kind, theme }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a copy of this [`Piece`] with its kind replaced by `promotion`, keeping color and theme.
    #[inline(always)]
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::with_theme(self.color, promotion, self.theme)
    }

    /// Creates a [`Piece`] from a character, uppercase for White and lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Piece, PieceKind};
    /// let piece = Piece::from_char('q').unwrap();
    /// assert_eq!(piece, Piece::new(Color::Black, PieceKind::Queen));
    /// ```
    #[inline(always)]
    pub fn from_char(piece: char) -> Result<Self> {
        let kind = PieceKind::from_char(piece)?;
        let color = if piece.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }

    /// Converts this [`Piece`] to a character, uppercase for White and lowercase for Black.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Fetches a human-readable name for this [`Piece`], such as `"white knight"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;
    /// Does the same as [`Piece::from_char`], but only if `s` is one character in length.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            bail!("Invalid str for Piece: Must be a str of len 1. Got {s:?}");
        }

        Self::from_char(s.as_bytes()[0] as char)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({}, {})", self.name(), self.to_char(), self.theme)
    }
}

/// A piece in the numeric encoding used by rendering collaborators.
///
/// `kind`: `0` none, `1` pawn, `2` knight, `3` rook, `4` bishop, `5` queen, `6` king.
/// `color`: `0` none, `1` white, `2` black.
/// `theme`: `0` default, `1` wood.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawPiece {
    pub kind: i32,
    pub color: i32,
    pub theme: i32,
}

impl RawPiece {
    /// The encoding of an empty square.
    pub const EMPTY: Self = Self {
        kind: 0,
        color: 0,
        theme: 0,
    };

    /// Validates every field and converts into a [`Piece`], or `None` for the empty encoding.
    ///
    /// Fails if any field is outside its domain, or if exactly one of `kind` and `color` is "none".
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Piece, PieceKind, RawPiece};
    /// let rook = RawPiece { kind: 3, color: 2, theme: 0 };
    /// assert_eq!(rook.to_piece().unwrap(), Some(Piece::new(Color::Black, PieceKind::Rook)));
    ///
    /// assert_eq!(RawPiece::EMPTY.to_piece().unwrap(), None);
    /// assert!(RawPiece { kind: 7, color: 1, theme: 0 }.to_piece().is_err());
    /// assert!(RawPiece { kind: 1, color: 0, theme: 0 }.to_piece().is_err());
    /// ```
    pub fn to_piece(self) -> Result<Option<Piece>> {
        let kind = match self.kind {
            0 => None,
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Bishop),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            k => bail!("Invalid piece kind code {k}: must be between [0,6]"),
        };

        let color = match self.color {
            0 => None,
            1 => Some(Color::White),
            2 => Some(Color::Black),
            c => bail!("Invalid color code {c}: must be 0, 1, or 2"),
        };

        let theme = match self.theme {
            0 => Theme::Default,
            1 => Theme::Wood,
            t => bail!("Invalid theme code {t}: must be 0 or 1"),
        };

        match (kind, color) {
            (None, None) => Ok(None),
            (Some(kind), Some(color)) => Ok(Some(Piece::with_theme(color, kind, theme))),
            _ => bail!(
                "Invalid piece codes {self:?}: kind and color must both be set or both be none"
            ),
        }
    }
}

impl From<Option<Piece>> for RawPiece {
    fn from(piece: Option<Piece>) -> Self {
        match piece {
            Some(piece) => Self {
                kind: piece.kind().code(),
                color: piece.color().code(),
                theme: piece.theme().code(),
            },
            None => Self::EMPTY,
        }
    }
}
