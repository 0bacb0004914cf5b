/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::{Color, Piece, PieceKind, RawPiece, Square, Table, Theme, BOARD_SIZE};

/// Piece placements of the standard starting position, in FEN order (row `0` first).
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of turns, castling rights, or history; see [`crate::Game`] for those.
/// The only mutations are writes of a single square, each validated before anything is changed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board(Table<Option<Piece>>);

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use tempo::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self(Table::splat(None))
    }

    /// Creates a [`Board`] holding the standard starting position in the default theme.
    #[inline(always)]
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.standard_setup();
        board
    }

    /// Places the canonical 32-piece starting arrangement, White on rows `6` and `7`.
    ///
    /// Every other square is emptied.
    ///
    /// # Example
    /// ```
    /// # use tempo::Board;
    /// let mut board = Board::new();
    /// board.standard_setup();
    /// assert_eq!(board.to_fen(), tempo::FEN_STARTPOS);
    /// ```
    #[inline(always)]
    pub fn standard_setup(&mut self) {
        self.standard_setup_with_theme(Theme::Default);
    }

    /// Same as [`Board::standard_setup`], but every piece is drawn in `theme`.
    pub fn standard_setup_with_theme(&mut self, theme: Theme) {
        self.clear_all();

        for color in Color::all() {
            let back = color.back_row();
            let pawns = color.pawn_row();

            for (col, kind) in PieceKind::BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                self.place(
                    Square::from_coords_unchecked(back, col),
                    Piece::with_theme(color, kind, theme),
                );
                self.place(
                    Square::from_coords_unchecked(pawns, col),
                    Piece::with_theme(color, PieceKind::Pawn, theme),
                );
            }
        }
    }

    /// Constructs a [`Board`] from the piece-placement field of a FEN string.
    ///
    /// Anything after the first space is ignored. The first rank listed is row `0`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        let placements = fen.split(' ').next().unwrap_or_default();

        if placements.matches('/').count() != BOARD_SIZE - 1 {
            bail!("FEN must have piece placements for all 8 ranks. Got {placements:?}");
        }

        for (row, rank) in placements.split('/').enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(empty) = c.to_digit(10) {
                    col += empty as usize;
                } else {
                    let piece = Piece::from_char(c)
                        .with_context(|| format!("Invalid FEN placement {placements:?}"))?;
                    let square = Square::from_coords(row as i32, col as i32)
                        .with_context(|| format!("Rank {rank:?} has too many squares"))?;
                    board.place(square, piece);
                    col += 1;
                }
            }

            if col != BOARD_SIZE {
                bail!("Rank {rank:?} of FEN {placements:?} does not describe 8 squares");
            }
        }

        Ok(board)
    }

    /// Generates the piece-placement field of a FEN string for this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(64);
        let mut empty = 0;

        for (square, piece) in self.0.iter() {
            if let Some(piece) = piece {
                if empty > 0 {
                    fen += &empty.to_string();
                    empty = 0;
                }
                fen.push(piece.to_char());
            } else {
                empty += 1;
            }

            if square.col() as usize == BOARD_SIZE - 1 {
                if empty > 0 {
                    fen += &empty.to_string();
                    empty = 0;
                }
                if square.row() as usize != BOARD_SIZE - 1 {
                    fen.push('/');
                }
            }
        }

        fen
    }

    /// Fetches the [`Piece`] at `(row, col)`.
    ///
    /// Returns `None` if the square is empty *or* if the coordinates are off the board. Never panics.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, Color, Piece, PieceKind};
    /// let board = Board::standard();
    /// assert_eq!(board.get(7, 4), Some(Piece::new(Color::White, PieceKind::King)));
    /// assert_eq!(board.get(4, 4), None);
    /// assert_eq!(board.get(-1, 9), None);
    /// ```
    #[inline(always)]
    pub fn get(&self, row: i32, col: i32) -> Option<Piece> {
        self.piece_at(Square::new(row, col)?)
    }

    /// Writes `piece` to `(row, col)`, replacing anything that was there.
    ///
    /// Fails, without modifying the board, if the coordinates are off the board.
    #[inline(always)]
    pub fn set(&mut self, row: i32, col: i32, piece: Piece) -> Result<()> {
        let square = Square::from_coords(row, col).context("Cannot place piece")?;
        self.place(square, piece);
        Ok(())
    }

    /// Writes a piece given in its numeric encoding to `(row, col)`.
    ///
    /// Fails, without modifying the board, if the coordinates are off the board or any field of `raw` is invalid.
    /// The empty encoding clears the square.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, RawPiece};
    /// let mut board = Board::new();
    /// assert!(board.set_raw(0, 0, RawPiece { kind: 3, color: 2, theme: 1 }).is_ok());
    /// assert!(board.set_raw(0, 1, RawPiece { kind: 9, color: 2, theme: 0 }).is_err());
    /// assert!(board.set_raw(0, 8, RawPiece { kind: 3, color: 2, theme: 0 }).is_err());
    /// assert_eq!(board.to_fen(), "r7/8/8/8/8/8/8/8");
    /// ```
    pub fn set_raw(&mut self, row: i32, col: i32, raw: RawPiece) -> Result<()> {
        let square = Square::from_coords(row, col).context("Cannot place piece")?;
        let piece = raw.to_piece()?;
        self.0[square] = piece;
        Ok(())
    }

    /// Empties the square at `(row, col)`.
    ///
    /// Fails, without modifying the board, if the coordinates are off the board.
    #[inline(always)]
    pub fn clear(&mut self, row: i32, col: i32) -> Result<()> {
        let square = Square::from_coords(row, col).context("Cannot clear square")?;
        self.take(square);
        Ok(())
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.0[square]
    }

    /// Fetches the [`Color`] of the piece on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.0[square].is_none()
    }

    /// Places `piece` on `square`, replacing anything that was there.
    #[inline(always)]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.0[square] = Some(piece);
    }

    /// Takes the [`Piece`] from `square`, if there is one present, leaving it empty.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.0.replace(square, None)
    }

    /// Clears the entire board, removing all pieces.
    #[inline(always)]
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Iterates over every occupied square and the piece on it, starting at a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.0
            .iter()
            .filter_map(|(square, piece)| piece.map(|piece| (square, piece)))
    }

    /// Counts the pieces matching `kind` and `color`. `None` matches anything.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, Color, PieceKind};
    /// let board = Board::standard();
    /// assert_eq!(board.count(Some(PieceKind::Pawn), None), 16);
    /// assert_eq!(board.count(None, Some(Color::Black)), 16);
    /// assert_eq!(board.count(Some(PieceKind::King), Some(Color::White)), 1);
    /// ```
    pub fn count(&self, kind: Option<PieceKind>, color: Option<Color>) -> usize {
        self.pieces()
            .filter(|(_, piece)| kind.map_or(true, |kind| piece.kind() == kind))
            .filter(|(_, piece)| color.map_or(true, |color| piece.color() == color))
            .count()
    }
}

impl Default for Board {
    /// The default [`Board`] holds the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    /// Wrapper for [`Board::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Board {
    /// Prints the board with row `0` (rank 8) on top, using FEN letters for pieces and `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for (square, piece) in self.0.iter() {
            if square.col() == 0 {
                board += &format!("{}| ", square.rank_char());
            }

            board.push(piece.map_or('.', |piece| piece.to_char()));
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

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}\n\nFEN: {}", self.to_fen())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut board = Board::new();
        let knight = Piece::with_theme(Color::Black, PieceKind::Knight, Theme::Wood);

        for row in 0..8 {
            for col in 0..8 {
                board.set(row, col, knight).unwrap();
                assert_eq!(board.get(row, col), Some(knight));

                board.clear(row, col).unwrap();
                assert_eq!(board.get(row, col), None);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut board = Board::standard();
        let before = board;
        let pawn = Piece::new(Color::White, PieceKind::Pawn);

        assert!(board.set(-1, 0, pawn).is_err());
        assert!(board.set(0, 8, pawn).is_err());
        assert!(board.clear(8, 8).is_err());
        assert!(board.set_raw(3, 3, RawPiece { kind: 2, color: 0, theme: 0 }).is_err());
        assert_eq!(board.get(99, 99), None);

        assert_eq!(board, before);
    }

    #[test]
    fn test_standard_setup() {
        let board = Board::standard();

        assert_eq!(board.count(None, None), 32);
        assert_eq!(board.count(Some(PieceKind::Pawn), None), 16);
        assert_eq!(board.count(Some(PieceKind::Rook), None), 4);
        assert_eq!(board.count(Some(PieceKind::Knight), None), 4);
        assert_eq!(board.count(Some(PieceKind::Bishop), None), 4);
        assert_eq!(board.count(Some(PieceKind::Queen), None), 2);
        assert_eq!(board.count(Some(PieceKind::King), None), 2);
        assert_eq!(board.count(None, Some(Color::White)), 16);
        assert_eq!(board.count(None, Some(Color::Black)), 16);

        for col in 0..8 {
            let kind = PieceKind::BACK_RANK[col as usize];
            assert_eq!(board.get(0, col), Some(Piece::new(Color::Black, kind)));
            assert_eq!(board.get(1, col), Some(Piece::new(Color::Black, PieceKind::Pawn)));
            assert_eq!(board.get(6, col), Some(Piece::new(Color::White, PieceKind::Pawn)));
            assert_eq!(board.get(7, col), Some(Piece::new(Color::White, kind)));

            for row in 2..6 {
                assert_eq!(board.get(row, col), None);
            }
        }
    }

    #[test]
    fn test_setup_theme() {
        let mut board = Board::new();
        board.standard_setup_with_theme(Theme::Wood);
        assert!(board.pieces().all(|(_, piece)| piece.theme() == Theme::Wood));
        assert_eq!(board.to_fen(), FEN_STARTPOS);
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            FEN_STARTPOS,
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "8/8/8/3pP3/8/8/8/8",
            "8/8/8/8/8/8/8/8",
        ];
        for fen in fens {
            assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        }

        assert!(Board::from_fen("8/8/8").is_err());
        assert!(Board::from_fen("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("x7/8/8/8/8/8/8/8").is_err());
    }
}
