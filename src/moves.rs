/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{CastlingRights, Piece, PieceKind, Square};

/// Represents the different kinds of moves that can be made during a chess game.
///
/// Captures are not a separate kind: any kind except castling may capture,
/// which is recorded by [`MoveRecord::captured`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum MoveKind {
    /// A piece moving from one location to another, possibly capturing whatever stood on the destination.
    #[default]
    Normal,

    /// A special case on a Pawn's first move, wherein it can advance two squares forward.
    PawnDoublePush,

    /// Involves the King and a Rook sliding past each other on the King's side of the board.
    ShortCastle,

    /// Involves the King and a Rook sliding past each other on the Queen's side of the board.
    LongCastle,

    /// A Pawn capturing an adjacent Pawn that just double-pushed past it.
    EnPassantCapture,

    /// A Pawn reaching the opponent's back rank and becoming the provided [`PieceKind`].
    Promotion(PieceKind),
}

impl MoveKind {
    /// Returns `true` if this is either kind of castling.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::ShortCastle | Self::LongCastle)
    }
}

/// A single executed move, holding everything needed to reverse it exactly.
///
/// Records are created by [`crate::Game`] when a move is executed and are never modified afterwards.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct MoveRecord {
    /// Where the moving piece started.
    pub(crate) from: Square,

    /// Where the moving piece ended up.
    pub(crate) to: Square,

    /// The moving piece, as it was *before* the move (so a promoting Pawn is recorded as a Pawn).
    pub(crate) piece: Piece,

    /// The piece removed from the board by this move, if any.
    pub(crate) captured: Option<Piece>,

    /// The square `captured` was removed from. Differs from `to` only for en passant.
    pub(crate) capture_square: Square,

    pub(crate) kind: MoveKind,

    /// Castling rights in effect before this move was made.
    pub(crate) castling_rights: CastlingRights,
}

impl MoveRecord {
    /// The square the moving piece started on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square the moving piece landed on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece that moved, before any promotion.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece that was captured, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// The square the captured piece stood on.
    ///
    /// For everything other than en passant, this is the same as [`MoveRecord::to`].
    #[inline(always)]
    pub const fn capture_square(&self) -> Square {
        self.capture_square
    }

    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Castling rights as they were before this move.
    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.kind.is_castle()
    }

    #[inline(always)]
    pub const fn is_short_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle)
    }

    #[inline(always)]
    pub const fn is_long_castle(&self) -> bool {
        matches!(self.kind, MoveKind::LongCastle)
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassantCapture)
    }

    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::PawnDoublePush)
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// The kind of piece the Pawn promoted to, if this was a promotion.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// The piece standing on [`MoveRecord::to`] right after this move.
    #[inline(always)]
    pub const fn placed_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Promotion(kind) => self.piece.promoted(kind),
            _ => self.piece,
        }
    }

    /// If this is a castling move, returns where the Rook starts and where it lands.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Game, Square};
    /// let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();
    /// let e1 = Square::from_coords(7, 4).unwrap();
    /// let g1 = Square::from_coords(7, 6).unwrap();
    ///
    /// let record = game.make_move(e1, g1).unwrap();
    /// let (rook_from, rook_to) = record.rook_squares().unwrap();
    /// assert_eq!(rook_from.to_string(), "h1");
    /// assert_eq!(rook_to.to_string(), "f1");
    /// ```
    pub const fn rook_squares(&self) -> Option<(Square, Square)> {
        let row = self.from.row();
        match self.kind {
            MoveKind::ShortCastle => Some((
                Square::from_coords_unchecked(row, 7),
                Square::from_coords_unchecked(row, 5),
            )),
            MoveKind::LongCastle => Some((
                Square::from_coords_unchecked(row, 0),
                Square::from_coords_unchecked(row, 3),
            )),
            _ => None,
        }
    }

    /// Renders this move in short algebraic-style notation.
    ///
    /// Piece letter (omitted for Pawns, whose captures use the origin file instead),
    /// `x` for captures, then the destination. Castling is `O-O` or `O-O-O`,
    /// promotions end in `=Q`, and en passant ends in ` e.p.`.
    /// No disambiguation or check markers are added.
    pub fn to_notation(&self) -> String {
        match self.kind {
            MoveKind::ShortCastle => return String::from("O-O"),
            MoveKind::LongCastle => return String::from("O-O-O"),
            _ => {}
        }

        let mut notation = String::with_capacity(10);

        match self.piece.kind().notation() {
            Some(letter) => notation.push(letter),
            None if self.is_capture() => notation.push(self.from.file_char()),
            None => {}
        }

        if self.is_capture() {
            notation.push('x');
        }

        notation += &self.to.to_algebraic();

        if let Some(promotion) = self.promotion() {
            notation.push('=');
            // Pawns never promote to Pawns, so this always has a letter
            if let Some(letter) = promotion.notation() {
                notation.push(letter);
            }
        }

        if self.is_en_passant() {
            notation += " e.p.";
        }

        notation
    }
}

impl fmt::Display for MoveRecord {
    /// Wrapper for [`MoveRecord::to_notation`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
