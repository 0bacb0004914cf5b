/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

use crate::{
    generate_moves, generate_moves_into, is_attacked, Bitboard, Board, CastleSide,
    CastlingRights, Color, MoveHistory, MoveKind, MoveRecord, Piece, PieceKind, Square, Theme,
    KING_START_COL,
};

/// Whether the controller is waiting for a piece to be picked, or for its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// Nothing selected.
    Idle,

    /// A piece has been picked and its legal destinations computed.
    Selected(Square),
}

/// What a call to [`Game::click`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clicked piece is now selected, with these legal destinations.
    Selected { square: Square, moves: Bitboard },

    /// The selected piece moved to the clicked square.
    Moved(MoveRecord),

    /// The selection (if any) was dropped.
    ///
    /// This happens for off-board coordinates, empty squares that are not a legal destination,
    /// and attempts to move a piece out of turn.
    Deselected,
}

/// A single game session: the board, whose turn it is, the current selection, and the move history.
///
/// The board and history are only ever changed together, so undoing every move in the history
/// always leads back to the starting position.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    history: MoveHistory,

    /// Currently selected square, if any.
    selected: Option<Square>,

    /// Legal destinations of the piece on `selected`. Empty when nothing is selected.
    legal: Bitboard,
}

impl Game {
    /// Starts a new game from the standard position, with White to move.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Game};
    /// let game = Game::new();
    /// assert_eq!(game.side_to_move(), Color::White);
    /// assert!(game.history().is_empty());
    /// assert_eq!(game.board().count(None, None), 32);
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_theme(Theme::Default)
    }

    /// Starts a new game from the standard position, with every piece drawn in `theme`.
    pub fn with_theme(theme: Theme) -> Self {
        let mut board = Board::new();
        board.standard_setup_with_theme(theme);
        Self::from_parts(board, Color::White, CastlingRights::ALL)
    }

    /// Starts a game from `"<placement> [w|b] [castling]"`.
    ///
    /// The side to move defaults to White. If the castling field is omitted,
    /// rights are granted wherever a King and Rook stand on their original squares.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Game};
    /// let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.castling_rights().to_string(), "-");
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut fields = fen.split_ascii_whitespace();

        let placement = fields.next().context("FEN string is empty")?;
        let board = Board::from_fen(placement)?;

        let side_to_move = match fields.next() {
            Some(color) => Color::from_str(color)?,
            None => Color::White,
        };

        let castling = match fields.next() {
            Some(rights) => rights.parse()?,
            None => CastlingRights::from_board(&board),
        };

        if let Some(extra) = fields.next() {
            bail!("Unsupported FEN field {extra:?}: only placement, side to move, and castling are accepted");
        }

        Ok(Self::from_parts(board, side_to_move, castling))
    }

    /// Starts a session from an existing board, with an empty history and nothing selected.
    pub(crate) fn from_parts(board: Board, side_to_move: Color, castling: CastlingRights) -> Self {
        Self {
            board,
            side_to_move,
            castling,
            history: MoveHistory::new(),
            selected: None,
            legal: Bitboard::EMPTY_BOARD,
        }
    }

    /// Restores the standard starting position, keeping the theme of the current pieces.
    pub fn reset(&mut self) {
        let theme = self
            .board
            .pieces()
            .next()
            .map(|(_, piece)| piece.theme())
            .unwrap_or_default();
        self.reset_with_theme(theme);
    }

    /// Restores the standard starting position, drawn in `theme`.
    pub fn reset_with_theme(&mut self, theme: Theme) {
        debug!(%theme, "resetting game");
        *self = Self::with_theme(theme);
    }

    /// The current board.
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetches the piece at `(row, col)`, or `None` if the square is empty or off the board.
    #[inline(always)]
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        self.board.get(row, col)
    }

    /// The color whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The currently selected square, if any.
    #[inline(always)]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Whether the controller is idle or holding a selection.
    #[inline(always)]
    pub const fn state(&self) -> TurnState {
        match self.selected {
            Some(square) => TurnState::Selected(square),
            None => TurnState::Idle,
        }
    }

    /// Legal destinations of the selected piece. Empty when nothing is selected.
    ///
    /// Use [`Bitboard::to_grid`] for the `8x8` boolean form.
    #[inline(always)]
    pub const fn legal_moves(&self) -> Bitboard {
        self.legal
    }

    /// Computes the legal destinations of whatever piece stands on `square`, without selecting it.
    #[inline(always)]
    pub fn moves_from(&self, square: Square) -> Bitboard {
        generate_moves(&self.board, &self.history, self.castling, square)
    }

    /// Every move made so far, along with any that were undone and may be redone.
    #[inline(always)]
    pub const fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// The castling rights both colors still hold.
    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns `true` if `square` is attacked by any piece of color `by`.
    #[inline(always)]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        is_attacked(&self.board, square, by)
    }

    /// Handles a click on `(row, col)`.
    ///
    /// - Off-board coordinates deselect.
    /// - A legal destination of the selected piece executes the move, if that piece belongs to the side to move.
    ///   Otherwise the selection is dropped.
    /// - Any square with a piece on it, of either color, becomes the new selection.
    /// - Anything else deselects.
    ///
    /// # Example
    /// ```
    /// # use tempo::{ClickOutcome, Color, Game};
    /// let mut game = Game::new();
    ///
    /// assert!(matches!(game.click(6, 4), ClickOutcome::Selected { .. }));
    /// assert!(matches!(game.click(4, 4), ClickOutcome::Moved(_)));
    /// assert_eq!(game.side_to_move(), Color::Black);
    ///
    /// assert_eq!(game.click(-1, 20), ClickOutcome::Deselected);
    /// ```
    pub fn click(&mut self, row: i32, col: i32) -> ClickOutcome {
        let Some(square) = Square::new(row, col) else {
            trace!(row, col, "click off the board");
            self.deselect();
            return ClickOutcome::Deselected;
        };

        if let Some(from) = self.selected {
            if self.legal.contains(square) {
                return match self.execute(from, square) {
                    Ok(record) => ClickOutcome::Moved(record),
                    Err(err) => {
                        trace!(%from, to = %square, "rejected move: {err:#}");
                        self.deselect();
                        ClickOutcome::Deselected
                    }
                };
            }
        }

        match self.select(square) {
            Some(moves) => ClickOutcome::Selected { square, moves },
            None => ClickOutcome::Deselected,
        }
    }

    /// Selects the piece on `square` and computes its legal destinations.
    ///
    /// Pieces of either color may be selected. If `square` is empty, the selection is dropped and `None` is returned.
    pub fn select(&mut self, square: Square) -> Option<Bitboard> {
        if self.board.is_empty_at(square) {
            self.deselect();
            return None;
        }

        generate_moves_into(
            &self.board,
            &self.history,
            self.castling,
            square,
            &mut self.legal,
        );
        self.selected = Some(square);
        trace!(%square, moves = self.legal.population(), "selected");

        Some(self.legal)
    }

    /// Drops the selection and its legal destinations.
    #[inline(always)]
    pub fn deselect(&mut self) {
        self.selected = None;
        self.legal.clear_all();
    }

    /// Moves the piece on `from` to `to`, as if both squares had been clicked.
    ///
    /// Fails without changing anything if `from` is empty, holds a piece of the side not to move,
    /// or if `to` is not one of its legal destinations.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Game, Square};
    /// let mut game = Game::new();
    /// let e2: Square = "e2".parse().unwrap();
    /// let e5: Square = "e5".parse().unwrap();
    ///
    /// assert!(game.make_move(e2, e5).is_err());
    ///
    /// let record = game.make_move(e2, "e4".parse().unwrap()).unwrap();
    /// assert_eq!(record.to_string(), "e4");
    /// ```
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveRecord> {
        if self.board.is_empty_at(from) {
            bail!("Cannot move from {from}: there is no piece there");
        }

        let moves = self.moves_from(from);
        if !moves.contains(to) {
            bail!("Cannot move from {from} to {to}: not a legal destination");
        }

        self.execute(from, to)
    }

    /// Executes the move `from` to `to`, which must already be known to be a legal destination.
    ///
    /// The record is appended to the history before the board is touched.
    fn execute(&mut self, from: Square, to: Square) -> Result<MoveRecord> {
        let Some(piece) = self.board.piece_at(from) else {
            bail!("Cannot move from {from}: there is no piece there");
        };

        if piece.color() != self.side_to_move {
            bail!(
                "Cannot move {} on {from}: it is {}'s turn",
                piece.name(),
                self.side_to_move
            );
        }

        let record = self.classify(from, to, piece);
        self.history.push(record)?;
        self.apply(&record);

        debug!(%record, "executed move");
        Ok(record)
    }

    /// Builds the record for moving `piece` from `from` to `to`.
    fn classify(&self, from: Square, to: Square, piece: Piece) -> MoveRecord {
        let mut capture_square = to;

        let kind = match piece.kind() {
            PieceKind::King
                if from.col() == KING_START_COL && from.distance_cols(to) == 2 =>
            {
                if to.col() > from.col() {
                    MoveKind::ShortCastle
                } else {
                    MoveKind::LongCastle
                }
            }

            PieceKind::Pawn if from.col() != to.col() && self.board.is_empty_at(to) => {
                capture_square = Square::from_coords_unchecked(from.row(), to.col());
                MoveKind::EnPassantCapture
            }

            PieceKind::Pawn if to.row() == piece.color().promotion_row() => {
                MoveKind::Promotion(PieceKind::Queen)
            }

            PieceKind::Pawn if from.distance_rows(to) == 2 => MoveKind::PawnDoublePush,

            _ => MoveKind::Normal,
        };

        MoveRecord {
            from,
            to,
            piece,
            captured: self.board.piece_at(capture_square),
            capture_square,
            kind,
            castling_rights: self.castling,
        }
    }

    /// Plays `record` on the board and hands the turn to the other side.
    fn apply(&mut self, record: &MoveRecord) {
        self.board.take(record.from());
        if record.is_en_passant() {
            self.board.take(record.capture_square());
        }
        self.board.place(record.to(), record.placed_piece());

        if let Some((rook_from, rook_to)) = record.rook_squares() {
            if let Some(rook) = self.board.take(rook_from) {
                self.board.place(rook_to, rook);
            }
        }

        self.castling.update_for(record);
        self.side_to_move = record.piece().color().opponent();
        self.deselect();
    }

    /// Takes back the most recent move, returning it.
    ///
    /// Any selection is dropped first. Returns `None`, changing nothing else, if there is nothing to undo.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, Game};
    /// let mut game = Game::new();
    /// assert!(game.undo().is_none());
    ///
    /// game.make_move("g1".parse().unwrap(), "f3".parse().unwrap()).unwrap();
    /// let record = game.undo().unwrap();
    /// assert_eq!(record.to_string(), "Nf3");
    /// assert_eq!(game.board(), &Board::standard());
    /// ```
    pub fn undo(&mut self) -> Option<MoveRecord> {
        self.deselect();

        let Some(record) = self.history.undo() else {
            trace!("nothing to undo");
            return None;
        };

        self.board.take(record.to());
        self.board.place(record.from(), record.piece());

        if let Some(captured) = record.captured() {
            self.board.place(record.capture_square(), captured);
        }

        if let Some((rook_from, rook_to)) = record.rook_squares() {
            if let Some(rook) = self.board.take(rook_to) {
                self.board.place(rook_from, rook);
            }
        }

        self.castling = record.castling_rights();
        self.side_to_move = record.piece().color();

        debug!(%record, "undid move");
        Some(record)
    }

    /// Replays the most recently undone move, returning it.
    ///
    /// Returns `None` if nothing has been undone since the last move was made.
    pub fn redo(&mut self) -> Option<MoveRecord> {
        self.deselect();

        let record = self.history.redo()?;
        self.apply(&record);

        debug!(%record, "redid move");
        Some(record)
    }

    /// Returns `true` if `color` may still castle to `side`.
    #[inline(always)]
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling.can_castle(color, side)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Wrapper for [`Game::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "Turn: {}", self.side_to_move)?;
        writeln!(f, "Castling: {}", self.castling)?;
        match self.selected {
            Some(square) => writeln!(f, "Selected: {square}")?,
            None => writeln!(f, "Selected: -")?,
        }
        write!(f, "Moves: {}", self.history)
    }
}
