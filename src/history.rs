/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use arrayvec::ArrayVec;

use crate::{Color, MoveRecord};

/// Maximum number of moves a single game can record.
pub const HISTORY_CAPACITY: usize = 1024;

/// Ordered log of executed moves.
///
/// The log keeps an explicit logical length, separate from the number of stored records.
/// Undoing a move only shortens the logical length, so the record just past it can be redone.
/// Pushing a new record discards everything past the logical length first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    records: ArrayVec<MoveRecord, HISTORY_CAPACITY>,
    len: usize,
}

impl MoveHistory {
    /// Creates an empty [`MoveHistory`].
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` after the last active record, discarding any undone records.
    ///
    /// Fails, leaving the history unchanged, if it already holds [`HISTORY_CAPACITY`] active records.
    pub fn push(&mut self, record: MoveRecord) -> Result<()> {
        if self.len == HISTORY_CAPACITY {
            bail!("Move history is full: cannot record more than {HISTORY_CAPACITY} moves");
        }

        self.records.truncate(self.len);
        // Cannot fail: `len < HISTORY_CAPACITY` after the truncate
        if let Err(err) = self.records.try_push(record) {
            bail!("Failed to record move {record}: {err}");
        }
        self.len += 1;

        Ok(())
    }

    /// Steps the logical length back by one, returning the record that was undone.
    ///
    /// The record is kept, so it can be replayed by [`MoveHistory::redo`].
    #[inline(always)]
    pub fn undo(&mut self) -> Option<MoveRecord> {
        self.len = self.len.checked_sub(1)?;
        self.records.get(self.len).copied()
    }

    /// Steps the logical length forward by one, returning the record that was redone.
    #[inline(always)]
    pub fn redo(&mut self) -> Option<MoveRecord> {
        let record = self.records.get(self.len).copied()?;
        self.len += 1;
        Some(record)
    }

    /// The most recent active record.
    #[inline(always)]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.len.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Fetches the `index`th active record, counting from the first move.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&MoveRecord> {
        self.iter().nth(index)
    }

    /// Number of active records.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of undone records that [`MoveHistory::redo`] can still replay.
    #[inline(always)]
    pub fn redo_len(&self) -> usize {
        self.records.len() - self.len
    }

    /// Iterates over the active records, oldest first.
    #[inline(always)]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MoveRecord> + ExactSizeIterator {
        self.records[..self.len].iter()
    }

    /// Renders the active records as numbered movetext, such as `1. e4 e5 2. Nf3`.
    ///
    /// If the first record is a Black move, it is numbered `1...`.
    pub fn to_movetext(&self) -> String {
        let mut text = String::new();
        let mut number = 1;

        for (i, record) in self.iter().enumerate() {
            let color = record.piece().color();

            if i > 0 {
                text.push(' ');
            }

            match color {
                Color::White => text += &format!("{number}. "),
                Color::Black if i == 0 => text += &format!("{number}... "),
                Color::Black => {}
            }

            text += &record.to_notation();

            if color == Color::Black {
                number += 1;
            }
        }

        text
    }
}

impl fmt::Display for MoveHistory {
    /// Wrapper for [`MoveHistory::to_movetext`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_movetext())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CastlingRights, MoveKind, Piece, PieceKind, Square};

    fn pawn_push(color: Color, col: u8) -> MoveRecord {
        let (from_row, to_row) = match color {
            Color::White => (6, 4),
            Color::Black => (1, 3),
        };
        let to = Square::from_coords_unchecked(to_row, col);
        MoveRecord {
            from: Square::from_coords_unchecked(from_row, col),
            to,
            piece: Piece::new(color, PieceKind::Pawn),
            captured: None,
            capture_square: to,
            kind: MoveKind::PawnDoublePush,
            castling_rights: CastlingRights::ALL,
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut history = MoveHistory::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        let e4 = pawn_push(Color::White, 4);
        let e5 = pawn_push(Color::Black, 4);
        history.push(e4).unwrap();
        history.push(e5).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&e5));

        assert_eq!(history.undo(), Some(e5));
        assert_eq!(history.len(), 1);
        assert_eq!(history.last(), Some(&e4));
        assert_eq!(history.redo_len(), 1);

        assert_eq!(history.redo(), Some(e5));
        assert_eq!(history.len(), 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut history = MoveHistory::new();
        history.push(pawn_push(Color::White, 4)).unwrap();
        history.push(pawn_push(Color::Black, 4)).unwrap();
        history.undo();

        let d5 = pawn_push(Color::Black, 3);
        history.push(d5).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.get(1), Some(&d5));
        assert!(history.get(2).is_none());
    }

    #[test]
    fn test_capacity() {
        let mut history = MoveHistory::new();
        for i in 0..HISTORY_CAPACITY {
            let color = if i % 2 == 0 { Color::White } else { Color::Black };
            history.push(pawn_push(color, (i % 8) as u8)).unwrap();
        }

        assert!(history.push(pawn_push(Color::White, 0)).is_err());
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // Undoing frees room again
        history.undo();
        assert!(history.push(pawn_push(Color::White, 0)).is_ok());
    }

    #[test]
    fn test_movetext() {
        let mut history = MoveHistory::new();
        assert_eq!(history.to_string(), "");

        history.push(pawn_push(Color::White, 4)).unwrap();
        history.push(pawn_push(Color::Black, 4)).unwrap();
        history.push(pawn_push(Color::White, 3)).unwrap();
        assert_eq!(history.to_string(), "1. e4 e5 2. d4");

        let mut history = MoveHistory::new();
        history.push(pawn_push(Color::Black, 2)).unwrap();
        history.push(pawn_push(Color::White, 2)).unwrap();
        assert_eq!(history.to_string(), "1... c5 2. c4");
    }
}
