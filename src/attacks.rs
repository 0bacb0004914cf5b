/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    bishop_moves, knight_moves, movegen::KING_DELTAS, queen_moves, rook_moves, Bitboard, Board,
    Color, Piece, PieceKind, Square,
};

/// Returns `true` if any piece of color `by` attacks `square`.
///
/// Every `by` piece on the board is asked in turn, stopping at the first attacker.
/// Pawns only attack diagonally forward, and Kings only their eight neighbors (never by castling).
///
/// # Example
/// ```
/// # use tempo::{is_attacked, Board, Color, Square};
/// let board = Board::standard();
/// let f3 = Square::from_coords(5, 5).unwrap();
/// let f6 = Square::from_coords(2, 5).unwrap();
///
/// assert!(is_attacked(&board, f3, Color::White));
/// assert!(!is_attacked(&board, f3, Color::Black));
/// assert!(is_attacked(&board, f6, Color::Black));
/// ```
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces()
        .any(|(from, piece)| piece.color() == by && attacks(board, from, piece, square))
}

/// Returns every square holding a piece of color `by` that attacks `square`.
pub fn attackers(board: &Board, square: Square, by: Color) -> Bitboard {
    board
        .pieces()
        .filter(|(from, piece)| piece.color() == by && attacks(board, *from, *piece, square))
        .map(|(from, _)| from)
        .collect()
}

/// Returns `true` if `piece`, standing on `from`, attacks `target`.
fn attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => {
            from.row() as i32 + color.forward() as i32 == target.row() as i32
                && from.distance_cols(target) == 1
        }

        PieceKind::King => KING_DELTAS
            .iter()
            .any(|&(dr, dc)| from.offset(dr, dc) == Some(target)),

        kind => {
            let mut moves = Bitboard::EMPTY_BOARD;
            match kind {
                PieceKind::Knight => knight_moves(board, from, color, &mut moves),
                PieceKind::Bishop => bishop_moves(board, from, color, &mut moves),
                PieceKind::Rook => rook_moves(board, from, color, &mut moves),
                _ => queen_moves(board, from, color, &mut moves),
            }
            moves.contains(target)
        }
    }
}
