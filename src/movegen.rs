/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    is_attacked, Bitboard, Board, CastleSide, CastlingRights, Color, MoveHistory, PieceKind,
    Square, KING_START_COL,
};

/// Deltas for the movement of the Queen, as `(row, col)` steps.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// The King steps one square in any of the Queen's directions.
pub(crate) const KING_DELTAS: [(i8, i8); 8] = QUEEN_DELTAS;

/// Computes every pseudo-legal destination of the piece on `square`.
///
/// An empty square yields an empty mask. Non-castling moves are not filtered for King safety.
///
/// # Example
/// ```
/// # use tempo::{generate_moves, Board, CastlingRights, MoveHistory, Square};
/// let board = Board::standard();
/// let g1 = Square::from_coords(7, 6).unwrap();
///
/// let moves = generate_moves(&board, &MoveHistory::new(), CastlingRights::ALL, g1);
/// let names = moves.iter().map(|sq| sq.to_string()).collect::<Vec<_>>();
/// assert_eq!(names, ["f3", "h3"]);
/// ```
#[inline(always)]
pub fn generate_moves(
    board: &Board,
    history: &MoveHistory,
    rights: CastlingRights,
    square: Square,
) -> Bitboard {
    let mut moves = Bitboard::EMPTY_BOARD;
    generate_moves_into(board, history, rights, square, &mut moves);
    moves
}

/// Same as [`generate_moves`], but writes into `moves`, which is cleared first.
pub fn generate_moves_into(
    board: &Board,
    history: &MoveHistory,
    rights: CastlingRights,
    square: Square,
    moves: &mut Bitboard,
) {
    moves.clear_all();

    let Some(piece) = board.piece_at(square) else {
        return;
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, history, square, color, moves),
        PieceKind::Knight => knight_moves(board, square, color, moves),
        PieceKind::Bishop => bishop_moves(board, square, color, moves),
        PieceKind::Rook => rook_moves(board, square, color, moves),
        PieceKind::Queen => queen_moves(board, square, color, moves),
        PieceKind::King => king_moves(board, square, color, rights, moves),
    }
}

/// Adds the pushes, captures, and en passant captures of a `color` Pawn on `from`.
pub fn pawn_moves(
    board: &Board,
    history: &MoveHistory,
    from: Square,
    color: Color,
    moves: &mut Bitboard,
) {
    let forward = color.forward();

    // Pushes
    if let Some(single) = from.offset(forward, 0) {
        if board.is_empty_at(single) {
            moves.set(single);

            if from.row() == color.pawn_row() {
                if let Some(double) = single.offset(forward, 0) {
                    if board.is_empty_at(double) {
                        moves.set(double);
                    }
                }
            }
        }
    }

    // Captures
    for side in [-1, 1] {
        if let Some(to) = from.offset(forward, side) {
            if board.color_at(to) == Some(color.opponent()) {
                moves.set(to);
            }
        }
    }

    if let Some(to) = en_passant_target(history, from, color) {
        moves.set(to);
    }
}

/// If a `color` Pawn on `from` may capture en passant, returns the square it would land on.
///
/// Requires more than two moves in `history`, the last of which must be an enemy Pawn's double push
/// that landed directly beside `from`.
pub fn en_passant_target(history: &MoveHistory, from: Square, color: Color) -> Option<Square> {
    if history.len() <= 2 {
        return None;
    }

    let last = history.last()?;
    let pawn = last.piece();

    let eligible = last.is_pawn_double_push()
        && pawn.color() != color
        && last.to().row() == from.row()
        && last.to().distance_cols(from) == 1;

    if !eligible {
        return None;
    }

    Square::new(
        from.row() as i32 + color.forward() as i32,
        last.to().col() as i32,
    )
}

/// Adds the squares a `color` Knight on `from` can jump to.
#[inline(always)]
pub fn knight_moves(board: &Board, from: Square, color: Color, moves: &mut Bitboard) {
    leaper_moves(board, from, color, &KNIGHT_DELTAS, moves);
}

/// Adds the squares along the diagonals of a `color` Bishop on `from`.
#[inline(always)]
pub fn bishop_moves(board: &Board, from: Square, color: Color, moves: &mut Bitboard) {
    rider_moves(board, from, color, &BISHOP_DELTAS, moves);
}

/// Adds the squares along the rank and file of a `color` Rook on `from`.
#[inline(always)]
pub fn rook_moves(board: &Board, from: Square, color: Color, moves: &mut Bitboard) {
    rider_moves(board, from, color, &ROOK_DELTAS, moves);
}

/// Adds the union of Rook and Bishop moves from `from`.
#[inline(always)]
pub fn queen_moves(board: &Board, from: Square, color: Color, moves: &mut Bitboard) {
    rook_moves(board, from, color, moves);
    bishop_moves(board, from, color, moves);
}

/// Adds the single steps of a `color` King on `from`, along with any available castling moves.
pub fn king_moves(
    board: &Board,
    from: Square,
    color: Color,
    rights: CastlingRights,
    moves: &mut Bitboard,
) {
    leaper_moves(board, from, color, &KING_DELTAS, moves);

    if from.row() != color.back_row() || from.col() != KING_START_COL {
        return;
    }

    for side in CastleSide::all() {
        if can_castle(board, from, color, rights, side) {
            moves.set(Square::from_coords_unchecked(
                from.row(),
                side.king_target_col(),
            ));
        }
    }
}

/// Checks every castling condition for a `color` King on its starting square `king`.
fn can_castle(
    board: &Board,
    king: Square,
    color: Color,
    rights: CastlingRights,
    side: CastleSide,
) -> bool {
    if !rights.can_castle(color, side) {
        return false;
    }

    let row = king.row();
    let on_row = |col: u8| Square::from_coords_unchecked(row, col);

    let rook = board.piece_at(on_row(side.rook_col()));
    if !rook.is_some_and(|rook| rook.is_rook() && rook.color() == color) {
        return false;
    }

    if side
        .between_cols()
        .iter()
        .any(|&col| !board.is_empty_at(on_row(col)))
    {
        return false;
    }

    let enemy = color.opponent();
    if is_attacked(board, king, enemy) {
        return false;
    }

    side.king_path_cols()
        .into_iter()
        .all(|col| !is_attacked(board, on_row(col), enemy))
}

/// Adds every in-bounds `from + delta` that is not occupied by a `color` piece.
#[inline(always)]
fn leaper_moves(
    board: &Board,
    from: Square,
    color: Color,
    deltas: &[(i8, i8)],
    moves: &mut Bitboard,
) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            if board.color_at(to) != Some(color) {
                moves.set(to);
            }
        }
    }
}

/// Walks each delta from `from` until the edge or the first occupied square,
/// which is included only if it holds an enemy piece.
#[inline(always)]
fn rider_moves(
    board: &Board,
    from: Square,
    color: Color,
    deltas: &[(i8, i8)],
    moves: &mut Bitboard,
) {
    for &(dr, dc) in deltas {
        let mut to = from;
        while let Some(shifted) = to.offset(dr, dc) {
            to = shifted;
            match board.color_at(to) {
                None => moves.set(to),
                Some(other) => {
                    if other != color {
                        moves.set(to);
                    }
                    break;
                }
            }
        }
    }
}
