/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares, used for legal-destination masks.
mod bitboard;

/// Colors, piece kinds, themes, and the pieces built from them.
mod piece;

/// Squares and the coordinate system of the board.
mod square;

/// The `8x8` grid of pieces.
mod store;

/// 64-element containers indexed by squares.
mod table;

pub use bitboard::*;
pub use piece::*;
pub use square::*;
pub use store::*;
pub use table::*;
