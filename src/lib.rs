/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Rules core for a two-player chess board.
//!
//! A [`Game`] owns the [`Board`], knows whose turn it is, and turns clicks on squares into
//! selections and moves. Every executed move is recorded in a [`MoveHistory`], so it can be undone.
//!
//! ```
//! # use tempo::{ClickOutcome, Game};
//! let mut game = Game::new();
//!
//! // Pick up the e2 pawn, then put it down on e4
//! game.click(6, 4);
//! let ClickOutcome::Moved(record) = game.click(4, 4) else {
//!     panic!("e2-e4 is legal");
//! };
//! assert_eq!(record.to_string(), "e4");
//!
//! game.undo();
//! assert!(game.history().is_empty());
//! ```

/// Attack detection, for castling safety.
mod attacks;

/// Squares, pieces, and the board that holds them.
mod board;

/// Castling rights and the sides a King can castle to.
mod castling;

/// Commands accepted by the terminal front end.
mod cli;

/// The terminal front end.
mod console;

/// The turn controller: selection, execution, and undo.
mod game;

/// The log of executed moves.
mod history;

/// Destination masks for every kind of piece.
mod movegen;

/// Records of executed moves, and their notation.
mod moves;

pub use attacks::*;
pub use board::*;
pub use castling::*;
pub use cli::*;
pub use console::*;
pub use game::*;
pub use history::*;
pub use movegen::*;
pub use moves::*;
