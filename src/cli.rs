/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{Color, Piece, Square, Theme};

/// A command to be sent to the console.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND> [ARGS]")
)]
pub enum ConsoleCommand {
    /// Report a click on the square at `(row, col)`, exactly as a graphical board would.
    ///
    /// Row 0 is Black's back rank. Off-board coordinates drop the current selection.
    #[command(alias = "c")]
    Click {
        #[arg(allow_negative_numbers = true)]
        row: i32,

        #[arg(allow_negative_numbers = true)]
        col: i32,
    },

    /// Select the piece on the provided square and show its legal destinations.
    #[command(alias = "s")]
    Select { square: Square },

    /// Move a piece from one square to another, if legal.
    #[command(aliases = ["m", "mv"])]
    Move { from: Square, to: Square },

    /// Take back the last move.
    #[command(alias = "u")]
    Undo,

    /// Replay the last move that was taken back.
    #[command(alias = "r")]
    Redo,

    /// Show the legal destinations of the piece on the provided square, or of the current selection.
    Moves {
        square: Option<Square>,

        /// If set, the destinations will also be drawn on a board.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Report whether a square is attacked by the provided color, and by which pieces.
    Attacked { square: Square, color: Color },

    /// Print the piece at `(row, col)`.
    Get {
        #[arg(allow_negative_numbers = true)]
        row: i32,

        #[arg(allow_negative_numbers = true)]
        col: i32,
    },

    /// Place a piece on the provided square.
    ///
    /// This bypasses the rules entirely, and is not recorded in the history.
    Place { piece: Piece, square: Square },

    /// Remove the piece at the provided square.
    ///
    /// This bypasses the rules entirely, and is not recorded in the history.
    Take { square: Square },

    /// Print whose turn it is.
    Turn,

    /// Print every move made so far.
    #[command(alias = "h")]
    History {
        /// If set, moves are printed as numbered movetext on a single line.
        #[arg(short, long, default_value = "false")]
        numbered: bool,
    },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Start a game from `<placement> [w|b] [castling]`.
    #[command(alias = "fen")]
    Position {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        fen: Vec<String>,
    },

    /// Start a new game from the standard position.
    #[command(alias = "new")]
    Reset {
        /// The theme to draw pieces in. Defaults to the theme currently in use.
        #[arg(short, long)]
        theme: Option<Theme>,
    },

    /// Quit the console.
    #[command(aliases = ["quit", "q"])]
    Exit,
}

impl FromStr for ConsoleCommand {
    type Err = clap::Error;
    /// Attempt to parse a [`ConsoleCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

impl ValueEnum for Color {
    fn value_variants<'a>() -> &'a [Self] {
        &[Color::White, Color::Black]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Each color may also be referred to by its FEN character
        let alias = match self {
            Color::White => "w",
            Color::Black => "b",
        };

        Some(PossibleValue::new(self.name()).alias(alias))
    }
}

impl ValueEnum for Theme {
    fn value_variants<'a>() -> &'a [Self] {
        &[Theme::Default, Theme::Wood]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let mut value = PossibleValue::new(self.name());

        match self {
            Theme::Default => value = value.alias("standard"),
            Theme::Wood => {}
        }

        Some(value)
    }
}
