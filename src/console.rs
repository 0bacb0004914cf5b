/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::{attackers, Board, ClickOutcome, ConsoleCommand, Game, Square};

/// A terminal front end for a single [`Game`].
///
/// It plays the part a graphical board would: commands become clicks, selections, and undos,
/// and the resulting state is printed as text.
#[derive(Debug)]
pub struct Console {
    /// The game being played.
    ///
    /// Replaced wholesale by the `position` and `reset` commands.
    game: Game,

    /// One half of a channel, responsible for sending commands to the console to execute.
    sender: Sender<ConsoleCommand>,

    /// One half of a channel, responsible for receiving commands for the console to execute.
    receiver: Receiver<ConsoleCommand>,
}

impl Console {
    /// Constructs a new [`Console`] holding a fresh game, to be executed with [`Console::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the console's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game being played.
    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Sends a [`ConsoleCommand`] to the console to be executed.
    pub fn send_command(&self, command: ConsoleCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to send command to console")
    }

    /// Execute the main event loop for the console.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    /// Commands that were sent before calling this are executed first, in order.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.name());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            if cmd == ConsoleCommand::Exit {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                eprintln!("Error: {e:#}");
            }
        }

        Ok(())
    }

    /// Applies a single command to the game, printing its result.
    ///
    /// [`ConsoleCommand::Exit`] does nothing here; it is handled by [`Console::run`].
    pub fn execute(&mut self, cmd: ConsoleCommand) -> Result<()> {
        match cmd {
            ConsoleCommand::Click { row, col } => {
                let outcome = self.game.click(row, col);
                self.report(outcome);
            }

            ConsoleCommand::Select { square } => {
                let outcome = match self.game.select(square) {
                    Some(moves) => ClickOutcome::Selected { square, moves },
                    None => ClickOutcome::Deselected,
                };
                self.report(outcome);
            }

            ConsoleCommand::Move { from, to } => {
                let record = self.game.make_move(from, to)?;
                println!("{record}");
            }

            ConsoleCommand::Undo => match self.game.undo() {
                Some(record) => println!("Undid {record}"),
                None => println!("Nothing to undo"),
            },

            ConsoleCommand::Redo => match self.game.redo() {
                Some(record) => println!("Redid {record}"),
                None => println!("Nothing to redo"),
            },

            ConsoleCommand::Moves { square, pretty } => {
                let moves = match square.or(self.game.selected()) {
                    Some(square) => self.game.moves_from(square),
                    None => bail!("No square given and nothing is selected"),
                };

                println!("{}", square_list(moves));
                if pretty {
                    println!("{moves:?}");
                }
            }

            ConsoleCommand::Attacked { square, color } => {
                let attackers = attackers(self.game.board(), square, color);
                if attackers.is_empty() {
                    println!("{square} is not attacked by {color}");
                } else {
                    println!("{square} is attacked by {color} from {}", square_list(attackers));
                }
            }

            ConsoleCommand::Get { row, col } => match self.game.piece_at(row, col) {
                Some(piece) => println!("{}", piece.name()),
                None => println!("(empty)"),
            },

            ConsoleCommand::Place { piece, square } => self.edit_board(|board| {
                board.place(square, piece);
            }),

            ConsoleCommand::Take { square } => self.edit_board(|board| {
                board.take(square);
            }),

            ConsoleCommand::Turn => println!("{}", self.game.side_to_move()),

            ConsoleCommand::History { numbered } => {
                if numbered {
                    println!("{}", self.game.history());
                } else if self.game.history().is_empty() {
                    println!("(none)");
                } else {
                    for (i, record) in self.game.history().iter().enumerate() {
                        println!("{:>4}. {:<6} {record}", i + 1, record.piece().color().name());
                    }
                }
            }

            ConsoleCommand::Display => println!("{}", self.game),

            ConsoleCommand::Position { fen } => {
                self.game = Game::from_fen(&fen.join(" "))?;
            }

            ConsoleCommand::Reset { theme } => match theme {
                Some(theme) => self.game.reset_with_theme(theme),
                None => self.game.reset(),
            },

            ConsoleCommand::Exit => {}
        }

        Ok(())
    }

    /// Prints what a click did.
    fn report(&self, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::Selected { square, moves } => {
                // A square is only selected if it holds a piece
                let name = self
                    .game
                    .board()
                    .piece_at(square)
                    .map(|piece| piece.name())
                    .unwrap_or_default();
                println!("Selected {name} on {square}: {}", square_list(moves));
            }
            ClickOutcome::Moved(record) => println!("{record}"),
            ClickOutcome::Deselected => println!("Deselected"),
        }
    }

    /// Edits the board directly, starting a fresh game from the result with the same side to move
    /// and castling rights.
    ///
    /// The history cannot describe edits, so it is dropped.
    fn edit_board(&mut self, edit: impl FnOnce(&mut Board)) {
        let mut board = *self.game.board();
        edit(&mut board);

        self.game = Game::from_parts(
            board,
            self.game.side_to_move(),
            self.game.castling_rights(),
        );
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins the squares of `moves` by comma-space, or `(none)` if there are none.
fn square_list(moves: impl IntoIterator<Item = Square>) -> String {
    let squares = moves
        .into_iter()
        .map(|square| square.to_string())
        .collect::<Vec<_>>();

    if squares.is_empty() {
        String::from("(none)")
    } else {
        squares.join(", ")
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<ConsoleCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(ConsoleCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Console received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match ConsoleCommand::try_parse_from(buf.split_ascii_whitespace()) {
            // If successful, send the command to the console
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to console")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(console: &mut Console, line: &str) -> Result<()> {
        console.execute(line.parse()?)
    }

    #[test]
    fn test_commands_drive_the_game() {
        let mut console = Console::new();

        run(&mut console, "click 6 4").unwrap();
        run(&mut console, "click 4 4").unwrap();
        run(&mut console, "move e7 e5").unwrap();
        assert_eq!(console.game().history().to_string(), "1. e4 e5");

        run(&mut console, "undo").unwrap();
        assert_eq!(console.game().history().len(), 1);
        run(&mut console, "redo").unwrap();
        assert_eq!(console.game().history().len(), 2);

        assert!(run(&mut console, "move e5 e3").is_err());
        assert!(run(&mut console, "moves").is_err());
        run(&mut console, "moves g1 --pretty").unwrap();
    }

    #[test]
    fn test_board_edits_keep_turn() {
        let mut console = Console::new();
        run(&mut console, "move e2 e4").unwrap();

        run(&mut console, "take e7").unwrap();
        run(&mut console, "place Q e6").unwrap();
        let board = console.game().board();
        assert_eq!(board.piece_at("e7".parse().unwrap()), None);
        assert_eq!(board.piece_at("e6".parse().unwrap()).map(|p| p.to_char()), Some('Q'));
        assert_eq!(console.game().side_to_move(), crate::Color::Black);
        assert!(console.game().history().is_empty());
    }

    #[test]
    fn test_board_edits_keep_theme() {
        let mut console = Console::new();
        run(&mut console, "reset --theme wood").unwrap();

        run(&mut console, "take a7").unwrap();
        let board = console.game().board();
        assert_eq!(board.pieces().count(), 31);
        assert!(board.pieces().all(|(_, piece)| piece.theme() == crate::Theme::Wood));

        // A later reset picks the theme up from the board
        run(&mut console, "reset").unwrap();
        assert!(console
            .game()
            .board()
            .pieces()
            .all(|(_, piece)| piece.theme() == crate::Theme::Wood));
    }

    #[test]
    fn test_position_and_reset() {
        let mut console = Console::new();

        run(&mut console, "position r3k2r/8/8/8/8/8/8/R3K2R b Kq").unwrap();
        assert_eq!(console.game().side_to_move(), crate::Color::Black);
        assert_eq!(console.game().castling_rights().to_string(), "Kq");
        assert!(run(&mut console, "position 8/8 w").is_err());

        run(&mut console, "reset --theme wood").unwrap();
        assert_eq!(console.game().board(), &{
            let mut board = Board::new();
            board.standard_setup_with_theme(crate::Theme::Wood);
            board
        });
    }
}
