/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tempo::{Bitboard, Board, ClickOutcome, Color, Game, MoveRecord, Square};

fn sq(row: i32, col: i32) -> Square {
    Square::from_coords(row, col).unwrap()
}

/// Plays `from` to `to` through two clicks, the way a graphical board would.
fn click_move(game: &mut Game, from: (i32, i32), to: (i32, i32)) -> MoveRecord {
    let selected = game.click(from.0, from.1);
    assert!(
        matches!(selected, ClickOutcome::Selected { .. }),
        "clicking {from:?} should select it, got {selected:?}"
    );

    match game.click(to.0, to.1) {
        ClickOutcome::Moved(record) => record,
        other => panic!("moving {from:?} to {to:?} should succeed, got {other:?}\n{game}"),
    }
}

/// Plays `from` to `to`, then checks that undoing it restores the board and side to move exactly.
fn assert_undo_restores(game: &mut Game, from: (i32, i32), to: (i32, i32)) -> MoveRecord {
    let board = *game.board();
    let side = game.side_to_move();
    let rights = game.castling_rights();
    let len = game.history().len();

    let record = click_move(game, from, to);
    assert_ne!(game.board(), &board);
    assert_eq!(game.side_to_move(), side.opponent());

    let undone = game.undo().unwrap();
    assert_eq!(undone, record);
    assert_eq!(game.board(), &board, "undoing {record} did not restore the board");
    assert_eq!(game.side_to_move(), side);
    assert_eq!(game.castling_rights(), rights);
    assert_eq!(game.history().len(), len);

    record
}

fn mask_of(squares: &[(i32, i32)]) -> Bitboard {
    squares.iter().map(|&(row, col)| sq(row, col)).collect()
}

#[cfg(test)]
mod undo {
    use super::*;

    #[test]
    fn test_quiet_move() {
        let mut game = Game::new();
        let record = assert_undo_restores(&mut game, (7, 6), (5, 5));
        assert_eq!(record.to_string(), "Nf3");
    }

    #[test]
    fn test_capture() {
        let mut game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        let record = assert_undo_restores(&mut game, (4, 4), (3, 3));
        assert!(record.is_capture());
        assert_eq!(record.to_string(), "exd5");
    }

    #[test]
    fn test_kingside_castle() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();
        let record = assert_undo_restores(&mut game, (7, 4), (7, 6));
        assert!(record.is_short_castle());
        assert_eq!(record.to_string(), "O-O");
    }

    #[test]
    fn test_queenside_castle() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq").unwrap();
        let record = assert_undo_restores(&mut game, (0, 4), (0, 2));
        assert!(record.is_long_castle());
        assert_eq!(record.to_string(), "O-O-O");
    }

    #[test]
    fn test_promotion() {
        let mut game = Game::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w").unwrap();

        let record = assert_undo_restores(&mut game, (1, 0), (0, 0));
        assert_eq!(record.to_string(), "a8=Q");

        let record = assert_undo_restores(&mut game, (1, 0), (0, 1));
        assert_eq!(record.to_string(), "axb8=Q");
    }

    #[test]
    fn test_en_passant() {
        let mut game = Game::new();
        click_move(&mut game, (6, 0), (5, 0));
        click_move(&mut game, (1, 2), (3, 2));
        click_move(&mut game, (6, 7), (5, 7));
        click_move(&mut game, (3, 2), (4, 2));
        click_move(&mut game, (6, 3), (4, 3));

        let record = assert_undo_restores(&mut game, (4, 2), (5, 3));
        assert!(record.is_en_passant());
    }

    #[test]
    fn test_undo_everything() {
        let mut game = Game::new();
        click_move(&mut game, (6, 4), (4, 4));
        click_move(&mut game, (1, 3), (3, 3));
        click_move(&mut game, (4, 4), (3, 3));
        click_move(&mut game, (0, 3), (3, 3));

        while game.undo().is_some() {}
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.undo().is_none());
    }

    #[test]
    fn test_undo_drops_selection() {
        let mut game = Game::new();
        click_move(&mut game, (6, 4), (4, 4));
        game.click(1, 4);
        assert!(game.selected().is_some());

        game.undo().unwrap();
        assert!(game.selected().is_none());
        assert!(game.legal_moves().is_empty());

        // Even with nothing to undo
        game.click(6, 4);
        assert!(game.undo().is_none());
        assert!(game.selected().is_none());
    }
}

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn test_bishop_on_empty_board() {
        let mut game = Game::from_fen("8/8/8/8/4B3/8/8/8").unwrap();
        let ClickOutcome::Selected { moves, .. } = game.click(4, 4) else {
            panic!("bishop should be selectable");
        };

        let expected = mask_of(&[
            (3, 3),
            (2, 2),
            (1, 1),
            (0, 0),
            (3, 5),
            (2, 6),
            (1, 7),
            (5, 3),
            (6, 2),
            (7, 1),
            (5, 5),
            (6, 6),
            (7, 7),
        ]);
        assert_eq!(moves, expected);
        assert_eq!(moves.population(), 13);
        assert_eq!(game.legal_moves().to_grid(), expected.to_grid());
    }

    #[test]
    fn test_bishop_stops_at_enemy() {
        let game = Game::from_fen("8/8/2p5/8/4B3/8/8/8").unwrap();
        let moves = game.moves_from(sq(4, 4));

        assert!(moves.contains(sq(3, 3)));
        assert!(moves.contains(sq(2, 2)));
        assert!(!moves.contains(sq(1, 1)));
        assert!(!moves.contains(sq(0, 0)));
        assert_eq!(moves.population(), 11);
    }

    #[test]
    fn test_pawn_on_empty_board() {
        let game = Game::from_fen("8/8/8/8/8/8/4P3/8").unwrap();
        assert_eq!(game.moves_from(sq(6, 4)), mask_of(&[(5, 4), (4, 4)]));

        let game = Game::from_fen("8/8/8/8/4p3/8/4P3/8").unwrap();
        assert_eq!(game.moves_from(sq(6, 4)), mask_of(&[(5, 4)]));
    }

    #[test]
    fn test_selecting_empty_square_yields_nothing() {
        let mut game = Game::new();
        assert_eq!(game.click(4, 4), ClickOutcome::Deselected);
        assert!(game.moves_from(sq(4, 4)).is_empty());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);

        // Black cannot move first
        game.click(1, 4);
        assert_eq!(game.click(3, 4), ClickOutcome::Deselected);
        assert_eq!(game.side_to_move(), Color::White);

        click_move(&mut game, (6, 4), (4, 4));
        assert_eq!(game.side_to_move(), Color::Black);

        // White cannot move twice
        game.click(6, 3);
        assert_eq!(game.click(4, 3), ClickOutcome::Deselected);

        click_move(&mut game, (1, 4), (3, 4));
        assert_eq!(game.side_to_move(), Color::White);
    }
}

#[cfg(test)]
mod castling {
    use super::*;

    const OPEN: &str = "4k3/8/8/8/8/8/8/4K2R w K";

    #[test]
    fn test_kingside_allowed() {
        let game = Game::from_fen(OPEN).unwrap();
        assert!(game.moves_from(sq(7, 4)).contains(sq(7, 6)));
    }

    #[test]
    fn test_kingside_needs_empty_squares() {
        for blocker in ["4k3/8/8/8/8/8/8/4KB1R w K", "4k3/8/8/8/8/8/8/4K1NR w K"] {
            let game = Game::from_fen(blocker).unwrap();
            assert!(!game.moves_from(sq(7, 4)).contains(sq(7, 6)), "{blocker}");
        }
    }

    #[test]
    fn test_kingside_needs_safe_squares() {
        // Rook attacks on e1, f1, and g1 respectively
        for attacked in [
            "4k3/8/8/8/8/8/8/r3K2R w K",
            "4kr2/8/8/8/8/8/8/4K2R w K",
            "4k1r1/8/8/8/8/8/8/4K2R w K",
        ] {
            let game = Game::from_fen(attacked).unwrap();
            assert!(!game.moves_from(sq(7, 4)).contains(sq(7, 6)), "{attacked}");
        }

        // An attack on h1 alone does not matter
        let game = Game::from_fen("4k2r/8/8/8/8/8/8/4K2R w K").unwrap();
        assert!(game.moves_from(sq(7, 4)).contains(sq(7, 6)));
    }

    #[test]
    fn test_king_move_revokes_rights() {
        let mut game = Game::from_fen("r3k2r/7p/8/8/8/8/8/R3K2R w KQkq").unwrap();

        click_move(&mut game, (7, 4), (7, 5));
        click_move(&mut game, (1, 7), (2, 7));
        click_move(&mut game, (7, 5), (7, 4));
        click_move(&mut game, (2, 7), (3, 7));

        // The King is back on its original square, but the rights are gone
        assert_eq!(game.board().to_fen(), "r3k2r/8/8/7p/8/8/8/R3K2R");
        assert_eq!(game.castling_rights().to_string(), "kq");
        assert!(!game.moves_from(sq(7, 4)).contains(sq(7, 6)));
        assert!(!game.moves_from(sq(7, 4)).contains(sq(7, 2)));
    }

    #[test]
    fn test_rook_move_revokes_one_side() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();
        click_move(&mut game, (7, 7), (6, 7));
        assert_eq!(game.castling_rights().to_string(), "Qkq");

        game.undo().unwrap();
        assert_eq!(game.castling_rights().to_string(), "KQkq");
    }
}

#[cfg(test)]
mod en_passant {
    use super::*;

    fn setup() -> Game {
        let mut game = Game::new();
        click_move(&mut game, (6, 0), (5, 0));
        click_move(&mut game, (1, 2), (3, 2));
        click_move(&mut game, (6, 7), (5, 7));
        click_move(&mut game, (3, 2), (4, 2));
        click_move(&mut game, (6, 3), (4, 3));
        game
    }

    #[test]
    fn test_capture() {
        let mut game = setup();

        let ClickOutcome::Selected { moves, .. } = game.click(4, 2) else {
            panic!("black pawn should be selectable");
        };
        assert!(moves.contains(sq(5, 3)));

        let ClickOutcome::Moved(record) = game.click(5, 3) else {
            panic!("en passant should execute");
        };
        assert!(record.is_en_passant());
        assert_eq!(record.capture_square(), sq(4, 3));
        assert_eq!(record.to_string(), "cxd3 e.p.");
        assert_eq!(game.piece_at(4, 3), None);
        assert_eq!(game.piece_at(4, 2), None);
        assert!(game.piece_at(5, 3).is_some_and(|p| p.is_pawn() && p.color() == Color::Black));
    }

    #[test]
    fn test_only_immediately_after_double_push() {
        let mut game = setup();

        // Black waits a move, and the chance is gone
        click_move(&mut game, (1, 7), (2, 7));
        click_move(&mut game, (5, 0), (4, 0));
        assert!(!game.moves_from(sq(4, 2)).contains(sq(5, 3)));
    }

    #[test]
    fn test_needs_more_than_two_moves() {
        // The same double push as the first move of a game is not enough history
        let mut game = Game::from_fen("4k3/8/8/8/2p5/8/3P4/4K3 w").unwrap();
        click_move(&mut game, (6, 3), (4, 3));
        assert_eq!(game.history().len(), 1);
        assert!(!game.moves_from(sq(4, 2)).contains(sq(5, 3)));
    }

    #[test]
    fn test_two_single_steps_are_not_a_double_push() {
        let mut game = Game::from_fen("4k3/8/8/8/2p5/8/3P4/4K3 w").unwrap();
        click_move(&mut game, (6, 3), (5, 3));
        click_move(&mut game, (0, 4), (1, 4));
        let record = click_move(&mut game, (5, 3), (4, 3));

        // The white pawn now stands beside the black one, but arrived one step at a time
        assert!(!record.is_pawn_double_push());
        assert_eq!(game.history().len(), 3);
        assert!(!game.moves_from(sq(4, 2)).contains(sq(5, 3)));
    }
}

#[cfg(test)]
mod history {
    use super::*;

    #[test]
    fn test_movetext() {
        let mut game = Game::new();
        click_move(&mut game, (6, 4), (4, 4));
        click_move(&mut game, (1, 4), (3, 4));
        click_move(&mut game, (7, 6), (5, 5));
        click_move(&mut game, (0, 1), (2, 2));

        let names = game
            .history()
            .iter()
            .map(|record| record.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(game.history().to_string(), "1. e4 e5 2. Nf3 Nc6");
    }

    #[test]
    fn test_full_history_rejects_moves() {
        let mut game = Game::new();

        // Shuffle the knights back and forth until the history is full
        let cycle = [
            ((7, 6), (5, 5)),
            ((0, 6), (2, 5)),
            ((5, 5), (7, 6)),
            ((2, 5), (0, 6)),
        ];
        for _ in 0..tempo::HISTORY_CAPACITY / cycle.len() {
            for (from, to) in cycle {
                click_move(&mut game, from, to);
            }
        }
        assert_eq!(game.history().len(), tempo::HISTORY_CAPACITY);

        let board = *game.board();
        assert!(game.make_move(sq(6, 4), sq(4, 4)).is_err());

        game.click(6, 4);
        assert_eq!(game.click(4, 4), ClickOutcome::Deselected);

        assert_eq!(game.board(), &board);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.history().len(), tempo::HISTORY_CAPACITY);
    }
}
