//! Replay and encoding properties checked over every built-in variation.

use qipu::board::{Board, Square, COLS, ROWS};
use qipu::manual::{Catalog, Move};
use qipu::protocol::{encode_position, validate_position};
use qipu::replay::{apply_move, derive_board, Session};

fn all_variations() -> Vec<Vec<Move>> {
    let catalog = Catalog::builtin().unwrap();
    catalog
        .manuals
        .iter()
        .flat_map(|m| m.variations.iter().map(|v| v.moves.clone()))
        .collect()
}

/// Squares whose contents differ between two boards, in row order.
fn changed(a: &Board, b: &Board) -> Vec<Square> {
    all_squares().filter(|sq| a.get(*sq) != b.get(*sq)).collect()
}

fn all_squares() -> impl Iterator<Item = Square> {
    (0..ROWS as i32).flat_map(|row| (0..COLS as i32).map(move |col| Square::new(row, col)))
}

fn mv(from: (i32, i32), to: (i32, i32), piece: char) -> Move {
    Move::new("", Square::new(from.0, from.1), Square::new(to.0, to.1), piece)
}

#[test]
fn consecutive_boards_differ_only_at_the_moved_squares() {
    let initial = Board::opening();
    for moves in all_variations() {
        for k in 0..moves.len() {
            let before = derive_board(&initial, &moves, k);
            let after = derive_board(&initial, &moves, k + 1);
            let touched = changed(&before, &after);

            let mut scratch = before.clone();
            if apply_move(&mut scratch, &moves[k]) {
                assert!(touched.len() <= 2, "move {} changed {:?}", k, touched);
                assert!(touched
                    .iter()
                    .all(|sq| *sq == moves[k].from || *sq == moves[k].to));
            } else {
                assert!(touched.is_empty());
            }
        }
    }
}

#[test]
fn index_zero_equals_initial() {
    let initial = Board::opening();
    for moves in all_variations() {
        assert_eq!(derive_board(&initial, &moves, 0), initial);
    }
}

#[test]
fn rederivation_gives_independent_equal_boards() {
    let initial = Board::opening();
    let moves = &all_variations()[0];
    let mut a = derive_board(&initial, moves, 3);
    let b = derive_board(&initial, moves, 3);
    assert_eq!(a, b);

    a.set(Square::new(4, 4), Some('兵'));
    assert_ne!(a, b);
    assert_eq!(derive_board(&initial, moves, 3), b);
    assert_eq!(initial, Board::opening());
}

#[test]
fn every_derived_position_is_well_formed() {
    let initial = Board::opening();
    for moves in all_variations() {
        for k in 0..=moves.len() {
            let fen = encode_position(&derive_board(&initial, &moves, k), k % 2 == 0);
            let board_part = fen.split(' ').next().unwrap();
            let ranks: Vec<&str> = board_part.split('/').collect();
            assert_eq!(ranks.len(), ROWS);
            for rank in ranks {
                let width: u32 = rank.chars().map(|c| c.to_digit(10).unwrap_or(1)).sum();
                assert_eq!(width, COLS as u32, "{}", fen);
            }
            assert_eq!(validate_position(&fen), Ok(()));
        }
    }
}

#[test]
fn off_board_moves_only_lose_their_own_effect() {
    let initial = Board::opening();
    let moves = vec![
        mv((7, 1), (7, 4), '炮'),
        mv((-1, 0), (5, 5), '車'),
        mv((2, 7), (12, 4), '砲'),
        mv((0, 9), (1, 1), '馬'),
        mv((9, 1), (7, 2), '马'),
    ];
    let board = derive_board(&initial, &moves, moves.len());
    assert_eq!(
        changed(&initial, &board),
        vec![
            Square::new(7, 1),
            Square::new(7, 2),
            Square::new(7, 4),
            Square::new(9, 1),
        ]
    );
}

#[test]
fn single_cannon_move_scenario() {
    let initial = Board::opening();
    let moves = vec![mv((7, 1), (7, 4), '炮')];
    let board = derive_board(&initial, &moves, 1);

    assert_eq!(board.get(Square::new(7, 1)), None);
    assert_eq!(board.get(Square::new(7, 4)), Some('炮'));
    let unchanged = all_squares()
        .filter(|sq| board.get(*sq) == initial.get(*sq))
        .count();
    assert_eq!(unchanged, 88);
}

#[test]
fn empty_move_list_always_yields_initial() {
    let initial = Board::opening();
    for index in [0, 1, 5, usize::MAX] {
        assert_eq!(derive_board(&initial, &[], index), initial);
    }
}

#[test]
fn opening_encodes_with_red_to_move() {
    let fen = encode_position(&Board::opening(), true);
    assert!(fen.starts_with("rnbakabnr/"));
    assert!(fen.contains("/RNBAKABNR w "));
}

#[test]
fn session_position_alternates_turns() {
    let mut session = Session::default();
    session.load(all_variations()[0].clone());
    assert!(session.position().contains(" w "));
    session.next();
    assert!(session.position().contains(" b "));
    session.next();
    assert!(session.position().contains(" w "));
}
