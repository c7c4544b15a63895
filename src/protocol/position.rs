//! Position strings.
//!
//! A position string is the FEN-style text the analysis service is queried
//! with: ten ranks from black's side down, separated by `/`, with runs of
//! empty cells written as a digit, followed by the side to move.
//!
//! Format: `<rank0>/<rank1>/.../<rank9> <w|b> - - 0 1`

use crate::board::{glyph_to_fen_char, Board, Cell, Side, COLS, ROWS};

/// Trailing fields after the turn indicator. The castling and en-passant
/// placeholders carry no meaning in Xiangqi; the move counters are fixed.
const SUFFIX: &str = " - - 0 1";

/// Errors reported by `validate_position`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("position string is empty")]
    Empty,

    #[error("expected 10 ranks separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("rank {row} spans {width} columns, expected 9")]
    BadRowWidth { row: usize, width: u32 },

    #[error("missing turn indicator")]
    MissingTurn,

    #[error("invalid turn indicator: '{0}'")]
    InvalidTurn(String),
}

/// Encodes a board and side to move as a position string.
///
/// Glyphs outside the piece alphabet are dropped without adding to the
/// empty-run count, so a board holding one produces a short rank.
pub fn encode_position(board: &Board, red_to_move: bool) -> String {
    let mut result = String::with_capacity(96);

    for (r, row) in board.rows().enumerate() {
        if r > 0 {
            result.push('/');
        }
        encode_row(row, &mut result);
    }

    let side = if red_to_move { Side::Red } else { Side::Black };
    result.push(' ');
    result.push(side.fen_char());
    result.push_str(SUFFIX);
    result
}

fn encode_row(row: &[Cell; COLS], out: &mut String) {
    let mut empty = 0u32;
    for cell in row {
        match cell {
            None => empty += 1,
            Some(glyph) => {
                if empty > 0 {
                    out.push_str(&empty.to_string());
                    empty = 0;
                }
                if let Some(c) = glyph_to_fen_char(*glyph) {
                    out.push(c);
                }
            }
        }
    }
    if empty > 0 {
        out.push_str(&empty.to_string());
    }
}

/// Coarse structural check of a position string.
///
/// Accepts exactly ten `/`-separated ranks whose digits plus other
/// characters add up to nine columns each, followed by a turn indicator
/// (`w`, `b` or `r`). Piece letters and any trailing fields are not
/// checked.
pub fn validate_position(s: &str) -> Result<(), PositionError> {
    let mut fields = s.split_whitespace();
    let board = fields.next().ok_or(PositionError::Empty)?;

    let rows: Vec<&str> = board.split('/').collect();
    if rows.len() != ROWS {
        return Err(PositionError::WrongRowCount(rows.len()));
    }

    for (row, rank) in rows.iter().enumerate() {
        let width: u32 = rank.chars().map(|c| c.to_digit(10).unwrap_or(1)).sum();
        if width != COLS as u32 {
            return Err(PositionError::BadRowWidth { row, width });
        }
    }

    match fields.next() {
        None => Err(PositionError::MissingTurn),
        Some("w" | "b" | "r") => Ok(()),
        Some(other) => Err(PositionError::InvalidTurn(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    const OPENING: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

    #[test]
    fn encodes_opening() {
        assert_eq!(encode_position(&Board::opening(), true), OPENING);
    }

    #[test]
    fn black_to_move_suffix() {
        let fen = encode_position(&Board::opening(), false);
        assert!(fen.ends_with(" b - - 0 1"));
    }

    #[test]
    fn encodes_runs_around_pieces() {
        let mut board = Board::empty();
        board.set(Square::new(0, 4), Some('將'));
        board.set(Square::new(9, 0), Some('车'));
        board.set(Square::new(9, 8), Some('帅'));
        assert_eq!(
            encode_position(&board, true),
            "4k4/9/9/9/9/9/9/9/9/R7K w - - 0 1"
        );
    }

    #[test]
    fn empty_board_is_all_nines() {
        let fen = encode_position(&Board::empty(), true);
        assert_eq!(fen, "9/9/9/9/9/9/9/9/9/9 w - - 0 1");
    }

    #[test]
    fn unmapped_glyph_is_dropped() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Some('帥'));
        let fen = encode_position(&board, true);
        assert!(fen.starts_with("8/9/"));
        assert_eq!(
            validate_position(&fen),
            Err(PositionError::BadRowWidth { row: 0, width: 8 })
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let board = Board::opening();
        assert_eq!(encode_position(&board, true), encode_position(&board, true));
    }

    #[test]
    fn validates_opening() {
        assert_eq!(validate_position(OPENING), Ok(()));
        assert_eq!(
            validate_position("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR b"),
            Ok(())
        );
    }

    #[test]
    fn rejects_wrong_row_count() {
        assert_eq!(
            validate_position("9/9/9 w"),
            Err(PositionError::WrongRowCount(3))
        );
    }

    #[test]
    fn rejects_wide_rank() {
        assert_eq!(
            validate_position("rnbakabnrr/9/9/9/9/9/9/9/9/9 w"),
            Err(PositionError::BadRowWidth { row: 0, width: 10 })
        );
    }

    #[test]
    fn rejects_missing_or_bad_turn() {
        assert_eq!(
            validate_position("9/9/9/9/9/9/9/9/9/9"),
            Err(PositionError::MissingTurn)
        );
        assert_eq!(
            validate_position("9/9/9/9/9/9/9/9/9/9 x"),
            Err(PositionError::InvalidTurn("x".to_string()))
        );
        assert_eq!(validate_position("   "), Err(PositionError::Empty));
    }
}
