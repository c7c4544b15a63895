//! Board derivation from a move list.
//!
//! The displayed board is always rebuilt from the initial layout by
//! applying the first `index` moves in order. Nothing is cached between
//! calls, so any index can be shown at any time without tracking history.

use log::trace;

use crate::board::Board;
use crate::manual::Move;

/// Applies a single move to `board`.
///
/// The glyph on the source square is moved to the destination. Moves whose
/// endpoints are off the grid, or whose source square is empty, leave the
/// board untouched. Returns whether the board changed.
pub fn apply_move(board: &mut Board, mv: &Move) -> bool {
    if !mv.is_in_bounds() {
        trace!("skipping off-board move {} {} -> {}", mv.label, mv.from, mv.to);
        return false;
    }

    let Some(glyph) = board.take(mv.from) else {
        trace!("skipping move {} from empty square {}", mv.label, mv.from);
        return false;
    };

    if glyph != mv.piece {
        trace!(
            "move {} expected {} on {} but found {}",
            mv.label,
            mv.piece,
            mv.from,
            glyph
        );
    }

    board.set(mv.to, Some(glyph));
    true
}

/// Derives the board after the first `index` moves.
///
/// `initial` is never modified. An `index` past the end of `moves` applies
/// every move. The result shares no state with the input or with earlier
/// results.
pub fn derive_board(initial: &Board, moves: &[Move], index: usize) -> Board {
    let mut board = initial.clone();
    for mv in moves.iter().take(index) {
        apply_move(&mut board, mv);
    }
    board
}
