//! Board representation.
//!
//! Contains the piece alphabet, raw board coordinates, and the 10x9 grid
//! that replay derives positions on.

pub mod grid;
pub mod piece;
pub mod square;

pub use grid::{Board, Cell, COLS, ROWS};
pub use piece::{glyph_to_fen_char, Piece, PieceKind, Side};
pub use square::Square;
