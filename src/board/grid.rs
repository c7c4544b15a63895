//! The 10x9 board grid.
//!
//! Cells hold the raw manual glyph. Glyphs are opaque here: the grid stores
//! whatever a manual puts on it, and only the position encoder interprets
//! them.

use std::fmt;

use super::square::Square;

/// Number of ranks on the board.
pub const ROWS: usize = 10;

/// Number of files on the board.
pub const COLS: usize = 9;

/// Empty cell marker in `OPENING_ROWS`.
const BLANK: char = '.';

/// A board cell: empty, or holding a piece glyph.
pub type Cell = Option<char>;

/// The standard opening layout, black at the top.
const OPENING_ROWS: [&str; ROWS] = [
    "車馬象士將士象馬車",
    ".........",
    ".砲.....砲.",
    "卒.卒.卒.卒.卒",
    ".........",
    ".........",
    "兵.兵.兵.兵.兵",
    ".炮.....炮.",
    ".........",
    "车马相仕帅仕相马车",
];

/// A full board snapshot.
///
/// `Board` is a plain value: cloning produces an independent grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Returns a board with every cell empty.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Returns the standard opening position.
    pub fn opening() -> Self {
        let mut board = Board::empty();
        for (r, row) in OPENING_ROWS.iter().enumerate() {
            for (c, glyph) in row.chars().enumerate() {
                if glyph != BLANK {
                    board.cells[r][c] = Some(glyph);
                }
            }
        }
        board
    }

    /// Returns the cell at `square`, or `None` if the square is empty or off
    /// the grid.
    pub fn get(&self, square: Square) -> Cell {
        if !square.is_valid() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    /// Writes a cell. Returns false (and does nothing) when the square is off
    /// the grid.
    pub fn set(&mut self, square: Square, cell: Cell) -> bool {
        if !square.is_valid() {
            return false;
        }
        self.cells[square.row as usize][square.col as usize] = cell;
        true
    }

    /// Removes and returns the glyph at `square`.
    pub fn take(&mut self, square: Square) -> Cell {
        if !square.is_valid() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize].take()
    }

    /// Iterates over the rows from black's back rank down.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> + '_ {
        self.cells.iter()
    }
}

/// Column labels as seen from red (bottom) and black (top).
const RED_LABELS: [char; COLS] = ['九', '八', '七', '六', '五', '四', '三', '二', '一'];
const BLACK_LABELS: [char; COLS] = ['９', '８', '７', '６', '５', '４', '３', '２', '１'];

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for label in BLACK_LABELS {
            write!(f, "{label}")?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{r} ")?;
            for cell in row {
                match cell {
                    Some(glyph) => write!(f, "{glyph}")?,
                    None => write!(f, "＋")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for label in RED_LABELS {
            write!(f, "{label}")?;
        }
        writeln!(f)
    }
}
