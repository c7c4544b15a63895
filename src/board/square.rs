//! Board coordinates.
//!
//! A `Square` keeps the raw row/column pair exactly as it appears in manual
//! data. Imported manuals may carry coordinates outside the grid, so bounds
//! are checked when the square is used rather than when it is built.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::grid::{COLS, ROWS};

/// A (row, column) coordinate. Row 0 is black's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub const fn new(row: i32, col: i32) -> Self {
        Square { row, col }
    }

    /// Returns true if the square lies on the 10x9 grid.
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < ROWS as i32 && self.col >= 0 && self.col < COLS as i32
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

// Manual files store squares as two-element arrays.
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.row, self.col].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [row, col] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(Square { row, col })
    }
}
