//! Replay index navigation.
//!
//! The index counts moves already applied, so it ranges over
//! `0..=len`. Every operation keeps it inside that range.

/// Position within a move sequence of length `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Creates a cursor at the start of a sequence of `len` moves.
    pub const fn new(len: usize) -> Self {
        Cursor { index: 0, len }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once every move has been applied.
    pub const fn is_at_end(&self) -> bool {
        self.index >= self.len
    }

    /// Steps one move forward. Returns whether the index changed.
    pub fn forward(&mut self) -> bool {
        let next = (self.index + 1).min(self.len);
        let moved = next != self.index;
        self.index = next;
        moved
    }

    /// Steps one move back. Returns whether the index changed.
    pub fn backward(&mut self) -> bool {
        let moved = self.index > 0;
        self.index = self.index.saturating_sub(1);
        moved
    }

    /// Jumps to `target`, clamped to `0..=len`.
    pub fn jump(&mut self, target: i64) {
        self.index = target.clamp(0, self.len as i64) as usize;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Switches to a new sequence length and rewinds to the start.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }
}
