//! Replay session state.
//!
//! A `Session` is everything the viewer needs to show one variation: the
//! initial layout, the active move list, the replay cursor and the autoplay
//! timer. Manual navigation always cancels autoplay first, and loading a new
//! move list rewinds to the start.

use std::time::{Duration, Instant};

use log::debug;

use super::autoplay::{Autoplay, AutoplayHandle};
use super::cursor::Cursor;
use super::engine::derive_board;
use crate::board::{Board, Side};
use crate::manual::Move;
use crate::protocol::position::encode_position;

/// Default autoplay period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1500);

/// Replay state for a single move sequence.
#[derive(Debug, Clone)]
pub struct Session {
    initial: Board,
    moves: Vec<Move>,
    cursor: Cursor,
    autoplay: Autoplay,
    period: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Board::opening(), DEFAULT_PERIOD)
    }
}

impl Session {
    /// Creates an empty session over `initial`.
    pub fn new(initial: Board, period: Duration) -> Self {
        Session {
            initial,
            moves: Vec::new(),
            cursor: Cursor::new(0),
            autoplay: Autoplay::new(),
            period,
        }
    }

    /// Replaces the active move list and rewinds to index 0.
    pub fn load(&mut self, moves: Vec<Move>) {
        self.autoplay.cancel_all();
        self.cursor.set_len(moves.len());
        self.moves = moves;
        debug!("loaded {} moves", self.moves.len());
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves applied to the displayed board.
    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Steps forward one move. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        self.autoplay.cancel_all();
        self.cursor.forward()
    }

    /// Steps back one move. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        self.autoplay.cancel_all();
        self.cursor.backward()
    }

    /// Jumps to `target`, clamped to the sequence.
    pub fn jump(&mut self, target: i64) {
        self.autoplay.cancel_all();
        self.cursor.jump(target);
    }

    /// Stops autoplay and rewinds to the initial layout.
    pub fn reset(&mut self) {
        self.autoplay.cancel_all();
        self.cursor.reset();
    }

    /// Starts autoplay from `now`. Returns `None` without starting a timer
    /// when there is nothing left to play.
    pub fn play(&mut self, now: Instant) -> Option<AutoplayHandle> {
        if self.cursor.is_at_end() {
            self.autoplay.cancel_all();
            return None;
        }
        Some(self.autoplay.start(now, self.period))
    }

    /// Cancels a specific autoplay timer.
    pub fn cancel(&mut self, handle: AutoplayHandle) -> bool {
        self.autoplay.cancel(handle)
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_active()
    }

    /// When autoplay next wants to advance.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.autoplay.next_deadline()
    }

    /// Advances for every autoplay period elapsed by `now`. Stops the timer
    /// once the last move is applied. Returns whether the index changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.autoplay.poll(now);
        let mut moved = false;
        for _ in 0..fired {
            if !self.cursor.forward() {
                break;
            }
            moved = true;
        }
        if self.autoplay.is_active() && self.cursor.is_at_end() {
            self.autoplay.cancel_all();
            debug!("autoplay finished at move {}", self.cursor.index());
        }
        moved
    }

    /// Derives the board for the current index.
    pub fn board(&self) -> Board {
        derive_board(&self.initial, &self.moves, self.cursor.index())
    }

    /// Red moves on even indices.
    pub fn side_to_move(&self) -> Side {
        if self.cursor.index() % 2 == 0 {
            Side::Red
        } else {
            Side::Black
        }
    }

    /// Encodes the current board for analysis.
    pub fn position(&self) -> String {
        encode_position(&self.board(), self.side_to_move() == Side::Red)
    }

    /// The most recently applied move.
    pub fn current_move(&self) -> Option<&Move> {
        self.cursor
            .index()
            .checked_sub(1)
            .and_then(|i| self.moves.get(i))
    }
}
