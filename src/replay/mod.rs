//! Move replay.
//!
//! Derives board states from a move list, and wraps that in the cursor and
//! autoplay state a viewer steps through.

pub mod autoplay;
pub mod cursor;
pub mod engine;
pub mod session;

pub use autoplay::{Autoplay, AutoplayHandle};
pub use cursor::Cursor;
pub use engine::{apply_move, derive_board};
pub use session::{Session, DEFAULT_PERIOD};
