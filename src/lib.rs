//! Qipu: a Xiangqi game-manual replay library.
//!
//! Exposes the board representation, the replay engine, the manual catalog,
//! position-string encoding and the analysis proxy for use by the viewer and
//! proxy binaries and by integration tests.

pub mod analysis;
pub mod board;
pub mod config;
pub mod manual;
pub mod protocol;
pub mod replay;
pub mod viewer;
