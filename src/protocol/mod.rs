//! Text protocols.
//!
//! Position-string encoding and validation for the analysis service, and the
//! command parser for the interactive viewer.

pub mod parser;
pub mod position;

pub use parser::{parse_command, Command};
pub use position::{encode_position, validate_position, PositionError};
