//! Text protocol.
//!
//! Line-oriented commands on stdin, responses on stdout. Orders use the
//! notation in [`notation`]; board snapshots travel as one-line JSON.

pub mod notation;
pub mod parser;

pub use notation::{format_orders, parse_order, parse_orders, NotationError};
pub use parser::{parse_command, Command};
