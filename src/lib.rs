//! Diplomacy order adjudicator.
//!
//! Exposes the board representation, order rules, resolver, variants and
//! the text protocol for use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod orders;
pub mod protocol;
pub mod resolve;
pub mod variants;

pub use board::{Board, Order, Phase, Province};
pub use error::{Error, OrderError, Outcome, Result};
