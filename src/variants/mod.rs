//! Variants: a province graph, a starting position and a victory condition.
//!
//! The adjudication rules are shared; a variant only supplies data.

pub mod classical;

use crate::board::state::{Board, Phase};
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    /// Supply centers needed for a solo victory.
    pub solo_threshold: usize,
    pub start: fn() -> Result<Board>,
    /// An empty board in the given phase.
    pub blank: fn(Phase) -> Board,
}

pub const VARIANTS: &[Variant] = &[classical::VARIANT];

/// Finds a variant by name, ignoring case.
pub fn lookup(name: &str) -> Result<&'static Variant> {
    VARIANTS
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownVariant(name.to_string()))
}

impl Variant {
    /// The starting position with `config`'s house rules applied.
    pub fn new_game(&self, config: &Config) -> Result<Board> {
        Ok((self.start)()?.with_flags(config.flags))
    }

    /// The solo threshold `config` asks for, or this variant's default.
    pub fn threshold(&self, config: &Config) -> usize {
        config.solo_threshold.unwrap_or(self.solo_threshold)
    }
}
