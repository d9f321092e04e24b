//! Unit types and ownership.
//!
//! Represents armies and fleets together with the nation that owns them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::province::Nation;

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    /// Returns the uppercase abbreviation used in order notation.
    pub const fn notation_char(self) -> char {
        match self {
            UnitType::Army => 'A',
            UnitType::Fleet => 'F',
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitType::Army => f.write_str("Army"),
            UnitType::Fleet => f.write_str("Fleet"),
        }
    }
}

/// A military unit on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitType,
    pub nation: Nation,
}

impl Unit {
    pub fn new(unit_type: UnitType, nation: impl Into<Nation>) -> Self {
        Unit {
            unit_type,
            nation: nation.into(),
        }
    }

    pub fn army(nation: &str) -> Self {
        Unit::new(UnitType::Army, Nation::new(nation))
    }

    pub fn fleet(nation: &str) -> Self {
        Unit::new(UnitType::Fleet, Nation::new(nation))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.nation, self.unit_type)
    }
}
