//! Province and nation identifiers.
//!
//! Provinces are named by short lowercase ids such as `par` or `stp`. A
//! province with several coasts exposes each coast as its own sub-province
//! (`stp/nc`, `stp/sc`) sharing the parent's supply center and identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between a province id and its coast suffix.
pub const COAST_SEPARATOR: char = '/';

/// A province or coast on the map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Province(String);

impl Province {
    pub fn new(name: impl Into<String>) -> Self {
        Province(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent id, without any coast suffix.
    pub fn base(&self) -> &str {
        match self.0.split_once(COAST_SEPARATOR) {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    /// Returns the coast suffix, if this is a coast sub-province.
    pub fn coast(&self) -> Option<&str> {
        self.0.split_once(COAST_SEPARATOR).map(|(_, coast)| coast)
    }

    /// Returns the parent ("super") province.
    pub fn super_province(&self) -> Province {
        Province(self.base().to_string())
    }

    /// True if this province is not a coast of some other province.
    pub fn is_super(&self) -> bool {
        self.coast().is_none()
    }

    /// True if both name the same parent province.
    pub fn same_super(&self, other: &Province) -> bool {
        self.base() == other.base()
    }

    /// True if `other` is this province, or one of its coasts when this is a parent.
    pub fn contains(&self, other: &Province) -> bool {
        self == other || (self.is_super() && self.0 == other.base())
    }

    /// Joins a coast suffix onto this province. An empty coast yields the parent.
    pub fn join(&self, coast: &str) -> Province {
        if coast.is_empty() {
            self.super_province()
        } else {
            Province(format!("{}{}{}", self.base(), COAST_SEPARATOR, coast))
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Province {
    fn from(name: &str) -> Self {
        Province::new(name)
    }
}

impl From<String> for Province {
    fn from(name: String) -> Self {
        Province(name)
    }
}

/// A player nation, or the neutral owner of unclaimed supply centers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nation(String);

/// Owner recorded for supply centers nobody starts with.
pub const NEUTRAL: &str = "Neutral";

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Nation(name.into())
    }

    pub fn neutral() -> Self {
        Nation(NEUTRAL.to_string())
    }

    pub fn is_neutral(&self) -> bool {
        self.0 == NEUTRAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Nation {
    fn from(name: &str) -> Self {
        Nation::new(name)
    }
}
