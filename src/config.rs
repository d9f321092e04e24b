//! Game configuration.
//!
//! A [`Config`] picks the variant and the optional house rules. It can be
//! read from JSON, and individual values can be changed with
//! [`Config::set_option`] using the same names the protocol's `setoption`
//! command accepts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// House rules that relax where builds are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFlags {
    /// Builds are allowed in any owned supply center.
    pub anywhere: bool,
    /// Builds are allowed in any owned home center, whoever it was home to.
    pub any_home_center: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: String,
    pub flags: RuleFlags,
    /// Supply centers needed for a solo victory; the variant default if unset.
    pub solo_threshold: Option<usize>,
    /// Shuffles the order provinces are first resolved in, from this seed.
    /// Outcomes must not change; this exists to check that they do not.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            variant: crate::variants::classical::NAME.to_string(),
            flags: RuleFlags::default(),
            solo_threshold: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Config::from_json(&text)
    }

    /// Applies one named option. Boolean options default to `true` when no
    /// value is given.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match name.to_ascii_lowercase().as_str() {
            "variant" => {
                self.variant = value
                    .ok_or_else(|| Error::Config("variant needs a value".to_string()))?
                    .to_string();
            }
            "anywhere" => self.flags.anywhere = parse_bool(name, value)?,
            "anyhomecenter" => self.flags.any_home_center = parse_bool(name, value)?,
            "solothreshold" => {
                let raw = value.ok_or_else(|| Error::Config(format!("{} needs a value", name)))?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| Error::Config(format!("{}: not a number: {}", name, raw)))?;
                self.solo_threshold = Some(n);
            }
            "seed" => {
                self.seed = match value {
                    None => None,
                    Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                        Error::Config(format!("{}: not a number: {}", name, raw))
                    })?),
                };
            }
            _ => return Err(Error::Config(format!("unknown option '{}'", name))),
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.to_ascii_lowercase()) {
        None => Ok(true),
        Some(v) if v == "true" || v == "1" => Ok(true),
        Some(v) if v == "false" || v == "0" => Ok(false),
        Some(v) => Err(Error::Config(format!("{}: not a boolean: {}", name, v))),
    }
}
