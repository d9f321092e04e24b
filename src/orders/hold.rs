//! Hold orders. Always succeed; what matters is the support they attract.

use super::{OptionKey, Options};
use crate::board::province::{Nation, Province};
use crate::board::state::PhaseType;
use crate::error::OrderError;
use crate::resolve::{Lookup, Validator};

pub fn validate(source: &mut Province, v: &mut Validator<'_>) -> Result<Nation, OrderError> {
    let board = v.board();
    if board.phase().kind != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !board.graph().has(source) {
        return Err(OrderError::InvalidSource);
    }
    let (at, unit) = board.unit(source).ok_or(OrderError::MissingUnit)?;
    *source = at;
    Ok(unit.nation)
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    let board = v.board();
    if board.phase().kind != PhaseType::Movement || !board.graph().has(src) {
        return result;
    }
    if let Some((at, unit)) = board.unit(src) {
        if &unit.nation == nation {
            result.insert(OptionKey::Source(at));
        }
    }
    result
}
