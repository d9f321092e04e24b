//! Disband orders, for dislodged units in retreat phases and for surplus
//! units in adjustment phases.

use super::build::later;
use super::common::adjustment_status;
use super::{OptionKey, Options};
use crate::board::province::{Nation, Province};
use crate::board::state::{Board, PhaseType};
use crate::error::{OrderError, Outcome};
use crate::resolve::{Lookup, Resolver, Validator};

pub fn validate(source: &mut Province, v: &mut Validator<'_>) -> Result<Nation, OrderError> {
    let board = v.board();
    let kind = board.phase().kind;
    if kind == PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !board.graph().has(source) {
        return Err(OrderError::InvalidTarget);
    }
    if kind == PhaseType::Retreat {
        let (at, unit) = board.dislodged(source).ok_or(OrderError::MissingUnit)?;
        *source = at;
        return Ok(unit.nation);
    }
    let (at, unit) = board.unit(source).ok_or(OrderError::MissingUnit)?;
    *source = at;
    if adjustment_status(board, &unit.nation).balance > -1 {
        return Err(OrderError::MissingDeficit);
    }
    Ok(unit.nation)
}

pub fn adjudicate(source: &Province, at: u64, r: &mut Resolver<'_>) -> Outcome {
    if r.board().phase().kind != PhaseType::Adjustment {
        return Ok(());
    }
    let Some((_, unit)) = r.board().unit(source) else {
        return Err(OrderError::MissingUnit);
    };
    let status = adjustment_status(r.board(), &unit.nation);
    match status.disbands.last() {
        Some(last) if !later(at, source, last) => Ok(()),
        _ => Err(OrderError::IllegalDisband),
    }
}

pub fn execute(source: &Province, board: &mut Board) {
    if board.phase().kind == PhaseType::Adjustment {
        board.remove_unit(source);
    } else {
        board.remove_dislodged(source);
    }
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    let board = v.board();
    if !board.graph().has(src) {
        return result;
    }
    let found = match board.phase().kind {
        PhaseType::Adjustment => board
            .unit(src)
            .filter(|(_, unit)| adjustment_status(board, &unit.nation).balance < 0),
        PhaseType::Retreat => board.dislodged(src),
        PhaseType::Movement => None,
    };
    if let Some((at, unit)) = found {
        if &unit.nation == nation {
            result.insert(OptionKey::Source(at));
        }
    }
    result
}
