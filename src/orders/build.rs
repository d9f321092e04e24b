//! Build orders.
//!
//! Builds are placed in owned, empty supply centers during the adjustment
//! phase. When a nation orders more builds than its surplus allows, the
//! earliest orders (by `at`) win.

use std::cmp::Ordering;

use super::common::adjustment_status;
use super::{OptionKey, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{Board, PhaseType};
use crate::board::unit::{Unit, UnitType};
use crate::error::{Error, OrderError, Outcome, Result};
use crate::resolve::{Lookup, Resolver, Validator};

/// Whether `nation` may build in `prov` at all, given who the center is home to.
pub fn home_allows(board: &Board, prov: &Province, nation: &Nation) -> bool {
    let flags = board.flags();
    if flags.anywhere {
        return true;
    }
    match board.graph().sc(&prov.super_province()) {
        Some(home) if flags.any_home_center => !home.is_neutral(),
        Some(home) => home == nation,
        None => false,
    }
}

pub fn validate(
    source: &mut Province,
    unit_type: UnitType,
    v: &mut Validator<'_>,
) -> std::result::Result<Nation, OrderError> {
    let board = v.board();
    if board.phase().kind != PhaseType::Adjustment {
        return Err(OrderError::InvalidPhase);
    }
    let (_, me) = board
        .supply_center(source)
        .ok_or(OrderError::MissingSupplyCenter)?;
    if !home_allows(board, source, &me) {
        return Err(OrderError::HostileSupplyCenter);
    }
    if board.unit(source).is_some() {
        return Err(OrderError::OccupiedSupplyCenter);
    }
    for coast in board.graph().coasts(source) {
        if coast != *source && board.orders().contains_key(&coast) {
            return Err(OrderError::DoubleBuild(vec![source.clone(), coast]));
        }
    }
    if adjustment_status(board, &me).balance < 1 {
        return Err(OrderError::MissingSurplus);
    }
    let flags = board.graph().flags(source);
    let fits = match unit_type {
        UnitType::Army => flags.land(),
        UnitType::Fleet => flags.sea(),
    };
    if !fits {
        return Err(OrderError::IllegalUnitType);
    }
    Ok(me)
}

/// Compares two adjustment orders by time, then province.
pub(super) fn later(at: u64, source: &Province, other: &Order) -> bool {
    (Some(at), source).cmp(&(other.at(), other.source())) == Ordering::Greater
}

pub fn adjudicate(source: &Province, at: u64, r: &mut Resolver<'_>) -> Outcome {
    let Some((_, me)) = r.board().supply_center(source) else {
        return Err(OrderError::MissingSupplyCenter);
    };
    let status = adjustment_status(r.board(), &me);
    match status.builds.last() {
        Some(last) if !later(at, source, last) => Ok(()),
        _ => Err(OrderError::IllegalBuild),
    }
}

pub fn execute(source: &Province, unit_type: UnitType, board: &mut Board) -> Result<()> {
    let (_, owner) = board
        .supply_center(source)
        .ok_or_else(|| Error::UnknownProvince(source.clone()))?;
    board.set_unit(source.clone(), Unit::new(unit_type, owner))
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    let board = v.board();
    if board.phase().kind != PhaseType::Adjustment {
        return result;
    }
    let ordered = board
        .graph()
        .coasts(src)
        .iter()
        .any(|coast| board.order(coast).is_some_and(|(at, _)| at == *src));
    if ordered {
        return result;
    }
    let Some((_, me)) = board.supply_center(src) else {
        return result;
    };
    if &me != nation
        || !home_allows(board, src, &me)
        || board.unit(src).is_some()
        || adjustment_status(board, &me).balance <= 0
    {
        return result;
    }

    let mut places = vec![src.clone()];
    if !src.is_super() {
        places.push(src.super_province());
    }
    for place in places {
        let flags = board.graph().flags(&place);
        if flags.land() {
            result
                .insert(OptionKey::Unit(UnitType::Army))
                .insert(OptionKey::Source(place.clone()));
        }
        if flags.sea() {
            result
                .insert(OptionKey::Unit(UnitType::Fleet))
                .insert(OptionKey::Source(place));
        }
    }
    result
}
