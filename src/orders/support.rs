//! Support orders, for a unit holding or for a move.

use log::trace;

use super::common::{any_move_possible, any_support_possible, possible_moves};
use super::{OptionKey, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::PhaseType;
use crate::board::unit::UnitType;
use crate::error::{Inconsistency, OrderError, Outcome};
use crate::resolve::{Lookup, Resolver, Validator};

/// Validates `source S target H` (`to` is `None`) or `source S target - to`.
pub fn validate(
    source: &mut Province,
    target: &mut Province,
    to: Option<&mut Province>,
    v: &mut Validator<'_>,
) -> Result<Nation, OrderError> {
    let board = v.board();
    if board.phase().kind != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !board.graph().has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !board.graph().has(target) {
        return Err(OrderError::InvalidTarget);
    }
    let (at, unit) = board.unit(source).ok_or(OrderError::MissingUnit)?;
    *source = at;
    let (at, supported) = board.unit(target).ok_or(OrderError::MissingSupportUnit)?;
    *target = at;

    match to {
        None => {
            any_support_possible(v, unit.unit_type, source, target)
                .map_err(|_| OrderError::IllegalSupportPosition)?;
        }
        Some(to) => {
            if !v.board().graph().has(to) {
                return Err(OrderError::InvalidTarget);
            }
            any_support_possible(v, unit.unit_type, source, to)
                .map_err(|_| OrderError::IllegalSupportDestination)?;
            let lax = supported.unit_type == UnitType::Army;
            any_move_possible(v, supported.unit_type, target, to, lax, true, false)
                .map_err(|_| OrderError::IllegalSupportMove)?;
        }
    }
    Ok(unit.nation)
}

/// A support is cut by any foreign attack that could succeed, except one
/// from the province the supported move goes to; it is always cut by an
/// attack that does succeed.
pub fn adjudicate(source: &Province, to: Option<&Province>, r: &mut Resolver<'_>) -> Outcome {
    let Some((_, unit)) = r.board().unit(source) else {
        return Err(OrderError::MissingUnit);
    };

    let breaks = r.find(|r, found| {
        let (Some(attacker), Some((a_src, a_dst))) =
            (&found.unit, found.order.as_ref().and_then(|o| o.move_targets()))
        else {
            return false;
        };
        if !a_dst.same_super(source) || attacker.nation == unit.nation {
            return false;
        }
        if to.is_some_and(|to| a_src.same_super(to)) {
            return false;
        }
        let lax = attacker.unit_type == UnitType::Army;
        any_move_possible(r, attacker.unit_type, a_src, a_dst, lax, true, true).is_ok()
    });
    if let Some(cut) = breaks.first() {
        trace!("support in {} cut by {}", source, cut.province);
        return Err(OrderError::SupportBroken(cut.province.clone()));
    }

    let dislodgers = r.find(|r, found| {
        let (Some(attacker), Some((_, a_dst))) =
            (&found.unit, found.order.as_ref().and_then(|o| o.move_targets()))
        else {
            return false;
        };
        a_dst.same_super(source)
            && attacker.nation != unit.nation
            && r.resolve(&found.province).is_ok()
    });
    if let Some(dislodger) = dislodgers.first() {
        trace!("support in {} dislodged by {}", source, dislodger.province);
        return Err(OrderError::SupportBroken(dislodger.province.clone()));
    }
    Ok(())
}

/// Flags a support for an own unit that is ordered to do something else.
pub fn corroborate(
    source: &Province,
    target: &Province,
    to: Option<&Province>,
    v: &Validator<'_>,
) -> Option<Inconsistency> {
    let board = v.board();
    let (_, supporter) = board.unit(source)?;
    let (_, supportee) = board.unit(target)?;
    if supportee.nation != supporter.nation {
        return None;
    }
    let matches = match (board.order(target).map(|(_, o)| o), to) {
        (Some(Order::Move { dest, .. }), Some(to)) => dest == *to,
        (Some(Order::Move { .. }), None) => false,
        (_, to) => to.is_none(),
    };
    (!matches).then(|| Inconsistency::MismatchedSupporter(target.super_province()))
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    if v.board().phase().kind != PhaseType::Movement || !v.board().graph().has(src) {
        return result;
    }
    let Some((at, supporter)) = v.board().unit(src) else {
        return result;
    };
    if &supporter.nation != nation {
        return result;
    }
    let units: Vec<(Province, UnitType)> = v
        .board()
        .units()
        .iter()
        .filter(|(prov, _)| **prov != at)
        .map(|(prov, unit)| (prov.clone(), unit.unit_type))
        .collect();

    for supportable in possible_moves(v, src, false, false) {
        if let Some((holder, _)) = v.board().unit(&supportable) {
            let holder = holder.super_province();
            result
                .insert(OptionKey::Source(at.clone()))
                .insert(OptionKey::Province(holder.clone()))
                .insert(OptionKey::Province(holder));
        }
        for (mv_src, unit_type) in &units {
            if let Ok(mv_dst) = any_move_possible(v, *unit_type, mv_src, &supportable, true, true, false) {
                result
                    .insert(OptionKey::Source(at.clone()))
                    .insert(OptionKey::Province(mv_src.super_province()))
                    .insert(OptionKey::Province(mv_dst.super_province()));
            }
        }
    }
    result
}
