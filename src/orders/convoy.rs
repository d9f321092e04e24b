//! Convoy orders.

use super::common::{any_convoy_path, convoy_path_possible};
use super::{OptionKey, Options};
use crate::board::province::{Nation, Province};
use crate::board::state::PhaseType;
use crate::board::unit::UnitType;
use crate::error::{Inconsistency, OrderError, Outcome};
use crate::resolve::{Lookup, Resolver, Validator};

pub fn validate(
    source: &mut Province,
    from: &mut Province,
    to: &mut Province,
    v: &mut Validator<'_>,
) -> Result<Nation, OrderError> {
    let board = v.board();
    let graph = board.graph();
    if board.phase().kind != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !graph.has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !graph.has(from) || !graph.has(to) {
        return Err(OrderError::InvalidTarget);
    }
    let on_land = graph.coasts(source).iter().any(|coast| {
        let flags = graph.flags(coast);
        flags.land() && !flags.convoyable()
    });
    if on_land {
        return Err(OrderError::IllegalConvoyPath);
    }

    let (at, convoyer) = board.unit(source).ok_or(OrderError::MissingUnit)?;
    if convoyer.unit_type != UnitType::Fleet {
        return Err(OrderError::IllegalConvoyer);
    }
    *source = at;
    let (at, convoyee) = board.unit(from).ok_or(OrderError::MissingConvoyee)?;
    if convoyee.unit_type != UnitType::Army {
        return Err(OrderError::IllegalConvoyee);
    }
    *from = at;

    if from.same_super(to) || any_convoy_path(v, from, to, false, None).is_none() {
        return Err(OrderError::IllegalConvoyMove);
    }
    Ok(convoyer.nation)
}

/// A convoy fails when a foreign attack on the fleet succeeds.
pub fn adjudicate(source: &Province, r: &mut Resolver<'_>) -> Outcome {
    let Some((_, unit)) = r.board().unit(source) else {
        return Err(OrderError::MissingUnit);
    };
    let breaks = r.find(|r, found| {
        let (Some(attacker), Some((_, a_dst))) =
            (&found.unit, found.order.as_ref().and_then(|o| o.move_targets()))
        else {
            return false;
        };
        a_dst == source && attacker.nation != unit.nation && r.resolve(&found.province).is_ok()
    });
    match breaks.first() {
        Some(attacker) => Err(OrderError::ConvoyDislodged(attacker.province.clone())),
        None => Ok(()),
    }
}

/// Flags a convoy of an own army that is not ordered along it.
pub fn corroborate(
    source: &Province,
    from: &Province,
    to: &Province,
    v: &Validator<'_>,
) -> Option<Inconsistency> {
    let board = v.board();
    let (_, convoyer) = board.unit(source)?;
    let (_, convoyee) = board.unit(from)?;
    if convoyee.nation != convoyer.nation {
        return None;
    }
    let matches = board
        .order(&from.super_province())
        .and_then(|(_, order)| {
            order
                .move_targets()
                .map(|(src, dst)| src.same_super(from) && dst.same_super(to))
        })
        .unwrap_or(false);
    (!matches).then(|| Inconsistency::MismatchedConvoyer(from.super_province()))
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    let board = v.board();
    if !src.is_super() || board.phase().kind != PhaseType::Movement || !board.graph().has(src) {
        return result;
    }
    let Some((at, convoyer)) = board.unit(src) else {
        return result;
    };
    let flags = board.graph().flags(&at);
    if convoyer.unit_type != UnitType::Fleet
        || (flags.land() && !flags.convoyable())
        || &convoyer.nation != nation
    {
        return result;
    }

    let graph = board.shared_graph();
    let armies: Vec<Province> = board
        .units()
        .iter()
        .filter(|(_, unit)| unit.unit_type == UnitType::Army)
        .map(|(prov, _)| prov.clone())
        .collect();
    let landings: Vec<Province> = graph
        .provinces()
        .into_iter()
        .filter(|prov| graph.flags(prov).land() && graph.flags(prov).sea())
        .collect();

    for army in &armies {
        for mv_src in graph.coasts(army) {
            if !graph.flags(&mv_src).sea() {
                continue;
            }
            for mv_dst in landings.iter().filter(|dst| !dst.same_super(army)) {
                if convoy_path_possible(v, &at, &mv_src, mv_dst, false).is_some() {
                    result
                        .insert(OptionKey::Source(at.clone()))
                        .insert(OptionKey::Province(army.clone()))
                        .insert(OptionKey::Province(mv_dst.clone()));
                }
            }
        }
    }
    result
}
