//! Moves and retreats.
//!
//! A move first has to survive every other move into the same province,
//! then overcome whatever stands in the destination (a holding unit, a unit
//! moving out, or a unit coming the opposite way), and finally survive the
//! other moves once more, now that it is known whether the occupant left.

use log::trace;

use super::common::{
    any_convoy_path, any_move_possible, hold_support, move_support, must_convoy, possible_moves,
};
use super::{OptionKey, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{Found, PhaseType};
use crate::board::unit::UnitType;
use crate::error::{Error, OrderError, Outcome, Result};
use crate::resolve::{Lookup, Resolver, Validator};

pub fn validate(
    source: &mut Province,
    dest: &mut Province,
    v: &mut Validator<'_>,
) -> std::result::Result<Nation, OrderError> {
    match v.board().phase().kind {
        PhaseType::Movement => validate_movement(source, dest, v),
        PhaseType::Retreat => validate_retreat(source, dest, v),
        PhaseType::Adjustment => Err(OrderError::InvalidPhase),
    }
}

fn check_provinces(source: &Province, dest: &Province, v: &Validator<'_>) -> Outcome {
    let graph = v.board().graph();
    if !graph.has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !graph.has(dest) {
        return Err(OrderError::InvalidDestination);
    }
    if source == dest {
        return Err(OrderError::IllegalMove);
    }
    Ok(())
}

fn validate_movement(
    source: &mut Province,
    dest: &mut Province,
    v: &mut Validator<'_>,
) -> std::result::Result<Nation, OrderError> {
    check_provinces(source, dest, v)?;
    let (at, unit) = v.board().unit(source).ok_or(OrderError::MissingUnit)?;
    *source = at;
    let lax = unit.unit_type == UnitType::Army;
    *dest = any_move_possible(v, unit.unit_type, source, dest, lax, true, false)?;
    Ok(unit.nation)
}

fn validate_retreat(
    source: &mut Province,
    dest: &mut Province,
    v: &mut Validator<'_>,
) -> std::result::Result<Nation, OrderError> {
    check_provinces(source, dest, v)?;
    let (at, unit) = v.board().dislodged(source).ok_or(OrderError::MissingUnit)?;
    *source = at;
    let lax = unit.unit_type == UnitType::Army;
    *dest = any_move_possible(v, unit.unit_type, source, dest, lax, false, false)
        .map_err(|_| OrderError::IllegalMove)?;
    if v.board().unit(dest).is_some() || v.board().bounce(source, dest) {
        return Err(OrderError::IllegalRetreat);
    }
    Ok(unit.nation)
}

pub fn adjudicate(source: &Province, dest: &Province, r: &mut Resolver<'_>) -> Outcome {
    match r.board().phase().kind {
        PhaseType::Movement => adjudicate_movement(source, dest, r),
        _ => adjudicate_retreat(source, dest, r),
    }
}

/// Two retreats to the same province both fail.
fn adjudicate_retreat(source: &Province, dest: &Province, r: &mut Resolver<'_>) -> Outcome {
    for order in r.board().orders().values() {
        if let Order::Move {
            source: other,
            dest: other_dest,
            ..
        } = order
        {
            if !other.same_super(source) && other_dest.same_super(dest) {
                return Err(OrderError::Bounce(other.clone()));
            }
        }
    }
    Ok(())
}

fn as_move(found: &Found) -> Option<(&Province, &Province)> {
    match (&found.unit, &found.order) {
        (Some(_), Some(order)) => order.move_targets(),
        _ => None,
    }
}

/// Fails if another move into the same province is at least as strong,
/// unless that move's unit is dislodged by a head-to-head attack.
/// Supports from `forbidden` do not count for this move.
fn compete(
    source: &Province,
    dest: &Province,
    forbidden: Option<&Nation>,
    r: &mut Resolver<'_>,
) -> Outcome {
    let competitors = r.find(|_, found| {
        as_move(found).is_some_and(|(src, dst)| src != source && dst.same_super(dest))
    });
    let forbidden: Vec<Nation> = forbidden.into_iter().cloned().collect();

    for competitor in &competitors {
        let (Some((c_src, c_dst)), Some(c_unit)) = (as_move(competitor), &competitor.unit) else {
            continue;
        };
        let attack = move_support(r, source, dest, &forbidden) + 1;
        let strength = move_support(r, c_src, c_dst, &[]) + 1;
        trace!("{} - {}: {} vs {} - {}: {}", source, dest, attack, c_src, c_dst, strength);
        if strength < attack {
            continue;
        }

        if must_convoy(r, c_src) {
            if any_convoy_path(r, c_src, c_dst, true, None).is_some() {
                r.board_mut().add_bounce(source, dest);
                return Err(OrderError::Bounce(c_src.clone()));
            }
            continue;
        }

        let dislodgers = r.find(|r, found| {
            let Some((d_src, d_dst)) = as_move(found) else {
                return false;
            };
            let foreign = found
                .unit
                .as_ref()
                .is_some_and(|unit| unit.nation != c_unit.nation);
            foreign
                && d_dst.same_super(c_src)
                && d_src.same_super(c_dst)
                && !must_convoy(r, d_src)
                && r.resolve(&found.province).is_ok()
        });
        if dislodgers.is_empty() {
            r.board_mut().add_bounce(source, dest);
            return Err(OrderError::Bounce(c_src.clone()));
        }
        trace!("{} dislodged by {}", c_src, dislodgers[0].province);
    }
    Ok(())
}

fn adjudicate_movement(source: &Province, dest: &Province, r: &mut Resolver<'_>) -> Outcome {
    let Some((_, unit)) = r.board().unit(source) else {
        return Err(OrderError::MissingUnit);
    };

    let convoyed = must_convoy(r, source);
    if convoyed && any_convoy_path(r, source, dest, true, None).is_none() {
        return Err(OrderError::MissingConvoyPath);
    }

    compete(source, dest, None, r)?;

    let mut forbidden = None;
    if let Some((_, victim)) = r.board().unit(dest) {
        let attack = move_support(r, source, dest, std::slice::from_ref(&victim.nation)) + 1;
        let own = victim.nation == unit.nation;
        match r.board().order(dest) {
            Some((prov, Order::Move {
                source: v_src,
                dest: v_dst,
                ..
            })) => {
                let victim_convoyed = must_convoy(r, &v_src);
                if !convoyed && !victim_convoyed && v_dst.same_super(source) {
                    // Head to head.
                    let strength =
                        move_support(r, &v_src, &v_dst, std::slice::from_ref(&unit.nation)) + 1;
                    trace!("head to head {} vs {}: {} vs {}", source, v_src, attack, strength);
                    if own || strength >= attack {
                        return Err(OrderError::Bounce(dest.clone()));
                    }
                    forbidden = Some(victim.nation);
                } else if r.resolve(&prov).is_ok() {
                    trace!("{} left {}", v_src, dest);
                } else {
                    if own || attack <= 1 {
                        return Err(OrderError::Bounce(dest.clone()));
                    }
                    forbidden = Some(victim.nation);
                }
            }
            _ => {
                let strength = hold_support(r, dest) + 1;
                trace!("{} - {}: {} vs hold: {}", source, dest, attack, strength);
                if own || strength >= attack {
                    return Err(OrderError::Bounce(dest.clone()));
                }
                forbidden = Some(victim.nation);
            }
        }
    }

    compete(source, dest, forbidden.as_ref(), r)
}

pub fn execute(source: &Province, dest: &Province, r: &mut Resolver<'_>) -> Result<()> {
    if r.board().phase().kind == PhaseType::Retreat {
        return r.board_mut().retreat(source, dest);
    }
    if r.board().unit(source).is_none() {
        return Err(Error::MissingUnit(source.clone()));
    }
    let prevent_retreat = !must_convoy(r, source);
    r.board_mut().queue_move(source, dest, prevent_retreat);
    Ok(())
}

pub fn options(v: &mut Validator<'_>, nation: &Nation, src: &Province, via_convoy: bool) -> Options {
    let mut result = Options::new();
    if !v.board().graph().has(src) {
        return result;
    }
    match v.board().phase().kind {
        PhaseType::Retreat if !via_convoy => {
            let Some((at, unit)) = v.board().dislodged(src) else {
                return result;
            };
            if &unit.nation != nation {
                return result;
            }
            for dst in possible_moves(v, src, false, true) {
                if v.board().unit(&dst).is_none() && !v.board().bounce(src, &dst) {
                    result.insert(OptionKey::Source(at.clone())).insert(OptionKey::Province(dst));
                }
            }
        }
        PhaseType::Movement => {
            let Some((at, unit)) = v.board().unit(src) else {
                return result;
            };
            if &unit.nation != nation || (via_convoy && unit.unit_type != UnitType::Army) {
                return result;
            }
            for dst in possible_moves(v, src, true, false) {
                if via_convoy
                    && any_convoy_path(v, src, &dst, false, None).map_or(true, |path| path.len() <= 1)
                {
                    continue;
                }
                result.insert(OptionKey::Source(at.clone())).insert(OptionKey::Province(dst));
            }
        }
        _ => {}
    }
    result
}
