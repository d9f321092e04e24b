//! Movement legality, convoy search and strength arithmetic shared by the
//! order kinds.
//!
//! Everything here is written against [`Lookup`], so the same predicate
//! answers "could this ever work" during validation (nothing is resolved)
//! and "does this work" during adjudication (dependencies are resolved as
//! they are encountered). Convoy search and resolution recurse into each
//! other through [`Lookup::resolve`]; the resolver alone tracks which orders
//! are in progress.

use std::collections::BTreeSet;

use crate::board::graph::Graph;
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{Board, Found};
use crate::board::unit::UnitType;
use crate::error::{OrderError, Outcome};
use crate::resolve::Lookup;

/// True if a unit of `unit_type` can step directly from `src` to `dst`.
pub fn has_edge(graph: &Graph, unit_type: UnitType, src: &Province, dst: &Province) -> bool {
    let Some(edge) = graph.edge(src, dst) else {
        return false;
    };
    match unit_type {
        UnitType::Army => graph.flags(dst).land() && edge.land(),
        UnitType::Fleet => graph.flags(dst).sea() && edge.sea(),
    }
}

/// True if `order` convoys an army from `src` to `dst`.
pub fn convoys(order: Option<&Order>, src: &Province, dst: &Province) -> bool {
    matches!(order, Some(Order::Convoy { from, to, .. }) if from.contains(src) && to.contains(dst))
}

/// One leg of a convoy: from `first` to `last` over fleets that are (or, when
/// `resolve` is set, successfully do) convoy `src` to `dst`. With `dst_ok`
/// the leg may end on the army's landing province.
fn convoy_leg<L: Lookup>(
    l: &mut L,
    first: &Province,
    last: &Province,
    src: &Province,
    dst: &Province,
    resolve: bool,
    dst_ok: bool,
) -> Option<Vec<Province>> {
    let graph = l.board().shared_graph();
    graph.path(first, last, |name, _, node, _, _| {
        if dst_ok && name.contains(dst) && node.land() {
            return true;
        }
        if (node.land() || !node.sea()) && !node.convoyable() {
            return false;
        }
        match l.board().unit(name) {
            Some((_, unit)) if unit.unit_type == UnitType::Fleet => {}
            _ => return false,
        }
        if !resolve {
            return true;
        }
        match l.board().order(name) {
            Some((prov, order)) if convoys(Some(&order), src, dst) => l.resolve(&prov).is_ok(),
            _ => false,
        }
    })
}

/// A convoy path from `src` to `dst` passing through the fleet in `via`.
pub fn convoy_path_possible<L: Lookup>(
    l: &mut L,
    via: &Province,
    src: &Province,
    dst: &Province,
    resolve: bool,
) -> Option<Vec<Province>> {
    let mut path = convoy_leg(l, src, via, src, dst, resolve, false)?;
    path.extend(convoy_leg(l, via, dst, src, dst, resolve, true)?);
    Some(path)
}

fn convoy_path<L: Lookup>(
    l: &mut L,
    src: &Province,
    dst: &Province,
    resolve: bool,
    via_nation: Option<&Nation>,
) -> Option<Vec<Province>> {
    if src == dst {
        return None;
    }
    let graph = l.board().shared_graph();
    let waypoints = l.find(|l, found| {
        let flags = graph.flags(&found.province);
        if flags.land() && !flags.convoyable() {
            return false;
        }
        if found.province.same_super(src) || found.province.same_super(dst) {
            return false;
        }
        match &found.unit {
            Some(unit)
                if unit.unit_type == UnitType::Fleet
                    && via_nation.map_or(true, |nation| &unit.nation == nation) => {}
            _ => return false,
        }
        let matching = convoys(found.order.as_ref(), src, dst);
        if !resolve {
            return via_nation.is_none() || matching;
        }
        matching && l.resolve(&found.province).is_ok()
    });
    waypoints
        .iter()
        .find_map(|waypoint| convoy_path_possible(l, &waypoint.province, src, dst, resolve))
}

/// A convoy path for an army from `src` to `dst`, trying every coast
/// combination when the literal pair has none. `via_nation` restricts the
/// convoying fleets to one nation's.
pub fn any_convoy_path<L: Lookup>(
    l: &mut L,
    src: &Province,
    dst: &Province,
    resolve: bool,
    via_nation: Option<&Nation>,
) -> Option<Vec<Province>> {
    let graph = l.board().shared_graph();
    if !graph.all_flags(src).sea() || !graph.all_flags(dst).sea() {
        return None;
    }
    if let Some(path) = convoy_path(l, src, dst, resolve, via_nation) {
        return Some(path);
    }
    for src_coast in graph.coasts(src) {
        for dst_coast in graph.coasts(dst) {
            if let Some(path) = convoy_path(l, &src_coast, &dst_coast, resolve, via_nation) {
                return Some(path);
            }
        }
    }
    None
}

/// True if the army in `src` moves by convoy rather than over land.
pub fn must_convoy<L: Lookup>(l: &mut L, src: &Province) -> bool {
    let Some((_, unit)) = l.board().unit(src) else {
        return false;
    };
    if unit.unit_type != UnitType::Army {
        return false;
    }
    let Some((_, Order::Move { source, dest, via_convoy })) = l.board().order(src) else {
        return false;
    };
    !has_edge(l.board().graph(), unit.unit_type, &source, &dest)
        || (via_convoy && any_convoy_path(l, &source, &dest, true, None).is_some())
        || any_convoy_path(l, &source, &dest, false, Some(&unit.nation)).is_some()
}

/// Whether a unit of `unit_type` could move from `src` to exactly `dst`.
pub fn move_possible<L: Lookup>(
    l: &mut L,
    unit_type: UnitType,
    src: &Province,
    dst: &Province,
    allow_convoy: bool,
    resolve: bool,
) -> Outcome {
    let graph = l.board().shared_graph();
    if !graph.has(src) {
        return Err(OrderError::InvalidSource);
    }
    if !graph.has(dst) {
        return Err(OrderError::InvalidDestination);
    }
    if src.same_super(dst) {
        return Err(OrderError::IllegalMove);
    }
    match unit_type {
        UnitType::Army => {
            if !graph.flags(dst).land() {
                return Err(OrderError::IllegalDestination);
            }
            if !allow_convoy {
                return match graph.edge(src, dst) {
                    None => Err(OrderError::IllegalMove),
                    Some(edge) if !edge.land() => Err(OrderError::IllegalDestination),
                    Some(_) => Ok(()),
                };
            }
            if resolve && must_convoy(l, src) {
                return match any_convoy_path(l, src, dst, true, None) {
                    Some(_) => Ok(()),
                    None => Err(OrderError::MissingConvoyPath),
                };
            }
            if !has_edge(&graph, unit_type, src, dst)
                && any_convoy_path(l, src, dst, false, None).is_none()
            {
                return Err(OrderError::MissingConvoyPath);
            }
            Ok(())
        }
        UnitType::Fleet => {
            if !graph.flags(dst).sea() {
                return Err(OrderError::IllegalDestination);
            }
            if !has_edge(&graph, unit_type, src, dst) {
                return Err(OrderError::IllegalMove);
            }
            Ok(())
        }
    }
}

/// Like [`move_possible`], but also tries the coasts of `dst`. Returns the
/// destination that works: `dst` itself, or its only working coast (the
/// first working one when `lax`).
pub fn any_move_possible<L: Lookup>(
    l: &mut L,
    unit_type: UnitType,
    src: &Province,
    dst: &Province,
    lax: bool,
    allow_convoy: bool,
    resolve: bool,
) -> Result<Province, OrderError> {
    let err = match move_possible(l, unit_type, src, dst, allow_convoy, resolve) {
        Ok(()) => return Ok(dst.clone()),
        Err(err) => err,
    };
    if lax || dst.is_super() {
        let coasts = l.board().graph().coasts(dst);
        let mut options = Vec::new();
        for coast in coasts {
            if move_possible(l, unit_type, src, &coast, allow_convoy, resolve).is_ok() {
                options.push(coast);
            }
        }
        if !options.is_empty() && (lax || options.len() == 1) {
            return Ok(options.swap_remove(0));
        }
    }
    Err(err)
}

/// Whether a unit in `src` could support into `dst` or one of its coasts.
pub fn any_support_possible<L: Lookup>(
    l: &mut L,
    unit_type: UnitType,
    src: &Province,
    dst: &Province,
) -> Outcome {
    let first = move_possible(l, unit_type, src, dst, false, false);
    if first.is_ok() {
        return first;
    }
    let mut last = first;
    let coasts = l.board().graph().coasts(dst);
    for coast in coasts {
        last = move_possible(l, unit_type, src, &coast, false, false);
        if last.is_ok() {
            return last;
        }
    }
    last
}

/// Destinations the unit (or dislodged unit) in `src` could move to,
/// collapsing coasts onto their parent where that is unambiguous.
pub fn possible_moves<L: Lookup>(
    l: &mut L,
    src: &Province,
    allow_convoy: bool,
    dislodged: bool,
) -> Vec<Province> {
    let found = if dislodged {
        l.board().dislodged(src)
    } else {
        l.board().unit(src)
    };
    let Some((real_src, unit)) = found else {
        return Vec::new();
    };
    let graph = l.board().shared_graph();

    let mut dsts = BTreeSet::new();
    match unit.unit_type {
        UnitType::Army if !allow_convoy => {
            dsts.extend(
                graph
                    .edges(&real_src)
                    .filter(|(dst, edge)| edge.land() && graph.flags(dst).land())
                    .map(|(dst, _)| dst.clone()),
            );
        }
        UnitType::Fleet => {
            dsts.extend(
                graph
                    .edges(&real_src)
                    .filter(|(dst, edge)| edge.sea() && graph.flags(dst).sea())
                    .map(|(dst, _)| dst.clone()),
            );
        }
        UnitType::Army => {
            for prov in graph.provinces() {
                if move_possible(l, unit.unit_type, &real_src, &prov, allow_convoy, false).is_ok() {
                    dsts.insert(prov);
                }
            }
        }
    }

    let mut result = BTreeSet::new();
    for dst in &dsts {
        if dst.is_super() {
            result.insert(dst.clone());
        } else if !dsts.contains(&dst.super_province()) {
            let coasts = graph.coasts(dst).iter().filter(|c| dsts.contains(*c)).count();
            if coasts == 1 {
                result.insert(dst.super_province());
            } else {
                result.insert(dst.clone());
            }
        }
    }
    result.into_iter().collect()
}

/// A nation's pending builds or disbands, and the supply-center balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentStatus {
    /// Builds that fit the surplus, earliest first.
    pub builds: Vec<Order>,
    /// Disbands that fit the deficit, earliest first.
    pub disbands: Vec<Order>,
    /// Supply centers minus units.
    pub balance: i32,
}

pub fn adjustment_status(board: &Board, me: &Nation) -> AdjustmentStatus {
    let mut scs = 0i32;
    let mut builds = Vec::new();
    for (prov, nation) in board.supply_centers() {
        if nation == me {
            scs += 1;
            if let Some((_, order @ Order::Build { .. })) = board.order(prov) {
                builds.push(order);
            }
        }
    }

    let mut units = 0i32;
    let mut disbands = Vec::new();
    for (prov, unit) in board.units() {
        if &unit.nation == me {
            units += 1;
            if let Some((_, order @ Order::Disband { .. })) = board.order(prov) {
                disbands.push(order);
            }
        }
    }

    let by_time = |a: &Order, b: &Order| (a.at(), a.source()).cmp(&(b.at(), b.source()));
    builds.sort_by(by_time);
    disbands.sort_by(by_time);

    let balance = scs - units;
    if balance > 0 {
        disbands.clear();
        builds.truncate(balance as usize);
    } else if balance < 0 {
        builds.clear();
        disbands.truncate(balance.unsigned_abs() as usize);
    } else {
        builds.clear();
        disbands.clear();
    }
    AdjustmentStatus {
        builds,
        disbands,
        balance,
    }
}

/// Number of successful supports for a unit holding in `prov`.
pub fn hold_support<L: Lookup>(l: &mut L, prov: &Province) -> usize {
    l.find(|l, found: &Found| {
        let supports = found.unit.is_some()
            && !found.province.same_super(prov)
            && matches!(&found.order, Some(Order::SupportHold { target, .. }) if target.same_super(prov));
        supports && l.resolve(&found.province).is_ok()
    })
    .len()
}

/// Number of successful supports for the move `src - dst`, ignoring
/// supporters of the `forbidden` nations.
pub fn move_support<L: Lookup>(
    l: &mut L,
    src: &Province,
    dst: &Province,
    forbidden: &[Nation],
) -> usize {
    l.find(|l, found: &Found| {
        let Some(unit) = &found.unit else {
            return false;
        };
        let supports = matches!(
            &found.order,
            Some(Order::SupportMove { from, to, .. }) if from.contains(src) && to.contains(dst)
        );
        supports && !forbidden.contains(&unit.nation) && l.resolve(&found.province).is_ok()
    })
    .len()
}
