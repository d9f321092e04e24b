//! Phase sequencing and the per-phase bookkeeping around adjudication.
//!
//! The year runs Spring Movement, Spring Retreat, Fall Movement, Fall
//! Retreat, Fall Adjustment. Retreat and adjustment phases are always
//! entered, even when nobody has anything to do in them.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::order::{Order, OrderType};
use crate::board::province::{Nation, Province};
use crate::board::state::{Board, Phase, PhaseType, Season};
use crate::board::unit::UnitType;
use crate::error::{Error, Inconsistency, OrderError, Result};
use crate::orders::build::home_allows;
use crate::orders::common::{adjustment_status, has_edge};
use crate::resolve::Validator;

/// The phase after `phase`.
pub fn next(phase: Phase) -> Phase {
    match (phase.season, phase.kind) {
        (season, PhaseType::Movement) => Phase::new(phase.year, season, PhaseType::Retreat),
        (Season::Spring, PhaseType::Retreat) => {
            Phase::new(phase.year, Season::Fall, PhaseType::Movement)
        }
        (Season::Fall, PhaseType::Retreat) => {
            Phase::new(phase.year, Season::Fall, PhaseType::Adjustment)
        }
        (_, PhaseType::Adjustment) => Phase::new(phase.year + 1, Season::Spring, PhaseType::Movement),
    }
}

/// The order a unit without orders gets: hold during movement, nothing
/// otherwise (a dislodged unit without orders is disbanded, surplus
/// units are picked by [`sorted_units`]).
pub fn default_order(phase: Phase, prov: &Province) -> Option<Order> {
    match phase.kind {
        PhaseType::Movement => Some(Order::hold(prov.clone())),
        PhaseType::Retreat | PhaseType::Adjustment => None,
    }
}

/// Bookkeeping after the phase's orders have been executed: units that
/// cannot or did not act are removed, and supply centers change hands at
/// the end of the Fall retreat.
pub fn post_process(board: &mut Board) -> Result<()> {
    let phase = board.phase();
    match phase.kind {
        PhaseType::Movement => remove_stranded(board),
        PhaseType::Retreat => {
            let dislodged: Vec<Province> = board.dislodgeds().keys().cloned().collect();
            for prov in dislodged {
                debug!("removing {} since it did not retreat", prov);
                board.remove_dislodged(&prov);
                board.force_disband(&prov);
            }
            board.clear_dislodgers();
            board.clear_bounces();
            if phase.season == Season::Fall {
                transfer_supply_centers(board);
            }
        }
        PhaseType::Adjustment => {
            for nation in board.graph().nations() {
                let balance = adjustment_status(board, &nation).balance;
                if balance >= 0 {
                    continue;
                }
                let surplus = sorted_units(board, &nation)?;
                for prov in surplus.into_iter().take(balance.unsigned_abs() as usize) {
                    debug!("removing {} since it was not disbanded by order", prov);
                    board.remove_unit(&prov);
                        board.force_disband(&prov);
                }
            }
        }
    }
    Ok(())
}

/// Removes dislodged units that have nowhere to retreat to.
fn remove_stranded(board: &mut Board) {
    let dislodged: Vec<(Province, UnitType)> = board
        .dislodgeds()
        .iter()
        .map(|(prov, unit)| (prov.clone(), unit.unit_type))
        .collect();
    for (prov, unit_type) in dislodged {
        let can_retreat = board.graph().edges(&prov).any(|(dst, _)| {
            board.unit(dst).is_none()
                && !board.bounce(&prov, dst)
                && has_edge(board.graph(), unit_type, &prov, dst)
        });
        if !can_retreat {
            debug!("removing {} since it has no retreat", prov);
            board.remove_dislodged(&prov);
            board.force_disband(&prov);
        }
    }
}

fn transfer_supply_centers(board: &mut Board) {
    let occupied: Vec<(Province, Nation)> = board
        .units()
        .iter()
        .filter(|(prov, _)| board.graph().sc(&prov.super_province()).is_some())
        .map(|(prov, unit)| (prov.super_province(), unit.nation.clone()))
        .collect();
    for (prov, nation) in occupied {
        if board.supply_center(&prov).map(|(_, owner)| owner).as_ref() != Some(&nation) {
            debug!("{} now belongs to {}", prov, nation);
        }
        board.set_sc(prov, nation);
    }
}

/// Number of steps from the unit in `src` to the nearest of `homes`.
///
/// Any route counts, over land or sea; coasts of the same province are at
/// distance zero from each other. A unit with no route home is at distance
/// zero too.
pub fn shortest_distance(board: &Board, src: &Province, homes: &[Province]) -> Result<usize> {
    let (src, _) = board
        .unit(src)
        .ok_or_else(|| Error::MissingUnit(src.clone()))?;
    let graph = board.graph();
    let mut best: Option<usize> = None;
    for home in homes {
        for src_coast in graph.coasts(&src) {
            if src_coast.same_super(home) {
                return Ok(0);
            }
            for home_coast in graph.coasts(home) {
                if let Some(path) = graph.path(&src_coast, &home_coast, |_, _, _, _, _| true) {
                    best = Some(best.map_or(path.len(), |b| b.min(path.len())));
                }
            }
        }
    }
    Ok(best.unwrap_or(0))
}

/// `nation`'s units, the first to be disbanded first: furthest from home,
/// then fleets before armies, then by province name.
pub fn sorted_units(board: &Board, nation: &Nation) -> Result<Vec<Province>> {
    let homes = board.graph().scs(nation);
    let mut ranked = Vec::new();
    for (prov, unit) in board.units() {
        if &unit.nation != nation {
            continue;
        }
        let distance = shortest_distance(board, prov, &homes)?;
        ranked.push((distance, unit.unit_type, prov.clone()));
    }
    ranked.sort_by(|(d1, t1, p1), (d2, t2, p2)| {
        d2.cmp(d1)
            .then_with(|| match (t1, t2) {
                (UnitType::Fleet, UnitType::Army) => Ordering::Less,
                (UnitType::Army, UnitType::Fleet) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| p1.cmp(p2))
    });
    debug!(
        "sorted units for {}: {:?}",
        nation,
        ranked.iter().map(|(d, _, p)| format!("{}:{}", p, d)).collect::<Vec<_>>()
    );
    Ok(ranked.into_iter().map(|(_, _, prov)| prov).collect())
}

/// The nation owning at least `threshold` supply centers, if any.
pub fn winner(board: &Board, threshold: usize) -> Option<Nation> {
    let mut counts: BTreeMap<&Nation, usize> = BTreeMap::new();
    for nation in board.supply_centers().values() {
        *counts.entry(nation).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(nation, count)| !nation.is_neutral() && *count >= threshold)
        .max_by_key(|(_, count)| *count)
        .map(|(nation, _)| nation.clone())
}

/// Builds (positive) or disbands (negative) each nation is due, capped by
/// the free supply centers it may actually build in.
pub fn build_balance(board: &Board) -> BTreeMap<Nation, i32> {
    let mut units: BTreeMap<&Nation, i32> = BTreeMap::new();
    for unit in board.units().values() {
        *units.entry(&unit.nation).or_default() += 1;
    }
    let mut scs: BTreeMap<&Nation, i32> = BTreeMap::new();
    let mut free: BTreeMap<&Nation, i32> = BTreeMap::new();
    for (prov, nation) in board.supply_centers() {
        *scs.entry(nation).or_default() += 1;
        if board.unit(prov).is_none() && home_allows(board, prov, nation) {
            *free.entry(nation).or_default() += 1;
        }
    }
    board
        .graph()
        .nations()
        .into_iter()
        .map(|nation| {
            let delta = scs.get(&nation).copied().unwrap_or(0)
                - units.get(&nation).copied().unwrap_or(0);
            let delta = delta.min(free.get(&nation).copied().unwrap_or(0));
            (nation, delta)
        })
        .collect()
}

/// Adjustment summaries for `nation`: `MayBuild:n` or `MustDisband:n` for
/// itself and `OtherMayBuild:nation:n` / `OtherMustDisband:nation:n` for
/// everybody else. Empty outside adjustment phases.
pub fn messages(board: &Board, nation: &Nation) -> Vec<String> {
    if board.phase().kind != PhaseType::Adjustment {
        return Vec::new();
    }
    build_balance(board)
        .into_iter()
        .map(|(other, delta)| match (&other == nation, delta < 0) {
            (true, true) => format!("MustDisband:{}", -delta),
            (true, false) => format!("MayBuild:{}", delta),
            (false, true) => format!("OtherMustDisband:{}:{}", other, -delta),
            (false, false) => format!("OtherMayBuild:{}:{}", other, delta),
        })
        .collect()
}

/// Inconsistencies found in one province's orders, or in the order set as
/// a whole when `province` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub province: Option<Province>,
    pub errors: Vec<Inconsistency>,
}

impl Report {
    fn at(province: &Province, error: Inconsistency) -> Report {
        Report {
            province: Some(province.super_province()),
            errors: vec![error],
        }
    }

    fn count(order_type: OrderType, found: usize, want: usize) -> Report {
        Report {
            province: None,
            errors: vec![Inconsistency::OrderTypeCount {
                order_type,
                found,
                want,
            }],
        }
    }
}

/// Checks whether `nation`'s submitted orders are complete and agree with
/// each other, without adjudicating anything.
pub fn corroborate(board: &Board, nation: &Nation) -> Vec<Report> {
    let mut reports = Vec::new();
    let validated: Vec<(Province, Order, std::result::Result<Nation, OrderError>)> = board
        .orders()
        .iter()
        .map(|(prov, order)| {
            let mut order = order.clone();
            let owner = order.validate(&mut Validator::new(board));
            (prov.clone(), order, owner)
        })
        .collect();

    match board.phase().kind {
        PhaseType::Movement | PhaseType::Retreat => {
            let pieces = if board.phase().kind == PhaseType::Movement {
                board.units()
            } else {
                board.dislodgeds()
            };
            for (prov, unit) in pieces {
                if &unit.nation == nation && board.order(prov).is_none() {
                    reports.push(Report::at(prov, Inconsistency::MissingOrder));
                }
            }
        }
        PhaseType::Adjustment => {
            let mut builds = 0;
            let mut disbands = 0;
            for (_, order, owner) in &validated {
                if owner.as_ref() == Ok(nation) {
                    match order.order_type() {
                        OrderType::Build => builds += 1,
                        OrderType::Disband => disbands += 1,
                        _ => {}
                    }
                }
            }
            let balance = build_balance(board).get(nation).copied().unwrap_or(0);
            if balance >= 0 {
                let want = balance.unsigned_abs() as usize;
                if builds != want {
                    reports.push(Report::count(OrderType::Build, builds, want));
                }
                if disbands != 0 {
                    reports.push(Report::count(OrderType::Disband, disbands, 0));
                }
            } else {
                let want = balance.unsigned_abs() as usize;
                if disbands != want {
                    reports.push(Report::count(OrderType::Disband, disbands, want));
                }
                if builds != 0 {
                    reports.push(Report::count(OrderType::Build, builds, 0));
                }
            }
        }
    }

    for (prov, order, owner) in validated {
        let ours = match (&owner, board.unit(&prov).or_else(|| board.dislodged(&prov))) {
            (Ok(owner), _) => owner == nation,
            (Err(_), Some((_, unit))) => &unit.nation == nation,
            (Err(_), None) => board.supply_center(&prov).is_some_and(|(_, n)| &n == nation),
        };
        if !ours {
            continue;
        }
        match owner {
            Err(err) => reports.push(Report::at(&prov, Inconsistency::Invalid(err))),
            Ok(_) => {
                let errors = order.corroborate(&Validator::new(board));
                if !errors.is_empty() {
                    reports.push(Report {
                        province: Some(prov.super_province()),
                        errors,
                    });
                }
            }
        }
    }
    reports
}
