//! Game state representation.
//!
//! A [`Board`] is the mutable snapshot of one phase: units, dislodged units,
//! supply-center ownership, the orders issued this phase and, once
//! [`Board::next`] has run, their resolutions. Lookups by province search
//! the province itself, then its parent, then every coast, so `stp` finds a
//! fleet standing in `stp/sc`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::graph::Graph;
use super::order::Order;
use super::province::{Nation, Province};
use super::unit::Unit;
use crate::config::RuleFlags;
use crate::error::{Error, OrderError, Outcome, Result};
use crate::resolve::backup::BackupRule;
use crate::resolve::lookup::Validator;
use crate::resolve::Resolver;

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Fall,
}

/// The phase type within a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    Movement,
    Retreat,
    Adjustment,
}

/// Year, season and phase type. Transitions live in [`crate::resolve::phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phase {
    pub year: i32,
    pub season: Season,
    pub kind: PhaseType,
}

impl Phase {
    pub const fn new(year: i32, season: Season, kind: PhaseType) -> Self {
        Phase { year, season, kind }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}, {:?}", self.season, self.year, self.kind)
    }
}

/// A unit, order and province found by [`crate::resolve::Lookup::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub province: Province,
    pub order: Option<Order>,
    pub unit: Option<Unit>,
}

/// A successful move waiting to be applied after all orders executed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Movement {
    src: Province,
    dst: Province,
    /// Record the attacker's origin so the victim may not retreat there.
    prevent_retreat: bool,
}

/// Serializable copy of everything a board carries between phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    #[serde(default)]
    pub units: BTreeMap<Province, Unit>,
    #[serde(default)]
    pub supply_centers: BTreeMap<Province, Nation>,
    #[serde(default)]
    pub dislodgeds: BTreeMap<Province, Unit>,
    #[serde(default)]
    pub dislodgers: BTreeMap<Province, Province>,
    #[serde(default)]
    pub bounces: BTreeMap<Province, BTreeSet<Province>>,
    #[serde(default)]
    pub resolutions: BTreeMap<Province, Outcome>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Snapshot> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Complete board state for one phase.
#[derive(Debug, Clone)]
pub struct Board {
    graph: Arc<Graph>,
    phase: Phase,
    rule: Arc<dyn BackupRule>,
    flags: RuleFlags,
    units: BTreeMap<Province, Unit>,
    dislodgeds: BTreeMap<Province, Unit>,
    supply_centers: BTreeMap<Province, Nation>,
    orders: BTreeMap<Province, Order>,
    resolutions: BTreeMap<Province, Outcome>,
    /// Attacker origin (parent) to the parent province it dislodged.
    dislodgers: BTreeMap<Province, Province>,
    /// Contested destination (parent) to the parents that bounced there.
    bounces: BTreeMap<Province, BTreeSet<Province>>,
    force_disbands: BTreeSet<Province>,
    movements: Vec<Movement>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(graph: Arc<Graph>, phase: Phase, rule: Arc<dyn BackupRule>) -> Self {
        Board {
            graph,
            phase,
            rule,
            flags: RuleFlags::default(),
            units: BTreeMap::new(),
            dislodgeds: BTreeMap::new(),
            supply_centers: BTreeMap::new(),
            orders: BTreeMap::new(),
            resolutions: BTreeMap::new(),
            dislodgers: BTreeMap::new(),
            bounces: BTreeMap::new(),
            force_disbands: BTreeSet::new(),
            movements: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: RuleFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn set_flags(&mut self, flags: RuleFlags) {
        self.flags = flags;
    }

    // -- Getters --

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn shared_graph(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    pub fn backup_rule(&self) -> Arc<dyn BackupRule> {
        Arc::clone(&self.rule)
    }

    pub fn units(&self) -> &BTreeMap<Province, Unit> {
        &self.units
    }

    pub fn dislodgeds(&self) -> &BTreeMap<Province, Unit> {
        &self.dislodgeds
    }

    pub fn supply_centers(&self) -> &BTreeMap<Province, Nation> {
        &self.supply_centers
    }

    pub fn orders(&self) -> &BTreeMap<Province, Order> {
        &self.orders
    }

    pub fn resolutions(&self) -> &BTreeMap<Province, Outcome> {
        &self.resolutions
    }

    pub fn dislodgers(&self) -> &BTreeMap<Province, Province> {
        &self.dislodgers
    }

    pub fn bounces(&self) -> &BTreeMap<Province, BTreeSet<Province>> {
        &self.bounces
    }

    /// Provinces whose units were removed without an order this phase.
    pub fn force_disbands(&self) -> &BTreeSet<Province> {
        &self.force_disbands
    }

    // -- Lookups, searching all coasts of a province --

    fn lookup<T: Clone>(&self, map: &BTreeMap<Province, T>, p: &Province) -> Option<(Province, T)> {
        if let Some(v) = map.get(p) {
            return Some((p.clone(), v.clone()));
        }
        let sup = p.super_province();
        if let Some(v) = map.get(&sup) {
            return Some((sup, v.clone()));
        }
        self.graph
            .coasts(p)
            .into_iter()
            .find_map(|coast| map.get(&coast).map(|v| (coast.clone(), v.clone())))
    }

    /// The unit in `p` and the exact (sub-)province it stands in.
    pub fn unit(&self, p: &Province) -> Option<(Province, Unit)> {
        self.lookup(&self.units, p)
    }

    pub fn dislodged(&self, p: &Province) -> Option<(Province, Unit)> {
        self.lookup(&self.dislodgeds, p)
    }

    pub fn supply_center(&self, p: &Province) -> Option<(Province, Nation)> {
        self.lookup(&self.supply_centers, p)
    }

    pub fn order(&self, p: &Province) -> Option<(Province, Order)> {
        self.lookup(&self.orders, p)
    }

    /// True if a unit retreating from `src` may not enter `dst`: something
    /// bounced there, or the unit that dislodged it came from there.
    pub fn bounce(&self, src: &Province, dst: &Province) -> bool {
        let dst_super = dst.super_province();
        if let Some(sources) = self.bounces.get(&dst_super) {
            if let Some(victim) = self.dislodgers.get(&dst_super) {
                if sources.len() == 1 && sources.contains(&victim.super_province()) {
                    return false;
                }
            }
            return true;
        }
        self.dislodgers
            .get(&dst_super)
            .is_some_and(|victim| victim.same_super(src))
    }

    /// Every unit with its (coast-aware) order, then every order without a unit.
    pub fn candidates(&self) -> Vec<Found> {
        let mut found: Vec<Found> = self
            .units
            .iter()
            .map(|(prov, unit)| Found {
                province: prov.clone(),
                order: self.order(prov).map(|(_, order)| order),
                unit: Some(unit.clone()),
            })
            .collect();
        found.extend(
            self.orders
                .iter()
                .filter(|(prov, _)| self.unit(prov).is_none())
                .map(|(prov, order)| Found {
                    province: prov.clone(),
                    order: Some(order.clone()),
                    unit: None,
                }),
        );
        found
    }

    // -- Setters --

    /// Sets the order for `p`; fails if an order already covers it.
    pub fn set_order(&mut self, p: impl Into<Province>, order: Order) -> Result<()> {
        let p = p.into();
        if let Some((at, existing)) = self.order(&p) {
            return Err(Error::Occupied {
                province: at,
                occupant: existing.to_string(),
            });
        }
        self.orders.insert(p, order);
        Ok(())
    }

    /// Replaces all orders.
    pub fn set_orders(&mut self, orders: impl IntoIterator<Item = Order>) -> Result<()> {
        self.orders.clear();
        for order in orders {
            let source = order.source().clone();
            self.set_order(source, order)?;
        }
        Ok(())
    }

    /// Places a unit; fails if any coast of the province is occupied.
    pub fn set_unit(&mut self, p: impl Into<Province>, unit: Unit) -> Result<()> {
        let p = p.into();
        if let Some((at, existing)) = self.unit(&p) {
            return Err(Error::Occupied {
                province: at,
                occupant: existing.to_string(),
            });
        }
        self.units.insert(p, unit);
        Ok(())
    }

    pub fn set_units(&mut self, units: impl IntoIterator<Item = (Province, Unit)>) -> Result<()> {
        self.units.clear();
        for (p, unit) in units {
            self.set_unit(p, unit)?;
        }
        Ok(())
    }

    pub fn remove_unit(&mut self, p: &Province) -> Option<Unit> {
        let (at, _) = self.unit(p)?;
        self.units.remove(&at)
    }

    pub fn set_dislodged(&mut self, p: impl Into<Province>, unit: Unit) -> Result<()> {
        let p = p.into();
        if let Some((at, existing)) = self.dislodged(&p) {
            return Err(Error::Occupied {
                province: at,
                occupant: existing.to_string(),
            });
        }
        self.dislodgeds.insert(p, unit);
        Ok(())
    }

    pub fn remove_dislodged(&mut self, p: &Province) -> Option<Unit> {
        let (at, _) = self.dislodged(p)?;
        self.dislodgeds.remove(&at)
    }

    pub fn set_sc(&mut self, p: impl Into<Province>, nation: Nation) {
        self.supply_centers.insert(p.into(), nation);
    }

    pub fn set_supply_centers(&mut self, scs: impl IntoIterator<Item = (Province, Nation)>) {
        self.supply_centers = scs.into_iter().collect();
    }

    pub fn add_bounce(&mut self, src: &Province, dst: &Province) {
        self.bounces
            .entry(dst.super_province())
            .or_default()
            .insert(src.super_province());
    }

    pub fn set_dislodger(&mut self, attacker: &Province, victim: &Province) {
        self.dislodgers
            .insert(attacker.super_province(), victim.super_province());
    }

    pub fn set_resolution(&mut self, p: impl Into<Province>, outcome: Outcome) {
        self.resolutions.insert(p.into(), outcome);
    }

    pub fn clear_bounces(&mut self) {
        self.bounces.clear();
    }

    pub fn clear_dislodgers(&mut self) {
        self.dislodgers.clear();
    }

    /// Records that the unit in `p` was removed without an order of its
    /// own saying so. An order that already failed keeps its reason.
    pub fn force_disband(&mut self, p: &Province) {
        self.force_disbands.insert(p.clone());
        if self.lookup(&self.resolutions, p).is_none() {
            self.resolutions.insert(p.clone(), Err(OrderError::ForcedDisband));
        }
    }

    // -- Mutators used by order execution --

    /// Queues a move; queued moves are applied together once all orders executed.
    pub fn queue_move(&mut self, src: &Province, dst: &Province, prevent_retreat: bool) {
        self.movements.push(Movement {
            src: src.clone(),
            dst: dst.clone(),
            prevent_retreat,
        });
    }

    /// Moves the dislodged unit in `src` to `dst`.
    pub fn retreat(&mut self, src: &Province, dst: &Province) -> Result<()> {
        let unit = self
            .remove_dislodged(src)
            .ok_or_else(|| Error::MissingUnit(src.clone()))?;
        debug!("retreating {} from {} to {}", unit, src, dst);
        self.set_unit(dst.clone(), unit)
    }

    /// Lifts every moving unit first, then drops each at its destination,
    /// dislodging whatever stands there.
    fn apply_movements(&mut self) -> Result<()> {
        let movements = std::mem::take(&mut self.movements);
        let mut lifted = Vec::with_capacity(movements.len());
        for movement in movements {
            let (src, unit) = self
                .unit(&movement.src)
                .ok_or_else(|| Error::MissingUnit(movement.src.clone()))?;
            self.units.remove(&src);
            debug!("lifted {} from {}", unit, src);
            lifted.push((movement, src, unit));
        }
        for (movement, src, unit) in lifted {
            if let Some((at, victim)) = self.unit(&movement.dst) {
                self.units.remove(&at);
                debug!("dislodged {} from {}", victim, at);
                self.set_dislodged(at.clone(), victim)?;
                if movement.prevent_retreat {
                    self.set_dislodger(&src, &at);
                }
            }
            debug!("dropped {} in {}", unit, movement.dst);
            self.set_unit(movement.dst, unit)?;
        }
        Ok(())
    }

    // -- Phase transition --

    /// Validates orders, drops the invalid ones (recording why), and gives
    /// every unit without an order the phase's default order.
    pub fn prepare(&mut self) {
        self.resolutions.clear();
        self.force_disbands.clear();
        let provinces: Vec<Province> = self.orders.keys().cloned().collect();
        for prov in provinces {
            let Some(mut order) = self.orders.get(&prov).cloned() else {
                continue;
            };
            let validity = order.validate(&mut Validator::new(self));
            match validity {
                Ok(_) => {
                    self.orders.insert(prov, order);
                }
                Err(err) => {
                    debug!("dropped {} due to {}", order, err);
                    self.orders.remove(&prov);
                    self.resolutions.insert(prov, Err(err));
                }
            }
        }

        let occupied: Vec<Province> = self.units.keys().cloned().collect();
        for prov in occupied {
            if self.orders.contains_key(&prov) || self.orders.contains_key(&prov.super_province()) {
                continue;
            }
            if let Some(order) = crate::resolve::phase::default_order(self.phase, &prov) {
                self.orders.insert(prov, order);
            }
        }
    }

    /// Resolves every order, starting with `first` in the given order.
    ///
    /// The outcome does not depend on `first`; it only fixes which province
    /// each top-level resolution starts from.
    pub fn resolve_all(&mut self, first: &[Province]) -> Result<()> {
        let mut queue: Vec<Province> = first
            .iter()
            .filter(|p| self.orders.contains_key(*p))
            .cloned()
            .collect();
        queue.extend(
            self.orders
                .keys()
                .filter(|p| !first.contains(p))
                .cloned(),
        );
        for prov in queue {
            let mut resolver = Resolver::new(self);
            let outcome = resolver.resolve_top(&prov)?;
            self.resolutions.insert(prov, outcome);
        }
        Ok(())
    }

    /// Executes every successful order, applies the queued movements and
    /// clears the orders.
    fn execute(&mut self) -> Result<()> {
        self.movements.clear();
        let succeeded: Vec<Order> = self
            .orders
            .iter()
            .filter(|(prov, _)| matches!(self.resolutions.get(*prov), Some(Ok(()))))
            .map(|(_, order)| order.clone())
            .collect();
        for order in succeeded {
            let mut resolver = Resolver::new(self);
            order.execute(&mut resolver)?;
            resolver.finish()?;
        }
        self.orders.clear();
        self.apply_movements()
    }

    /// Adjudicates the current phase and advances to the next one.
    pub fn next(&mut self) -> Result<()> {
        self.next_from(&[])
    }

    /// [`Board::next`], resolving the provinces in `first` before the rest.
    pub fn next_from(&mut self, first: &[Province]) -> Result<()> {
        self.prepare();
        self.resolve_all(first)?;
        self.execute()?;
        crate::resolve::phase::post_process(self)?;
        let next = crate::resolve::phase::next(self.phase);
        debug!("{} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    // -- Snapshots --

    pub fn dump(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            units: self.units.clone(),
            supply_centers: self.supply_centers.clone(),
            dislodgeds: self.dislodgeds.clone(),
            dislodgers: self.dislodgers.clone(),
            bounces: self.bounces.clone(),
            resolutions: self.resolutions.clone(),
        }
    }

    /// Replaces the board contents with `snapshot`. Orders are cleared.
    pub fn load(&mut self, snapshot: Snapshot) {
        self.phase = snapshot.phase;
        self.units = snapshot.units;
        self.supply_centers = snapshot.supply_centers;
        self.dislodgeds = snapshot.dislodgeds;
        self.dislodgers = snapshot.dislodgers;
        self.bounces = snapshot.bounces;
        self.resolutions = snapshot.resolutions;
        self.orders.clear();
        self.movements.clear();
        self.force_disbands.clear();
    }
}
