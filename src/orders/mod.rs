//! Order behaviour: validation, adjudication, execution and options.
//!
//! [`Order`] is a closed enum; each kind's rules live in their own module
//! and are dispatched from here with an exhaustive match.

pub mod build;
pub mod common;
pub mod convoy;
pub mod disband;
pub mod hold;
pub mod movement;
pub mod support;

use std::collections::BTreeMap;
use std::fmt;

use crate::board::order::{Order, OrderType};
use crate::board::province::{Nation, Province};
use crate::board::state::Board;
use crate::board::unit::UnitType;
use crate::error::{Inconsistency, OrderError, Outcome, Result};
use crate::resolve::{Resolver, Validator};

/// Every order kind, in the order options are listed.
pub const ORDER_TYPES: [OrderType; 7] = [
    OrderType::Hold,
    OrderType::Move,
    OrderType::MoveViaConvoy,
    OrderType::Support,
    OrderType::Convoy,
    OrderType::Build,
    OrderType::Disband,
];

impl Order {
    /// Checks the order against the current, unresolved board and returns
    /// the nation issuing it. Source and target provinces are rewritten to
    /// the exact coast the units stand on (or move to).
    pub fn validate(&mut self, v: &mut Validator<'_>) -> std::result::Result<Nation, OrderError> {
        match self {
            Order::Hold { source } => hold::validate(source, v),
            Order::Move { source, dest, .. } => movement::validate(source, dest, v),
            Order::SupportHold { source, target } => support::validate(source, target, None, v),
            Order::SupportMove { source, from, to } => {
                support::validate(source, from, Some(to), v)
            }
            Order::Convoy { source, from, to } => convoy::validate(source, from, to, v),
            Order::Build {
                source, unit_type, ..
            } => build::validate(source, *unit_type, v),
            Order::Disband { source, .. } => disband::validate(source, v),
        }
    }

    /// Decides whether the order succeeds, resolving dependencies through `r`.
    pub fn adjudicate(&self, r: &mut Resolver<'_>) -> Outcome {
        match self {
            Order::Hold { .. } => Ok(()),
            Order::Move { source, dest, .. } => movement::adjudicate(source, dest, r),
            Order::SupportHold { source, .. } => support::adjudicate(source, None, r),
            Order::SupportMove { source, to, .. } => support::adjudicate(source, Some(to), r),
            Order::Convoy { source, .. } => convoy::adjudicate(source, r),
            Order::Build { source, at, .. } => build::adjudicate(source, *at, r),
            Order::Disband { source, at } => disband::adjudicate(source, *at, r),
        }
    }

    /// Cross-checks the order against the same nation's other orders.
    /// Only supports and convoys of own units can disagree with anything.
    pub fn corroborate(&self, v: &Validator<'_>) -> Vec<Inconsistency> {
        let found = match self {
            Order::SupportHold { source, target } => support::corroborate(source, target, None, v),
            Order::SupportMove { source, from, to } => {
                support::corroborate(source, from, Some(to), v)
            }
            Order::Convoy { source, from, to } => convoy::corroborate(source, from, to, v),
            _ => None,
        };
        found.into_iter().collect()
    }

    /// Applies a successful order to the board.
    pub fn execute(&self, r: &mut Resolver<'_>) -> Result<()> {
        match self {
            Order::Hold { .. } | Order::SupportHold { .. } | Order::SupportMove { .. } => Ok(()),
            Order::Convoy { .. } => Ok(()),
            Order::Move { source, dest, .. } => movement::execute(source, dest, r),
            Order::Build {
                source, unit_type, ..
            } => build::execute(source, *unit_type, r.board_mut()),
            Order::Disband { source, .. } => {
                disband::execute(source, r.board_mut());
                Ok(())
            }
        }
    }
}

/// A node label in an [`Options`] tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    Province(Province),
    Order(OrderType),
    /// The exact (sub-)province the ordered unit stands in.
    Source(Province),
    Unit(UnitType),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Province(p) | OptionKey::Source(p) => write!(f, "{}", p),
            OptionKey::Order(t) => write!(f, "{}", t),
            OptionKey::Unit(u) => write!(f, "{}", u),
        }
    }
}

/// Tree of legal order completions: every root-to-leaf path is one order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<OptionKey, Options>);

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the subtree under `key`, creating it if needed.
    pub fn insert(&mut self, key: OptionKey) -> &mut Options {
        self.0.entry(key).or_default()
    }

    pub fn get(&self, key: &OptionKey) -> Option<&Options> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
        self.0.keys()
    }

    /// Every root-to-leaf path.
    pub fn paths(&self) -> Vec<Vec<OptionKey>> {
        let mut result = Vec::new();
        for (key, sub) in &self.0 {
            if sub.is_empty() {
                result.push(vec![key.clone()]);
                continue;
            }
            for mut path in sub.paths() {
                path.insert(0, key.clone());
                result.push(path);
            }
        }
        result
    }
}

/// Legal completions of an order of `order_type` for `nation`'s unit (or
/// supply center) in `src`.
pub fn order_options(
    order_type: OrderType,
    v: &mut Validator<'_>,
    nation: &Nation,
    src: &Province,
) -> Options {
    match order_type {
        OrderType::Hold => hold::options(v, nation, src),
        OrderType::Move => movement::options(v, nation, src, false),
        OrderType::MoveViaConvoy => movement::options(v, nation, src, true),
        OrderType::Support => support::options(v, nation, src),
        OrderType::Convoy => convoy::options(v, nation, src),
        OrderType::Build => build::options(v, nation, src),
        OrderType::Disband => disband::options(v, nation, src),
    }
}

/// Every legal order for `nation` this phase, keyed by province then order type.
pub fn options(board: &Board, nation: &Nation) -> Options {
    let mut result = Options::new();
    let mut v = Validator::new(board);
    for prov in board.graph().provinces() {
        for order_type in ORDER_TYPES {
            let opts = order_options(order_type, &mut v, nation, &prov);
            if !opts.is_empty() {
                *result
                    .insert(OptionKey::Province(prov.clone()))
                    .insert(OptionKey::Order(order_type)) = opts;
            }
        }
    }
    result
}
