//! Cycle-breaking policies.
//!
//! When the resolver finds that a set of orders depend on each other and
//! both a pessimistic and an optimistic guess are self-consistent, it hands
//! the provinces involved to a [`BackupRule`]. The rule writes resolutions
//! for some of them; the resolver then retries.

use std::fmt;

use log::debug;

use crate::board::order::Order;
use crate::board::province::Province;
use crate::board::state::Board;
use crate::error::{Error, OrderError, Result};

/// Decides the outcome of an ambiguous dependency cycle.
pub trait BackupRule: fmt::Debug + Send + Sync {
    /// Records resolutions on `board` for (some of) `deps`. Returning an
    /// error aborts the phase.
    fn apply(&self, board: &mut Board, deps: &[Province]) -> Result<()>;
}

/// The standard rule set: circular movement succeeds, convoy paradoxes fail
/// the convoys involved, and anything else is an engine defect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalRule;

impl BackupRule for ClassicalRule {
    fn apply(&self, board: &mut Board, deps: &[Province]) -> Result<()> {
        let orders: Vec<(Province, Order)> =
            deps.iter().filter_map(|prov| board.order(prov)).collect();

        if orders.iter().all(|(_, order)| order.is_move()) {
            debug!("circular movement between {:?}", deps);
            for prov in deps {
                board.set_resolution(prov.clone(), Ok(()));
            }
            return Ok(());
        }

        let convoys: Vec<&Province> = orders
            .iter()
            .filter(|(_, order)| matches!(order, Order::Convoy { .. }))
            .map(|(prov, _)| prov)
            .collect();
        if !convoys.is_empty() {
            debug!("convoy paradox between {:?}", deps);
            for prov in convoys {
                board.set_resolution(prov.clone(), Err(OrderError::ConvoyParadox));
            }
            return Ok(());
        }

        Err(Error::UnknownCycle(deps.to_vec()))
    }
}
