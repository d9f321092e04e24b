//! Read access to a board, with or without the power to resolve orders.
//!
//! Order helpers are written once against [`Lookup`]. During validation they
//! run over a [`Validator`], which never adjudicates anything; during
//! adjudication they run over the [`Resolver`](super::Resolver), where
//! [`Lookup::resolve`] forces evaluation of the dependency.

use crate::board::province::Province;
use crate::board::state::{Board, Found};
use crate::error::{OrderError, Outcome};

pub trait Lookup {
    fn board(&self) -> &Board;

    /// The outcome of the order in `p`.
    fn resolve(&mut self, p: &Province) -> Outcome;

    /// Every unit/order candidate accepted by `pred`. The predicate may
    /// itself resolve orders.
    fn find<F>(&mut self, mut pred: F) -> Vec<Found>
    where
        Self: Sized,
        F: FnMut(&mut Self, &Found) -> bool,
    {
        let mut result = Vec::new();
        for candidate in self.board().candidates() {
            if pred(self, &candidate) {
                result.push(candidate);
            }
        }
        result
    }
}

/// Lookup over an unresolved board.
///
/// `resolve` returns whatever has already been recorded and never
/// adjudicates, so validation stays free of recursion and mutation.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    board: &'a Board,
}

impl<'a> Validator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Validator { board }
    }
}

impl Lookup for Validator<'_> {
    fn board(&self) -> &Board {
        self.board
    }

    fn resolve(&mut self, p: &Province) -> Outcome {
        self.board
            .order(p)
            .and_then(|(prov, _)| self.board.resolutions().get(&prov).cloned())
            .unwrap_or(Err(OrderError::Unresolved))
    }
}
