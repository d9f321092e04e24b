//! Guess-and-verify dependency resolution.
//!
//! Orders are adjudicated lazily and recursively: an order's adjudication
//! asks the resolver for the outcome of whichever orders it depends on.
//! When a province is requested while it is already being adjudicated, the
//! resolver answers with a pessimistic guess and remembers the province as a
//! dependency. Once the outer adjudication returns, it is repeated with an
//! optimistic guess. If both guesses agree the result stands; if they
//! disagree the cycle is ambiguous and the board's [`BackupRule`] decides.
//!
//! Results are only recorded on the board when no guesses are outstanding,
//! so a recorded resolution never changes within a phase.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, trace};

use super::backup::BackupRule;
use super::lookup::Lookup;
use crate::board::order::Order;
use crate::board::province::Province;
use crate::board::state::Board;
use crate::error::{Error, OrderError, Outcome, Result};

/// Resolution state of a single province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Unvisited,
    Resolving,
    Guessed(Outcome),
    Resolved(Outcome),
}

/// Resolves orders on a mutable board.
///
/// Fatal errors (an unknown cycle, a dependency without an order) cannot
/// travel through [`Outcome`]; they are kept until [`Resolver::finish`] and
/// every later `resolve` answers [`OrderError::Unresolved`].
#[derive(Debug)]
pub struct Resolver<'a> {
    board: &'a mut Board,
    rule: Arc<dyn BackupRule>,
    deps: Vec<Province>,
    guesses: BTreeMap<Province, Outcome>,
    resolving: BTreeSet<Province>,
    fatal: Option<Error>,
    adjudications: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        let rule = board.backup_rule();
        Resolver {
            board,
            rule,
            deps: Vec::new(),
            guesses: BTreeMap::new(),
            resolving: BTreeSet::new(),
            fatal: None,
            adjudications: 0,
        }
    }

    pub fn board_mut(&mut self) -> &mut Board {
        self.board
    }

    /// Number of times any order was adjudicated through this resolver.
    pub fn adjudications(&self) -> usize {
        self.adjudications
    }

    pub fn status(&self, p: &Province) -> Status {
        let prov = self.board.order(p).map(|(prov, _)| prov).unwrap_or_else(|| p.clone());
        if let Some(outcome) = self.board.resolutions().get(&prov) {
            Status::Resolved(outcome.clone())
        } else if let Some(guess) = self.guesses.get(&prov) {
            Status::Guessed(guess.clone())
        } else if self.resolving.contains(&prov) {
            Status::Resolving
        } else {
            Status::Unvisited
        }
    }

    /// Resolves `p` from the top of a call chain.
    pub fn resolve_top(&mut self, p: &Province) -> Result<Outcome> {
        let outcome = self.resolve(p);
        debug_assert!(self.resolving.is_empty(), "leaked resolving set");
        self.finish()?;
        Ok(outcome)
    }

    /// Returns the first fatal error raised since the resolver was created.
    pub fn finish(&mut self) -> Result<()> {
        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: Error) -> Outcome {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        Err(OrderError::Unresolved)
    }

    fn adjudicate(&mut self, prov: &Province, order: &Order) -> Outcome {
        self.adjudications += 1;
        trace!("adjudicating {}", order);
        let outcome = order.adjudicate(self);
        match &outcome {
            Ok(()) => trace!("{}: success", prov),
            Err(err) => trace!("{}: failure: {}", prov, err),
        }
        outcome
    }

    fn backup_rule(&mut self) -> Result<()> {
        let deps = std::mem::take(&mut self.deps);
        debug!("calling backup rule with {:?}", deps);
        let rule = Arc::clone(&self.rule);
        rule.apply(self.board, &deps)
    }
}

impl Lookup for Resolver<'_> {
    fn board(&self) -> &Board {
        self.board
    }

    fn resolve(&mut self, p: &Province) -> Outcome {
        if self.fatal.is_some() {
            return Err(OrderError::Unresolved);
        }
        let Some((prov, order)) = self.board.order(p) else {
            return self.fail(Error::MissingOrder(p.clone()));
        };
        if let Some(outcome) = self.board.resolutions().get(&prov) {
            return outcome.clone();
        }

        let outcome = if let Some(guess) = self.guesses.get(&prov) {
            guess.clone()
        } else if self.resolving.contains(&prov) {
            trace!("already resolving {}, guessing failure", prov);
            let guess = Err(OrderError::Unresolved);
            self.guesses.insert(prov.clone(), guess.clone());
            self.deps.push(prov.clone());
            guess
        } else {
            self.resolving.insert(prov.clone());
            let n_guesses = self.guesses.len();
            let first = self.adjudicate(&prov, &order);
            self.resolving.remove(&prov);

            if self.guesses.contains_key(&prov) {
                trace!("guess made for {}, retrying with success", prov);
                self.guesses.insert(prov.clone(), Ok(()));
                let second = self.adjudicate(&prov, &order);
                self.guesses.remove(&prov);
                if first.is_ok() != second.is_ok() {
                    if let Err(err) = self.backup_rule() {
                        return self.fail(err);
                    }
                    self.resolve(&prov)
                } else {
                    first
                }
            } else {
                if self.guesses.len() != n_guesses {
                    self.deps.push(prov.clone());
                }
                first
            }
        };

        if self.guesses.is_empty() && self.fatal.is_none() {
            self.board.set_resolution(prov, outcome.clone());
        }
        outcome
    }
}
