//! Error types.
//!
//! [`OrderError`] is what players see: why an order was rejected during
//! validation, or why it failed during adjudication. It is stored as the
//! province's resolution and never aborts the phase. [`Error`] is reserved
//! for engine defects and malformed input that make the phase impossible to
//! adjudicate at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::order::OrderType;
use crate::board::province::Province;
use crate::protocol::notation::NotationError;

/// Why an order was rejected or failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OrderError {
    // Validation: the order is not understood.
    #[error("invalid source")]
    InvalidSource,
    #[error("invalid destination")]
    InvalidDestination,
    #[error("invalid target")]
    InvalidTarget,
    #[error("invalid phase")]
    InvalidPhase,

    // Validation: the order is understood but not allowed.
    #[error("missing unit")]
    MissingUnit,
    #[error("illegal destination")]
    IllegalDestination,
    #[error("missing convoy path")]
    MissingConvoyPath,
    #[error("illegal move")]
    IllegalMove,
    #[error("illegal support position")]
    IllegalSupportPosition,
    #[error("illegal support destination")]
    IllegalSupportDestination,
    #[error("missing support unit")]
    MissingSupportUnit,
    #[error("illegal support move")]
    IllegalSupportMove,
    #[error("illegal convoy path")]
    IllegalConvoyPath,
    #[error("illegal convoy move")]
    IllegalConvoyMove,
    #[error("missing convoyee")]
    MissingConvoyee,
    #[error("illegal convoyer")]
    IllegalConvoyer,
    #[error("illegal convoyee")]
    IllegalConvoyee,
    #[error("occupied supply center")]
    OccupiedSupplyCenter,
    #[error("missing supply center")]
    MissingSupplyCenter,
    #[error("hostile supply center")]
    HostileSupplyCenter,
    #[error("missing surplus")]
    MissingSurplus,
    #[error("missing deficit")]
    MissingDeficit,
    #[error("illegal unit type")]
    IllegalUnitType,
    #[error("illegal retreat")]
    IllegalRetreat,

    // Adjudication failures.
    #[error("bounced against {0}")]
    Bounce(Province),
    #[error("support broken by {0}")]
    SupportBroken(Province),
    #[error("convoy dislodged by {0}")]
    ConvoyDislodged(Province),
    #[error("convoy paradox")]
    ConvoyParadox,
    #[error("double build in {0:?}")]
    DoubleBuild(Vec<Province>),
    #[error("illegal build")]
    IllegalBuild,
    #[error("illegal disband")]
    IllegalDisband,
    #[error("forced disband")]
    ForcedDisband,

    /// Placeholder outcome for a dependency that cannot be decided yet: the
    /// pessimistic guess inside a dependency cycle, or a lookup outside of
    /// adjudication.
    #[error("unresolved")]
    Unresolved,
}

/// The outcome of one province's order: success, or why it failed.
pub type Outcome = std::result::Result<(), OrderError>;

/// Why a nation's order set for the phase looks incomplete or
/// self-contradictory. These never affect adjudication; they are hints for
/// whoever is about to submit the orders.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Inconsistency {
    #[error("missing order")]
    MissingOrder,
    #[error("{order_type}: found {found}, want {want}")]
    OrderTypeCount {
        order_type: OrderType,
        found: usize,
        want: usize,
    },
    /// Supporting an own unit that was ordered to do something else.
    #[error("mismatched supporter for {0}")]
    MismatchedSupporter(Province),
    /// Convoying an own army that was not ordered along the convoy.
    #[error("mismatched convoyer for {0}")]
    MismatchedConvoyer(Province),
    #[error(transparent)]
    Invalid(OrderError),
}

/// Fatal engine errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown circular dependency between {0:?}")]
    UnknownCycle(Vec<Province>),

    #[error("no order to resolve in {0}")]
    MissingOrder(Province),

    #[error("no unit in {0}")]
    MissingUnit(Province),

    #[error("{province} is already occupied by {occupant}")]
    Occupied { province: Province, occupant: String },

    #[error("unknown province {0}")]
    UnknownProvince(Province),

    #[error("unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("notation: {0}")]
    Notation(#[from] NotationError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
