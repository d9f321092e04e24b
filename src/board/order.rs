//! Order types for all phases.
//!
//! The order set is closed: hold, move, support (hold or move), convoy,
//! build and disband. Retreats are moves issued during a retreat phase. The
//! behaviour of each kind (validation, adjudication, execution, options)
//! lives in [`crate::orders`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::province::Province;
use super::unit::UnitType;

/// The kind of an order, without its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Hold,
    Move,
    MoveViaConvoy,
    Support,
    Convoy,
    Build,
    Disband,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An order for the unit (or, for builds, the supply center) in `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// `par H`
    Hold { source: Province },

    /// `par - bur`, or `lon - nwy via convoy`
    Move {
        source: Province,
        dest: Province,
        via_convoy: bool,
    },

    /// `mun S kie H`
    SupportHold { source: Province, target: Province },

    /// `mun S kie - ber`
    SupportMove {
        source: Province,
        from: Province,
        to: Province,
    },

    /// `nth C lon - nwy`
    Convoy {
        source: Province,
        from: Province,
        to: Province,
    },

    /// `par B A`. `at` orders competing builds: earlier wins.
    Build {
        source: Province,
        unit_type: UnitType,
        at: u64,
    },

    /// `par D`. In adjustment phases `at` orders competing disbands.
    Disband { source: Province, at: u64 },
}

impl Order {
    pub fn hold(source: impl Into<Province>) -> Order {
        Order::Hold {
            source: source.into(),
        }
    }

    pub fn move_to(source: impl Into<Province>, dest: impl Into<Province>) -> Order {
        Order::Move {
            source: source.into(),
            dest: dest.into(),
            via_convoy: false,
        }
    }

    pub fn move_via_convoy(source: impl Into<Province>, dest: impl Into<Province>) -> Order {
        Order::Move {
            source: source.into(),
            dest: dest.into(),
            via_convoy: true,
        }
    }

    pub fn support_hold(source: impl Into<Province>, target: impl Into<Province>) -> Order {
        Order::SupportHold {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn support_move(
        source: impl Into<Province>,
        from: impl Into<Province>,
        to: impl Into<Province>,
    ) -> Order {
        Order::SupportMove {
            source: source.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn convoy(
        source: impl Into<Province>,
        from: impl Into<Province>,
        to: impl Into<Province>,
    ) -> Order {
        Order::Convoy {
            source: source.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn build(source: impl Into<Province>, unit_type: UnitType, at: u64) -> Order {
        Order::Build {
            source: source.into(),
            unit_type,
            at,
        }
    }

    pub fn disband(source: impl Into<Province>, at: u64) -> Order {
        Order::Disband {
            source: source.into(),
            at,
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Order::Hold { .. } => OrderType::Hold,
            Order::Move {
                via_convoy: false, ..
            } => OrderType::Move,
            Order::Move {
                via_convoy: true, ..
            } => OrderType::MoveViaConvoy,
            Order::SupportHold { .. } | Order::SupportMove { .. } => OrderType::Support,
            Order::Convoy { .. } => OrderType::Convoy,
            Order::Build { .. } => OrderType::Build,
            Order::Disband { .. } => OrderType::Disband,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Order::Move { .. })
    }

    pub fn source(&self) -> &Province {
        match self {
            Order::Hold { source }
            | Order::Move { source, .. }
            | Order::SupportHold { source, .. }
            | Order::SupportMove { source, .. }
            | Order::Convoy { source, .. }
            | Order::Build { source, .. }
            | Order::Disband { source, .. } => source,
        }
    }

    /// Source and destination of a move.
    pub fn move_targets(&self) -> Option<(&Province, &Province)> {
        match self {
            Order::Move { source, dest, .. } => Some((source, dest)),
            _ => None,
        }
    }

    /// Priority of a build or disband; other orders have none.
    pub fn at(&self) -> Option<u64> {
        match self {
            Order::Build { at, .. } | Order::Disband { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// All provinces the order names, source first.
    pub fn targets(&self) -> Vec<&Province> {
        match self {
            Order::Hold { source } | Order::Build { source, .. } | Order::Disband { source, .. } => {
                vec![source]
            }
            Order::Move { source, dest, .. } => vec![source, dest],
            Order::SupportHold { source, target } => vec![source, target],
            Order::SupportMove { source, from, to } | Order::Convoy { source, from, to } => {
                vec![source, from, to]
            }
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hold { source } => write!(f, "{} H", source),
            Order::Move {
                source,
                dest,
                via_convoy,
            } => {
                write!(f, "{} - {}", source, dest)?;
                if *via_convoy {
                    f.write_str(" via convoy")?;
                }
                Ok(())
            }
            Order::SupportHold { source, target } => write!(f, "{} S {} H", source, target),
            Order::SupportMove { source, from, to } => write!(f, "{} S {} - {}", source, from, to),
            Order::Convoy { source, from, to } => write!(f, "{} C {} - {}", source, from, to),
            Order::Build {
                source, unit_type, ..
            } => write!(f, "{} B {}", source, unit_type.notation_char()),
            Order::Disband { source, .. } => write!(f, "{} D", source),
        }
    }
}
