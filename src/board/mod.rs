//! Board representation: provinces, the province graph, units, orders and
//! the mutable per-phase state.

pub mod graph;
pub mod order;
pub mod province;
pub mod state;
pub mod unit;

pub use graph::{Flags, Graph, GraphBuilder};
pub use order::{Order, OrderType};
pub use province::{Nation, Province};
pub use state::{Board, Found, Phase, PhaseType, Season, Snapshot};
pub use unit::{Unit, UnitType};
