//! Order resolution.
//!
//! Resolves a set of simultaneous orders into per-province outcomes using
//! recursive guess-and-verify adjudication, breaks ambiguous dependency
//! cycles with a pluggable backup rule, and sequences the game phases.

pub mod backup;
pub mod lookup;
pub mod phase;
pub mod resolver;

pub use backup::{BackupRule, ClassicalRule};
pub use lookup::{Lookup, Validator};
pub use resolver::{Resolver, Status};
