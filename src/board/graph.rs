//! Province graph: nodes, coasts, flags and adjacency.
//!
//! A graph is built once per variant through [`GraphBuilder`] and is
//! immutable afterwards. Every parent province owns one or more sub-nodes:
//! the parent itself plus one per named coast. Edges run between sub-nodes
//! and carry their own [`Flags`], so `stp` can border `bar` by sea while only
//! `stp/nc` is a legal fleet position.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::convert::Infallible;
use std::fmt;
use std::ops::BitOr;

use super::province::{Nation, Province};

/// Node and edge flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const LAND: Flags = Flags(1);
    pub const SEA: Flags = Flags(1 << 1);
    /// A land node fleets may still convoy through.
    pub const CONVOYABLE: Flags = Flags(1 << 2);
    pub const COAST: Flags = Flags(Self::LAND.0 | Self::SEA.0);
    pub const ARCHIPELAGO: Flags = Flags(Self::COAST.0 | Self::CONVOYABLE.0);

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn land(self) -> bool {
        self.contains(Self::LAND)
    }

    pub const fn sea(self) -> bool {
        self.contains(Self::SEA)
    }

    pub const fn convoyable(self) -> bool {
        self.contains(Self::CONVOYABLE)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.land() {
            names.push("Land");
        }
        if self.sea() {
            names.push("Sea");
        }
        if self.convoyable() {
            names.push("Convoyable");
        }
        write!(f, "{:?}", names)
    }
}

#[derive(Debug, Clone, Default)]
struct SubNode {
    flags: Flags,
    edges: BTreeMap<Province, Flags>,
}

#[derive(Debug, Clone, Default)]
struct Node {
    /// Keyed by coast suffix, `""` for the parent itself.
    subs: BTreeMap<String, SubNode>,
    sc: Option<Nation>,
}

/// The adjacency structure of one variant.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
}

impl Graph {
    fn sub(&self, p: &Province) -> Option<&SubNode> {
        self.nodes
            .get(p.base())
            .and_then(|node| node.subs.get(p.coast().unwrap_or("")))
    }

    /// True if the province, or the named coast, exists.
    pub fn has(&self, p: &Province) -> bool {
        self.sub(p).is_some()
    }

    /// Flags of exactly this sub-node; empty for unknown provinces.
    pub fn flags(&self, p: &Province) -> Flags {
        self.sub(p).map(|s| s.flags).unwrap_or(Flags::NONE)
    }

    /// Union of the flags of the parent and all its coasts.
    pub fn all_flags(&self, p: &Province) -> Flags {
        self.nodes
            .get(p.base())
            .map(|node| node.subs.values().fold(Flags::NONE, |acc, s| acc | s.flags))
            .unwrap_or(Flags::NONE)
    }

    /// Outgoing edges of this sub-node, keyed by destination.
    pub fn edges(&self, p: &Province) -> impl Iterator<Item = (&Province, Flags)> + '_ {
        self.sub(p)
            .into_iter()
            .flat_map(|s| s.edges.iter().map(|(dst, flags)| (dst, *flags)))
    }

    /// Flags of the edge from `src` to `dst`, if it exists.
    pub fn edge(&self, src: &Province, dst: &Province) -> Option<Flags> {
        self.sub(src).and_then(|s| s.edges.get(dst).copied())
    }

    /// The parent and every coast of the province `p` belongs to.
    pub fn coasts(&self, p: &Province) -> Vec<Province> {
        let base = Province::new(p.base());
        self.nodes
            .get(p.base())
            .map(|node| node.subs.keys().map(|coast| base.join(coast)).collect())
            .unwrap_or_default()
    }

    /// The original owner of the supply center in `p`'s parent, if it is one.
    pub fn sc(&self, p: &Province) -> Option<&Nation> {
        self.nodes.get(p.base()).and_then(|node| node.sc.as_ref())
    }

    /// Home supply centers of `nation`.
    pub fn scs(&self, nation: &Nation) -> Vec<Province> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.sc.as_ref() == Some(nation))
            .map(|(name, _)| Province::new(name.as_str()))
            .collect()
    }

    pub fn all_scs(&self) -> Vec<Province> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.sc.is_some())
            .map(|(name, _)| Province::new(name.as_str()))
            .collect()
    }

    /// Nations owning at least one home supply center.
    pub fn nations(&self) -> Vec<Nation> {
        let found: BTreeSet<&Nation> = self
            .nodes
            .values()
            .filter_map(|node| node.sc.as_ref())
            .filter(|nation| !nation.is_neutral())
            .collect();
        found.into_iter().cloned().collect()
    }

    /// Every sub-node, parents and coasts alike.
    pub fn provinces(&self) -> Vec<Province> {
        self.nodes
            .iter()
            .flat_map(|(name, node)| {
                let base = Province::new(name.as_str());
                node.subs.keys().map(move |coast| base.join(coast))
            })
            .collect()
    }

    /// Breadth-first search from `first` to `last`.
    ///
    /// `filter(name, edge_flags, node_flags, sc, trace)` decides whether the
    /// neighbour `name` may be stepped onto; `trace` is the path walked so
    /// far, excluding `first`. The returned path excludes `first` and ends in
    /// `last`.
    pub fn path<F>(&self, first: &Province, last: &Province, mut filter: F) -> Option<Vec<Province>>
    where
        F: FnMut(&Province, Flags, Flags, Option<&Nation>, &[Province]) -> bool,
    {
        match self.try_path(first, last, |name, edge, node, sc, trace| {
            Ok::<bool, Infallible>(filter(name, edge, node, sc, trace))
        }) {
            Ok(path) => path,
            Err(never) => match never {},
        }
    }

    /// [`Graph::path`] with a fallible filter; the first error aborts the search.
    pub fn try_path<F, E>(
        &self,
        first: &Province,
        last: &Province,
        mut filter: F,
    ) -> Result<Option<Vec<Province>>, E>
    where
        F: FnMut(&Province, Flags, Flags, Option<&Nation>, &[Province]) -> Result<bool, E>,
    {
        let mut seen: BTreeSet<(Option<Province>, Province)> = BTreeSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((Vec::<Province>::new(), None::<Province>, first.clone()));

        while let Some((trace, from, at)) = queue.pop_front() {
            if !seen.insert((from, at.clone())) {
                continue;
            }
            let Some(sub) = self.sub(&at) else {
                continue;
            };
            for (name, edge_flags) in &sub.edges {
                if filter(name, *edge_flags, self.flags(name), self.sc(name), &trace)? {
                    let mut next = trace.clone();
                    next.push(name.clone());
                    if name == last {
                        return Ok(Some(next));
                    }
                    queue.push_back((next, Some(at.clone()), name.clone()));
                }
            }
        }
        Ok(None)
    }
}

/// Fluent construction of a [`Graph`].
///
/// ```
/// use adjudicator::board::graph::{Flags, GraphBuilder};
///
/// let graph = GraphBuilder::new()
///     .prov("a").conn("b", Flags::LAND).flag(Flags::LAND)
///     .prov("b").conn("a", Flags::LAND).flag(Flags::LAND).sc("Somewhere")
///     .done();
/// assert!(graph.has(&"a".into()));
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    current: Option<Province>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    fn sub_mut(&mut self, p: &Province) -> &mut SubNode {
        self.graph
            .nodes
            .entry(p.base().to_string())
            .or_default()
            .subs
            .entry(p.coast().unwrap_or("").to_string())
            .or_default()
    }

    /// Starts (or reopens) the sub-node `name`; later calls apply to it.
    pub fn prov(mut self, name: &str) -> Self {
        let p = Province::from(name);
        self.sub_mut(&p);
        self.current = Some(p);
        self
    }

    /// Adds an edge from the current sub-node to `dst`.
    pub fn conn(mut self, dst: &str, flags: Flags) -> Self {
        let dst = Province::from(dst);
        self.sub_mut(&dst);
        if let Some(src) = self.current.clone() {
            self.sub_mut(&src).edges.insert(dst, flags);
        }
        self
    }

    pub fn flag(mut self, flags: Flags) -> Self {
        if let Some(src) = self.current.clone() {
            let sub = self.sub_mut(&src);
            sub.flags = sub.flags | flags;
        }
        self
    }

    /// Marks the current province's parent as a supply center owned by `nation`.
    pub fn sc(mut self, nation: &str) -> Self {
        if let Some(src) = self.current.clone() {
            if let Some(node) = self.graph.nodes.get_mut(src.base()) {
                node.sc = Some(Nation::from(nation));
            }
        }
        self
    }

    pub fn done(self) -> Graph {
        self.graph
    }
}
