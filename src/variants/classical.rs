//! The standard seven-nation map, starting in Spring 1901.

use std::sync::{Arc, OnceLock};

use super::Variant;
use crate::board::graph::{Flags, Graph, GraphBuilder};
use crate::board::province::Province;
use crate::board::state::{Board, Phase, PhaseType, Season};
use crate::board::unit::{Unit, UnitType};
use crate::error::Result;
use crate::resolve::ClassicalRule;

pub const NAME: &str = "classical";

pub const VARIANT: Variant = Variant {
    name: NAME,
    solo_threshold: 18,
    start,
    blank,
};

const S: Flags = Flags::SEA;
const L: Flags = Flags::LAND;
const C: Flags = Flags::COAST;
const NONE: Flags = Flags::NONE;

type Row = (&'static str, Flags, Option<&'static str>, &'static [(&'static str, Flags)]);

/// Sub-node, node flags, home nation of the supply center (`Neutral` for
/// unowned centers), then edges with their flags.
#[rustfmt::skip]
const MAP: &[Row] = &[
    ("nat", S, None, &[("nrg", S), ("cly", S), ("lvp", S), ("iri", S), ("mid", S)]),
    ("nrg", S, None, &[("nat", S), ("bar", S), ("nwy", S), ("nth", S), ("edi", S), ("cly", S)]),
    ("bar", S, None, &[("nrg", S), ("stp/nc", S), ("nwy", S), ("stp", S)]),
    ("stp/nc", S, None, &[("bar", S), ("nwy", S)]),
    ("stp", L, Some("Russia"), &[("fin", L), ("nwy", L), ("mos", L), ("lvn", L), ("bar", S), ("bot", S)]),
    ("mos", L, Some("Russia"), &[("stp", L), ("sev", L), ("ukr", L), ("war", L), ("lvn", L)]),
    ("sev", C, Some("Russia"), &[("ukr", L), ("mos", L), ("arm", C), ("bla", S), ("rum", C)]),
    ("arm", C, None, &[("ank", C), ("bla", S), ("sev", C), ("syr", L), ("smy", L)]),
    ("syr", C, None, &[("eas", S), ("smy", C), ("arm", L)]),
    ("eas", S, None, &[("ion", S), ("aeg", S), ("smy", S), ("syr", S)]),
    ("ion", S, None, &[("apu", S), ("adr", S), ("tun", S), ("tys", S), ("nap", S), ("alb", S), ("gre", S), ("aeg", S), ("eas", S)]),
    ("tun", C, Some("Neutral"), &[("naf", C), ("wes", S), ("tys", S), ("ion", S)]),
    ("naf", C, None, &[("mid", S), ("wes", S), ("tun", C)]),
    ("mid", S, None, &[("wes", S), ("nat", S), ("iri", S), ("eng", S), ("bre", S), ("gas", S), ("spa/nc", S), ("por", S), ("spa/sc", S), ("naf", S), ("spa", S)]),
    ("iri", S, None, &[("nat", S), ("lvp", S), ("wal", S), ("eng", S), ("mid", S)]),
    ("lvp", C, Some("England"), &[("iri", S), ("nat", S), ("cly", C), ("edi", L), ("yor", L), ("wal", C)]),
    ("cly", C, None, &[("nat", S), ("nrg", S), ("edi", C), ("lvp", C)]),
    ("edi", C, Some("England"), &[("cly", C), ("nrg", S), ("nth", S), ("yor", C), ("lvp", L)]),
    ("nth", S, None, &[("eng", S), ("edi", S), ("nrg", S), ("nwy", S), ("ska", S), ("den", S), ("hel", S), ("hol", S), ("bel", S), ("lon", S), ("yor", S)]),
    ("nwy", C, Some("Neutral"), &[("nth", S), ("nrg", S), ("bar", S), ("stp/nc", S), ("stp", L), ("fin", L), ("swe", C), ("ska", S)]),
    ("stp/sc", S, None, &[("bot", S), ("fin", S), ("lvn", S)]),
    ("lvn", C, None, &[("stp", L), ("bal", S), ("bot", S), ("stp/sc", S), ("mos", L), ("war", L), ("pru", C)]),
    ("war", L, Some("Russia"), &[("sil", L), ("pru", L), ("lvn", L), ("mos", L), ("ukr", L), ("gal", L)]),
    ("ukr", L, None, &[("war", L), ("mos", L), ("sev", L), ("rum", L), ("gal", L)]),
    ("bla", S, None, &[("bul/ec", S), ("rum", S), ("sev", S), ("arm", S), ("ank", S), ("con", S), ("bul", S)]),
    ("ank", C, Some("Turkey"), &[("con", C), ("bla", S), ("arm", C), ("smy", L)]),
    ("smy", C, Some("Turkey"), &[("aeg", S), ("con", C), ("ank", L), ("arm", L), ("syr", C), ("eas", S)]),
    ("aeg", S, None, &[("eas", S), ("ion", S), ("gre", S), ("bul/sc", S), ("con", S), ("smy", S), ("bul", S)]),
    ("gre", C, Some("Neutral"), &[("ion", S), ("alb", C), ("ser", L), ("bul", L), ("bul/sc", S), ("aeg", S)]),
    ("nap", C, Some("Italy"), &[("tys", S), ("rom", C), ("apu", C), ("ion", S)]),
    ("tys", S, None, &[("wes", S), ("gol", S), ("tus", S), ("rom", S), ("nap", S), ("ion", S), ("tun", S)]),
    ("wes", S, None, &[("mid", S), ("spa/sc", S), ("gol", S), ("tys", S), ("tun", S), ("naf", S), ("spa", S)]),
    ("spa/sc", S, None, &[("mid", S), ("por", S), ("mar", S), ("gol", S), ("wes", S)]),
    ("spa", L, Some("Neutral"), &[("por", L), ("gas", L), ("mar", L), ("mid", S), ("gol", S), ("wes", S)]),
    ("spa/nc", S, None, &[("por", S), ("mid", S), ("gas", S)]),
    ("por", C, Some("Neutral"), &[("mid", S), ("spa/nc", S), ("spa", L), ("spa/sc", S)]),
    ("gas", C, None, &[("mid", S), ("bre", C), ("par", L), ("bur", L), ("mar", L), ("spa", L), ("spa/nc", S)]),
    ("bre", C, Some("France"), &[("mid", S), ("eng", S), ("pic", C), ("par", L), ("gas", C)]),
    ("eng", S, None, &[("mid", S), ("iri", S), ("wal", S), ("lon", S), ("nth", S), ("bel", S), ("pic", S), ("bre", S)]),
    ("wal", C, None, &[("iri", S), ("lvp", C), ("yor", L), ("lon", C), ("eng", S)]),
    ("yor", C, None, &[("lvp", L), ("edi", C), ("nth", S), ("lon", C), ("wal", L)]),
    ("ska", S, None, &[("nth", S), ("nwy", S), ("swe", S), ("den", S)]),
    ("swe", C, Some("Neutral"), &[("ska", S), ("nwy", C), ("fin", C), ("bot", S), ("bal", S), ("den", C)]),
    ("fin", C, None, &[("nwy", L), ("bot", S), ("swe", C), ("stp", L), ("stp/sc", S)]),
    ("bot", S, None, &[("swe", S), ("fin", S), ("stp/sc", S), ("lvn", S), ("bal", S), ("stp", S)]),
    ("bal", S, None, &[("den", S), ("swe", S), ("bot", S), ("lvn", S), ("pru", S), ("ber", S), ("kie", S)]),
    ("pru", C, None, &[("ber", C), ("bal", S), ("lvn", C), ("war", L), ("sil", L)]),
    ("sil", L, None, &[("mun", L), ("ber", L), ("pru", L), ("war", L), ("gal", L), ("boh", L)]),
    ("gal", L, None, &[("boh", L), ("sil", L), ("war", L), ("ukr", L), ("rum", L), ("bud", L), ("vie", L)]),
    ("rum", C, Some("Neutral"), &[("bla", S), ("bud", L), ("gal", L), ("ukr", L), ("sev", C), ("bul/ec", S), ("bul", L), ("ser", L)]),
    ("bul/ec", S, None, &[("rum", S), ("bla", S), ("con", S)]),
    ("bul", L, Some("Neutral"), &[("ser", L), ("rum", L), ("con", L), ("gre", L), ("aeg", S), ("bla", S)]),
    ("con", C, Some("Turkey"), &[("bul/sc", S), ("bul", L), ("bul/ec", S), ("bla", S), ("ank", C), ("smy", C), ("aeg", S)]),
    ("bul/sc", S, None, &[("gre", S), ("con", S), ("aeg", S)]),
    ("ser", L, Some("Neutral"), &[("tri", L), ("bud", L), ("rum", L), ("bul", L), ("gre", L), ("alb", L)]),
    ("alb", C, None, &[("adr", S), ("tri", C), ("ser", L), ("gre", C), ("ion", S)]),
    ("adr", S, None, &[("ven", S), ("tri", S), ("alb", S), ("ion", S), ("apu", S)]),
    ("apu", C, None, &[("rom", L), ("ven", C), ("adr", S), ("ion", S), ("nap", C)]),
    ("rom", C, Some("Italy"), &[("tys", S), ("tus", C), ("ven", L), ("apu", L), ("nap", C)]),
    ("tus", C, None, &[("gol", S), ("pie", C), ("ven", L), ("rom", C), ("tys", S)]),
    ("gol", S, None, &[("spa/sc", S), ("mar", S), ("pie", S), ("tus", S), ("tys", S), ("wes", S), ("spa", S)]),
    ("mar", C, Some("France"), &[("spa", L), ("gas", L), ("bur", L), ("pie", C), ("gol", S), ("spa/sc", S)]),
    ("bur", L, None, &[("par", L), ("pic", L), ("bel", L), ("ruh", L), ("mun", L), ("mar", L), ("gas", L)]),
    ("par", L, Some("France"), &[("bre", L), ("pic", L), ("bur", L), ("gas", L)]),
    ("pic", C, None, &[("bre", C), ("eng", S), ("bel", C), ("bur", L), ("par", L)]),
    ("lon", C, Some("England"), &[("wal", C), ("yor", C), ("nth", S), ("eng", S)]),
    ("bel", C, Some("Neutral"), &[("pic", C), ("eng", S), ("nth", S), ("hol", C), ("ruh", L), ("bur", L)]),
    ("hol", C, Some("Neutral"), &[("nth", S), ("hel", S), ("kie", C), ("ruh", L), ("bel", C)]),
    ("hel", S, None, &[("nth", S), ("den", S), ("kie", S), ("hol", S)]),
    ("den", C, Some("Neutral"), &[("hel", S), ("nth", S), ("ska", S), ("swe", C), ("bal", S), ("kie", C)]),
    ("ber", C, Some("Germany"), &[("kie", C), ("bal", S), ("pru", C), ("sil", L), ("mun", L)]),
    ("mun", L, Some("Germany"), &[("bur", L), ("ruh", L), ("kie", L), ("ber", L), ("sil", L), ("boh", L), ("tyr", L)]),
    ("boh", L, None, &[("mun", L), ("sil", L), ("gal", L), ("vie", L), ("tyr", L)]),
    ("vie", L, Some("Austria"), &[("tyr", L), ("boh", L), ("gal", L), ("bud", L), ("tri", L)]),
    ("bud", L, Some("Austria"), &[("tri", L), ("vie", L), ("gal", L), ("rum", L), ("ser", L)]),
    ("tri", C, Some("Austria"), &[("adr", S), ("ven", C), ("tyr", L), ("vie", L), ("bud", L), ("ser", L), ("alb", C)]),
    ("ven", C, Some("Italy"), &[("tus", L), ("pie", L), ("tyr", L), ("tri", C), ("adr", S), ("apu", C), ("rom", L)]),
    ("pie", C, None, &[("mar", C), ("tyr", L), ("ven", L), ("tus", C), ("gol", S)]),
    ("ruh", L, None, &[("bel", L), ("hol", L), ("kie", L), ("mun", L), ("bur", L)]),
    ("tyr", L, None, &[("mun", L), ("boh", L), ("vie", L), ("tri", L), ("ven", L), ("pie", L)]),
    ("kie", C, Some("Germany"), &[("hol", C), ("hel", S), ("den", C), ("bal", S), ("ber", C), ("mun", L), ("ruh", L)]),
    ("swi", NONE, None, &[]),
];

const START_UNITS: &[(&str, UnitType, &str)] = &[
    ("tri", UnitType::Fleet, "Austria"),
    ("vie", UnitType::Army, "Austria"),
    ("bud", UnitType::Army, "Austria"),
    ("edi", UnitType::Fleet, "England"),
    ("lvp", UnitType::Army, "England"),
    ("lon", UnitType::Fleet, "England"),
    ("bre", UnitType::Fleet, "France"),
    ("par", UnitType::Army, "France"),
    ("mar", UnitType::Army, "France"),
    ("kie", UnitType::Fleet, "Germany"),
    ("ber", UnitType::Army, "Germany"),
    ("mun", UnitType::Army, "Germany"),
    ("ven", UnitType::Army, "Italy"),
    ("rom", UnitType::Army, "Italy"),
    ("nap", UnitType::Fleet, "Italy"),
    ("stp/sc", UnitType::Fleet, "Russia"),
    ("mos", UnitType::Army, "Russia"),
    ("war", UnitType::Army, "Russia"),
    ("sev", UnitType::Fleet, "Russia"),
    ("con", UnitType::Army, "Turkey"),
    ("smy", UnitType::Army, "Turkey"),
    ("ank", UnitType::Fleet, "Turkey"),
];

/// The shared classical graph, built on first use.
pub fn graph() -> Arc<Graph> {
    static GRAPH: OnceLock<Arc<Graph>> = OnceLock::new();
    Arc::clone(GRAPH.get_or_init(|| {
        let mut builder = GraphBuilder::new();
        for (name, flags, sc, edges) in MAP {
            builder = builder.prov(name).flag(*flags);
            for (dst, edge_flags) in edges.iter() {
                builder = builder.conn(dst, *edge_flags);
            }
            if let Some(nation) = sc {
                builder = builder.sc(nation);
            }
        }
        Arc::new(builder.done())
    }))
}

/// An empty board: no units, no supply center owners.
pub fn blank(phase: Phase) -> Board {
    Board::new(graph(), phase, Arc::new(ClassicalRule))
}

/// The Spring 1901 starting position.
pub fn start() -> Result<Board> {
    let mut board = blank(Phase::new(1901, Season::Spring, PhaseType::Movement));
    let units = START_UNITS
        .iter()
        .map(|(prov, unit_type, nation)| (Province::from(*prov), Unit::new(*unit_type, *nation)));
    board.set_units(units)?;
    let graph = board.shared_graph();
    let homes = graph
        .all_scs()
        .into_iter()
        .filter_map(|prov| {
            let owner = graph.sc(&prov)?;
            (!owner.is_neutral()).then(|| (prov.clone(), owner.clone()))
        });
    board.set_supply_centers(homes);
    Ok(board)
}

/// The starting units and centers, moved to `phase`.
#[cfg(test)]
pub(crate) fn start_at(phase: Phase) -> Board {
    let mut board = start().unwrap();
    let mut snapshot = board.dump();
    snapshot.phase = phase;
    board.load(snapshot);
    board
}
