//! DATC (Diplomacy Adjudicator Test Cases) compliance tests.
//!
//! Each case places units on a blank classical board, submits orders in
//! text notation and adjudicates one phase through `Board::next`.
//! Reference: http://web.inter.nl.net/users/L.B.Kruijswijk/
//!
//! Sections covered: 6.A (basic), 6.B (coastal), 6.C (circular),
//! 6.D (supports), 6.E (head-to-head), 6.F (convoys), 6.G (convoy
//! disruption), 6.H (retreats), 6.I (builds), 6.J (civil disorder).

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use adjudicator::board::province::{Nation, Province};
use adjudicator::board::state::{Board, Phase, PhaseType, Season};
use adjudicator::board::unit::{Unit, UnitType};
use adjudicator::error::{OrderError, Outcome};
use adjudicator::protocol::notation::parse_orders;
use adjudicator::variants::classical;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn p(name: &str) -> Province {
    Province::from(name)
}

fn blank(season: Season, kind: PhaseType) -> Board {
    classical::blank(Phase::new(1901, season, kind))
}

/// Places units written as `"A par France"` or `"F stp/sc Russia"`.
fn place(board: &mut Board, units: &[&str]) {
    for entry in units {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let unit_type = match parts[0] {
            "A" => UnitType::Army,
            "F" => UnitType::Fleet,
            other => panic!("unknown unit type {}", other),
        };
        board
            .set_unit(parts[1], Unit::new(unit_type, parts[2]))
            .unwrap();
    }
}

fn movement(units: &[&str]) -> Board {
    let mut board = blank(Season::Spring, PhaseType::Movement);
    place(&mut board, units);
    board
}

fn submit(board: &mut Board, orders: &str) {
    for order in parse_orders(orders, 0).unwrap() {
        board.set_order(order.source().clone(), order).unwrap();
    }
}

/// Submits `orders` and adjudicates the phase.
fn adjudicate(board: &mut Board, orders: &str) {
    submit(board, orders);
    board.next().unwrap();
}

fn outcome(board: &Board, prov: &str) -> Outcome {
    board
        .resolutions()
        .get(&p(prov))
        .cloned()
        .unwrap_or_else(|| panic!("no resolution for {}", prov))
}

fn succeeds(board: &Board, prov: &str) {
    assert_eq!(outcome(board, prov), Ok(()), "order in {}", prov);
}

fn fails(board: &Board, prov: &str) {
    assert!(outcome(board, prov).is_err(), "order in {} succeeded", prov);
}

/// The nation and exact position of whatever unit stands in `prov`.
fn occupant(board: &Board, prov: &str) -> Option<(Province, String)> {
    board
        .unit(&p(prov))
        .map(|(at, unit)| (at, unit.nation.as_str().to_string()))
}

fn owner(board: &Board, prov: &str) -> Option<String> {
    occupant(board, prov).map(|(_, nation)| nation)
}

fn is_dislodged(board: &Board, prov: &str) -> bool {
    board.dislodged(&p(prov)).is_some()
}

/// Dislodged with nowhere to retreat, so removed straight away.
fn is_destroyed(board: &Board, prov: &str) -> bool {
    !is_dislodged(board, prov) && board.force_disbands().contains(&p(prov))
}

// ===========================================================================
// SECTION 6.A: BASIC CHECKS
// ===========================================================================

/// 6.A.1: Moving to an area that is not a neighbour.
#[test]
fn datc_6a1_move_to_non_adjacent_area() {
    let mut board = movement(&["F nth England"]);
    adjudicate(&mut board, "F nth - pic");
    assert_eq!(outcome(&board, "nth"), Err(OrderError::IllegalMove));
    assert_eq!(owner(&board, "nth").as_deref(), Some("England"));
}

/// 6.A.2: Move army to sea.
#[test]
fn datc_6a2_move_army_to_sea() {
    let mut board = movement(&["A lvp England"]);
    adjudicate(&mut board, "A lvp - iri");
    assert_eq!(outcome(&board, "lvp"), Err(OrderError::IllegalDestination));
    assert!(occupant(&board, "iri").is_none());
}

/// 6.A.3: Move fleet to land.
#[test]
fn datc_6a3_move_fleet_to_land() {
    let mut board = movement(&["F kie Germany"]);
    adjudicate(&mut board, "F kie - mun");
    assert_eq!(outcome(&board, "kie"), Err(OrderError::IllegalDestination));
}

/// 6.A.4: Move to own sector.
#[test]
fn datc_6a4_move_to_own_sector() {
    let mut board = movement(&["F kie Germany"]);
    adjudicate(&mut board, "F kie - kie");
    assert_eq!(outcome(&board, "kie"), Err(OrderError::IllegalMove));
}

/// 6.A.5: Move to own sector with convoy.
/// Every English order is illegal, so Yorkshire is left holding alone.
#[test]
fn datc_6a5_move_to_own_sector_with_convoy() {
    let mut board = movement(&[
        "F nth England",
        "A yor England",
        "A lvp England",
        "F lon Germany",
        "A wal Germany",
    ]);
    adjudicate(
        &mut board,
        "F nth C A yor - yor; A yor - yor; A lvp S A yor - yor; F lon - yor; A wal S F lon - yor",
    );
    assert_eq!(outcome(&board, "nth"), Err(OrderError::IllegalConvoyMove));
    assert_eq!(outcome(&board, "yor"), Err(OrderError::IllegalMove));
    assert_eq!(outcome(&board, "lvp"), Err(OrderError::IllegalSupportMove));
    succeeds(&board, "lon");
    assert_eq!(owner(&board, "yor").as_deref(), Some("Germany"));
    assert!(is_dislodged(&board, "yor"));
}

/// 6.A.7: Only armies can be convoyed.
#[test]
fn datc_6a7_only_armies_can_be_convoyed() {
    let mut board = movement(&["F lon England", "F nth England"]);
    adjudicate(&mut board, "F lon - bel; F nth C A lon - bel");
    assert_eq!(outcome(&board, "lon"), Err(OrderError::IllegalMove));
    assert_eq!(outcome(&board, "nth"), Err(OrderError::IllegalConvoyee));
    assert_eq!(owner(&board, "lon").as_deref(), Some("England"));
}

/// 6.A.8: Support to hold yourself is not possible.
#[test]
fn datc_6a8_support_to_hold_yourself_is_not_possible() {
    let mut board = movement(&["A ven Italy", "A tyr Italy", "F tri Austria"]);
    adjudicate(&mut board, "A ven - tri; A tyr S A ven - tri; F tri S F tri H");
    assert_eq!(outcome(&board, "tri"), Err(OrderError::IllegalSupportPosition));
    succeeds(&board, "ven");
    assert!(is_dislodged(&board, "tri"));
}

/// 6.A.9: Fleets must follow coast if not on sea.
#[test]
fn datc_6a9_fleets_must_follow_coast() {
    let mut board = movement(&["F rom Italy"]);
    adjudicate(&mut board, "F rom - ven");
    assert_eq!(outcome(&board, "rom"), Err(OrderError::IllegalMove));
}

/// 6.A.10: Support on unreachable destination is not possible.
#[test]
fn datc_6a10_support_on_unreachable_destination() {
    let mut board = movement(&["A ven Austria", "F rom Italy", "A apu Italy"]);
    adjudicate(&mut board, "A ven H; F rom S A apu - ven; A apu - ven");
    assert_eq!(
        outcome(&board, "rom"),
        Err(OrderError::IllegalSupportDestination)
    );
    assert_eq!(outcome(&board, "apu"), Err(OrderError::Bounce(p("ven"))));
    assert_eq!(owner(&board, "ven").as_deref(), Some("Austria"));
}

/// 6.A.11: Simple bounce.
#[test]
fn datc_6a11_simple_bounce() {
    let mut board = movement(&["A vie Austria", "A ven Italy"]);
    adjudicate(&mut board, "A vie - tyr; A ven - tyr");
    assert_eq!(outcome(&board, "vie"), Err(OrderError::Bounce(p("ven"))));
    assert_eq!(outcome(&board, "ven"), Err(OrderError::Bounce(p("vie"))));
    assert!(occupant(&board, "tyr").is_none());
    assert!(board.bounce(&p("boh"), &p("tyr")));
}

/// 6.A.12: Bounce of three units.
#[test]
fn datc_6a12_bounce_of_three_units() {
    let mut board = movement(&["A vie Austria", "A mun Germany", "A ven Italy"]);
    adjudicate(&mut board, "A vie - tyr; A mun - tyr; A ven - tyr");
    fails(&board, "vie");
    fails(&board, "mun");
    fails(&board, "ven");
    assert!(occupant(&board, "tyr").is_none());
}

// ===========================================================================
// SECTION 6.B: COASTAL ISSUES
// ===========================================================================

/// 6.B.1: Moving with unspecified coast when coast is necessary.
#[test]
fn datc_6b1_unspecified_coast_when_necessary() {
    let mut board = movement(&["F por France"]);
    adjudicate(&mut board, "F por - spa");
    fails(&board, "por");
    assert_eq!(owner(&board, "por").as_deref(), Some("France"));
}

/// 6.B.2: Moving with unspecified coast when coast is not necessary.
#[test]
fn datc_6b2_unspecified_coast_when_not_necessary() {
    let mut board = movement(&["F gas France"]);
    adjudicate(&mut board, "F gas - spa");
    succeeds(&board, "gas");
    assert_eq!(
        occupant(&board, "spa"),
        Some((p("spa/nc"), "France".to_string()))
    );
}

/// 6.B.3: Moving with wrong coast when coast is not necessary.
#[test]
fn datc_6b3_wrong_coast_when_not_necessary() {
    let mut board = movement(&["F gas France"]);
    adjudicate(&mut board, "F gas - spa/sc");
    assert_eq!(outcome(&board, "gas"), Err(OrderError::IllegalMove));
}

/// 6.B.4: Support to unreachable coast is allowed.
#[test]
fn datc_6b4_support_to_unreachable_coast_allowed() {
    let mut board = movement(&["F gas France", "F mar France", "F wes Italy"]);
    adjudicate(&mut board, "F gas - spa/nc; F mar S F gas - spa/nc; F wes - spa/sc");
    succeeds(&board, "gas");
    succeeds(&board, "mar");
    fails(&board, "wes");
    assert_eq!(
        occupant(&board, "spa"),
        Some((p("spa/nc"), "France".to_string()))
    );
}

/// 6.B.5: Support from unreachable coast is not allowed.
#[test]
fn datc_6b5_support_from_unreachable_coast_not_allowed() {
    let mut board = movement(&["F mar France", "F spa/nc France", "F gol Italy"]);
    adjudicate(&mut board, "F mar - gol; F spa/nc S F mar - gol; F gol H");
    assert_eq!(
        outcome(&board, "spa/nc"),
        Err(OrderError::IllegalSupportDestination)
    );
    fails(&board, "mar");
    assert_eq!(owner(&board, "gol").as_deref(), Some("Italy"));
}

/// 6.B.6: Support can be cut with other coast.
#[test]
fn datc_6b6_support_cut_from_other_coast() {
    let mut board = movement(&[
        "F iri England",
        "F nat England",
        "F spa/nc France",
        "F mid France",
        "F gol Italy",
    ]);
    adjudicate(
        &mut board,
        "F iri S F nat - mid; F nat - mid; F spa/nc S F mid H; F mid H; F gol - spa/sc",
    );
    assert_eq!(
        outcome(&board, "spa/nc"),
        Err(OrderError::SupportBroken(p("gol")))
    );
    succeeds(&board, "nat");
    assert!(is_dislodged(&board, "mid"));
}

/// 6.B.11: Coast can not be ordered to change.
#[test]
fn datc_6b11_coast_can_not_be_ordered_to_change() {
    let mut board = movement(&["F spa/nc France"]);
    adjudicate(&mut board, "F spa/nc - spa/sc");
    fails(&board, "spa/nc");
    assert_eq!(
        occupant(&board, "spa"),
        Some((p("spa/nc"), "France".to_string()))
    );
}

/// 6.B.12: Army movement with coastal specification.
#[test]
fn datc_6b12_army_movement_with_coast() {
    let mut board = movement(&["A gas France"]);
    adjudicate(&mut board, "A gas - spa/nc");
    succeeds(&board, "gas");
    assert_eq!(occupant(&board, "spa"), Some((p("spa"), "France".to_string())));
}

/// 6.B.13: Coastal crawl not allowed.
#[test]
fn datc_6b13_coastal_crawl_not_allowed() {
    let mut board = movement(&["F bul/sc Turkey", "F con Turkey"]);
    adjudicate(&mut board, "F bul/sc - con; F con - bul/ec");
    fails(&board, "bul/sc");
    fails(&board, "con");
    assert_eq!(occupant(&board, "bul"), Some((p("bul/sc"), "Turkey".to_string())));
}

/// 6.B.14: Building with unspecified coast.
#[test]
fn datc_6b14_building_with_unspecified_coast() {
    let mut board = blank(Season::Fall, PhaseType::Adjustment);
    board.set_sc("stp", Nation::from("Russia"));
    adjudicate(&mut board, "stp B F");
    assert_eq!(outcome(&board, "stp"), Err(OrderError::IllegalUnitType));
    assert!(board.units().is_empty());
}

// ===========================================================================
// SECTION 6.C: CIRCULAR MOVEMENT
// ===========================================================================

/// 6.C.1: Three army circular movement.
#[test]
fn datc_6c1_three_army_circular_movement() {
    let mut board = movement(&["F ank Turkey", "A con Turkey", "A smy Turkey"]);
    adjudicate(&mut board, "F ank - con; A con - smy; A smy - ank");
    succeeds(&board, "ank");
    succeeds(&board, "con");
    succeeds(&board, "smy");
    assert_eq!(board.unit(&p("con")).map(|(_, u)| u.unit_type), Some(UnitType::Fleet));
    assert!(board.dislodgeds().is_empty());
}

/// 6.C.2: Three army circular movement with support.
#[test]
fn datc_6c2_circular_movement_with_support() {
    let mut board = movement(&[
        "F ank Turkey",
        "A con Turkey",
        "A smy Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "F ank - con; A con - smy; A smy - ank; A bul S F ank - con",
    );
    succeeds(&board, "ank");
    succeeds(&board, "con");
    succeeds(&board, "smy");
}

/// 6.C.3: A disrupted three army circular movement.
#[test]
fn datc_6c3_disrupted_circular_movement() {
    let mut board = movement(&[
        "F ank Turkey",
        "A con Turkey",
        "A smy Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "F ank - con; A con - smy; A smy - ank; A bul - con",
    );
    fails(&board, "ank");
    fails(&board, "con");
    fails(&board, "smy");
    fails(&board, "bul");
}

const CIRCULAR_CONVOY: &[&str] = &[
    "A tri Austria",
    "A ser Austria",
    "A bul Turkey",
    "F aeg Turkey",
    "F ion Turkey",
    "F adr Turkey",
    "F nap Italy",
];

const CIRCULAR_CONVOY_ORDERS: &str = "A tri - ser; A ser - bul; A bul - tri; \
     F aeg C A bul - tri; F ion C A bul - tri; F adr C A bul - tri; F nap - ion";

/// 6.C.4: A circular movement with attacked convoy.
#[test]
fn datc_6c4_circular_movement_with_attacked_convoy() {
    let mut board = movement(CIRCULAR_CONVOY);
    adjudicate(&mut board, CIRCULAR_CONVOY_ORDERS);
    succeeds(&board, "tri");
    succeeds(&board, "ser");
    succeeds(&board, "bul");
    assert_eq!(outcome(&board, "nap"), Err(OrderError::Bounce(p("ion"))));
    assert_eq!(owner(&board, "tri").as_deref(), Some("Turkey"));
    assert_eq!(owner(&board, "bul").as_deref(), Some("Austria"));
}

/// 6.C.5: A disrupted circular movement due to dislodged convoy.
#[test]
fn datc_6c5_circular_movement_with_dislodged_convoy() {
    let mut board = movement(CIRCULAR_CONVOY);
    place(&mut board, &["F tun Italy"]);
    adjudicate(
        &mut board,
        &format!("{}; F tun S F nap - ion", CIRCULAR_CONVOY_ORDERS),
    );
    assert_eq!(outcome(&board, "bul"), Err(OrderError::MissingConvoyPath));
    fails(&board, "tri");
    fails(&board, "ser");
    assert!(is_dislodged(&board, "ion"));
    assert_eq!(outcome(&board, "ion"), Err(OrderError::ConvoyDislodged(p("nap"))));
}

/// 6.C.6: Two armies with two convoys.
#[test]
fn datc_6c6_two_armies_with_two_convoys() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F eng France",
        "A bel France",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - bel; A lon - bel; F eng C A bel - lon; A bel - lon",
    );
    succeeds(&board, "lon");
    succeeds(&board, "bel");
    assert_eq!(owner(&board, "bel").as_deref(), Some("England"));
    assert_eq!(owner(&board, "lon").as_deref(), Some("France"));
}

/// 6.C.7: Disrupted unit swap.
#[test]
fn datc_6c7_disrupted_unit_swap() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F eng France",
        "A bel France",
        "A bur France",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - bel; A lon - bel; F eng C A bel - lon; A bel - lon; A bur - bel",
    );
    fails(&board, "lon");
    fails(&board, "bel");
    fails(&board, "bur");
}

/// 6.C.8: No self dislodgement in disrupted circular movement.
#[test]
fn datc_6c8_no_self_dislodgement_in_disrupted_circle() {
    let mut board = movement(&[
        "F con Turkey",
        "A bul Turkey",
        "A smy Turkey",
        "F bla Russia",
        "A ser Austria",
    ]);
    adjudicate(
        &mut board,
        "F con - bla; A bul - con; A smy S A bul - con; F bla - bul/ec; A ser - bul",
    );
    fails(&board, "con");
    fails(&board, "bul");
    fails(&board, "bla");
    fails(&board, "ser");
    assert!(board.dislodgeds().is_empty());
}

// ===========================================================================
// SECTION 6.D: SUPPORTS AND DISLODGES
// ===========================================================================

/// 6.D.1: Supported hold can prevent dislodgement.
#[test]
fn datc_6d1_supported_hold_prevents_dislodgement() {
    let mut board = movement(&["F adr Austria", "A tri Austria", "A ven Italy", "A tyr Italy"]);
    adjudicate(&mut board, "F adr S A tri - ven; A tri - ven; A ven H; A tyr S A ven");
    fails(&board, "tri");
    assert!(!is_dislodged(&board, "ven"));
}

/// 6.D.2: A move cuts support on hold.
#[test]
fn datc_6d2_move_cuts_support_on_hold() {
    let mut board = movement(&[
        "F adr Austria",
        "A tri Austria",
        "A vie Austria",
        "A ven Italy",
        "A tyr Italy",
    ]);
    adjudicate(
        &mut board,
        "F adr S A tri - ven; A tri - ven; A vie - tyr; A ven H; A tyr S A ven",
    );
    assert_eq!(outcome(&board, "tyr"), Err(OrderError::SupportBroken(p("vie"))));
    succeeds(&board, "tri");
    assert!(is_dislodged(&board, "ven"));
}

/// 6.D.3: A move cuts support on move.
#[test]
fn datc_6d3_move_cuts_support_on_move() {
    let mut board = movement(&["F adr Austria", "A tri Austria", "A ven Italy", "F ion Italy"]);
    adjudicate(&mut board, "F adr S A tri - ven; A tri - ven; A ven H; F ion - adr");
    fails(&board, "adr");
    fails(&board, "tri");
    assert!(!is_dislodged(&board, "ven"));
}

/// 6.D.4: Support to hold on unit supporting a hold allowed.
#[test]
fn datc_6d4_support_hold_on_supporting_unit() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "F bal Russia",
        "A pru Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber S F kie; F kie S A ber; F bal S A pru - ber; A pru - ber",
    );
    fails(&board, "pru");
    assert!(!is_dislodged(&board, "ber"));
}

/// 6.D.5: Support to hold on unit supporting a move allowed.
#[test]
fn datc_6d5_support_hold_on_unit_supporting_move() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "A mun Germany",
        "F bal Russia",
        "A pru Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber S A mun - sil; F kie S A ber; A mun - sil; F bal S A pru - ber; A pru - ber",
    );
    fails(&board, "pru");
    assert!(!is_dislodged(&board, "ber"));
    succeeds(&board, "mun");
}

/// 6.D.6: Support to hold on convoying unit allowed.
#[test]
fn datc_6d6_support_hold_on_convoying_unit() {
    let mut board = movement(&[
        "A ber Germany",
        "F bal Germany",
        "F pru Germany",
        "F lvn Russia",
        "F bot Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber - swe; F bal C A ber - swe; F pru S F bal; F lvn - bal; F bot S F lvn - bal",
    );
    fails(&board, "lvn");
    succeeds(&board, "bal");
    succeeds(&board, "ber");
    assert_eq!(owner(&board, "swe").as_deref(), Some("Germany"));
}

/// 6.D.7: Support to hold on moving unit not allowed.
#[test]
fn datc_6d7_support_hold_on_moving_unit() {
    let mut board = movement(&[
        "F bal Germany",
        "F pru Germany",
        "F lvn Russia",
        "F bot Russia",
        "A fin Russia",
    ]);
    adjudicate(
        &mut board,
        "F bal - swe; F pru S F bal; F lvn - bal; F bot S F lvn - bal; A fin - swe",
    );
    fails(&board, "bal");
    succeeds(&board, "lvn");
    assert!(is_dislodged(&board, "bal"));
}

/// 6.D.8: Failed convoy can not receive hold support.
#[test]
fn datc_6d8_failed_convoy_gets_no_hold_support() {
    let mut board = movement(&[
        "F ion Austria",
        "A ser Austria",
        "A alb Austria",
        "A gre Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "F ion H; A ser S A alb - gre; A alb - gre; A gre - nap; A bul S A gre",
    );
    assert_eq!(outcome(&board, "gre"), Err(OrderError::MissingConvoyPath));
    succeeds(&board, "alb");
    assert!(is_destroyed(&board, "gre"));
}

/// 6.D.9: Support to move on holding unit not allowed.
#[test]
fn datc_6d9_support_move_on_holding_unit() {
    let mut board = movement(&["A ven Italy", "A tyr Italy", "A alb Austria", "A tri Austria"]);
    adjudicate(
        &mut board,
        "A ven - tri; A tyr S A ven - tri; A alb S A tri - ser; A tri H",
    );
    succeeds(&board, "ven");
    assert!(is_dislodged(&board, "tri"));
}

/// 6.D.10: Self dislodgment prohibited.
#[test]
fn datc_6d10_self_dislodgement_prohibited() {
    let mut board = movement(&["A ber Germany", "F kie Germany", "A mun Germany"]);
    adjudicate(&mut board, "A ber H; F kie - ber; A mun S F kie - ber");
    assert_eq!(outcome(&board, "kie"), Err(OrderError::Bounce(p("ber"))));
    assert!(board.dislodgeds().is_empty());
}

/// 6.D.11: No self dislodgment of returning unit.
#[test]
fn datc_6d11_no_self_dislodgement_of_returning_unit() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "A mun Germany",
        "A war Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber - pru; F kie - ber; A mun S F kie - ber; A war - pru",
    );
    fails(&board, "ber");
    fails(&board, "kie");
    assert!(board.dislodgeds().is_empty());
}

/// 6.D.12: Supporting a foreign unit to dislodge own unit prohibited.
#[test]
fn datc_6d12_foreign_support_can_not_dislodge_own_unit() {
    let mut board = movement(&["F tri Austria", "A vie Austria", "A ven Italy"]);
    adjudicate(&mut board, "F tri H; A vie S A ven - tri; A ven - tri");
    fails(&board, "ven");
    assert!(!is_dislodged(&board, "tri"));
}

/// 6.D.13: Supporting a foreign unit to dislodge a returning own unit prohibited.
#[test]
fn datc_6d13_foreign_support_can_not_dislodge_returning_unit() {
    let mut board = movement(&[
        "F tri Austria",
        "A vie Austria",
        "A ven Italy",
        "F apu Italy",
    ]);
    adjudicate(
        &mut board,
        "F tri - adr; A vie S A ven - tri; A ven - tri; F apu - adr",
    );
    fails(&board, "tri");
    fails(&board, "ven");
    assert!(board.dislodgeds().is_empty());
}

/// 6.D.14: Supporting a foreign unit is not enough to prevent dislodgement.
#[test]
fn datc_6d14_foreign_support_not_enough_to_prevent_dislodgement() {
    let mut board = movement(&[
        "F tri Austria",
        "A vie Austria",
        "A ven Italy",
        "A tyr Italy",
        "F adr Italy",
    ]);
    adjudicate(
        &mut board,
        "F tri H; A vie S A ven - tri; A ven - tri; A tyr S A ven - tri; F adr S A ven - tri",
    );
    succeeds(&board, "ven");
    assert!(is_dislodged(&board, "tri"));
}

/// 6.D.15: Defender can not cut support for attack on itself.
#[test]
fn datc_6d15_defender_can_not_cut_support_for_attack_on_itself() {
    let mut board = movement(&["F con Russia", "F bla Russia", "F ank Turkey"]);
    adjudicate(&mut board, "F con S F bla - ank; F bla - ank; F ank - con");
    succeeds(&board, "con");
    succeeds(&board, "bla");
    fails(&board, "ank");
    assert!(is_dislodged(&board, "ank"));
}

/// 6.D.16: Convoying a unit dislodging a unit of same power is allowed.
#[test]
fn datc_6d16_convoy_may_dislodge_convoying_power() {
    let mut board = movement(&[
        "A lon England",
        "F nth England",
        "F eng France",
        "A bel France",
    ]);
    adjudicate(
        &mut board,
        "A lon H; F nth C A bel - lon; F eng S A bel - lon; A bel - lon",
    );
    succeeds(&board, "bel");
    assert!(is_dislodged(&board, "lon"));
}

/// 6.D.17: Dislodgement cuts supports.
#[test]
fn datc_6d17_dislodgement_cuts_supports() {
    let mut board = movement(&[
        "F con Russia",
        "F bla Russia",
        "F ank Turkey",
        "A smy Turkey",
        "A arm Turkey",
    ]);
    adjudicate(
        &mut board,
        "F con S F bla - ank; F bla - ank; F ank - con; A smy S F ank - con; A arm - ank",
    );
    assert_eq!(outcome(&board, "con"), Err(OrderError::SupportBroken(p("ank"))));
    succeeds(&board, "ank");
    fails(&board, "bla");
    fails(&board, "arm");
    assert!(is_dislodged(&board, "con"));
}

/// 6.D.18: A surviving unit will sustain support.
#[test]
fn datc_6d18_surviving_unit_sustains_support() {
    let mut board = movement(&[
        "F con Russia",
        "F bla Russia",
        "A bul Russia",
        "F ank Turkey",
        "A smy Turkey",
        "A arm Turkey",
    ]);
    adjudicate(
        &mut board,
        "F con S F bla - ank; F bla - ank; A bul S F con; \
         F ank - con; A smy S F ank - con; A arm - ank",
    );
    succeeds(&board, "con");
    succeeds(&board, "bla");
    fails(&board, "ank");
    fails(&board, "arm");
    assert!(is_destroyed(&board, "ank"));
}

/// 6.D.19: Even when surviving is in alternative way.
#[test]
fn datc_6d19_surviving_in_alternative_way() {
    let mut board = movement(&[
        "F con Russia",
        "F bla Russia",
        "A smy Russia",
        "F ank Turkey",
    ]);
    adjudicate(
        &mut board,
        "F con S F bla - ank; F bla - ank; A smy S F ank - con; F ank - con",
    );
    succeeds(&board, "con");
    succeeds(&board, "bla");
    assert!(is_dislodged(&board, "ank"));
}

/// 6.D.20: Unit can not cut support of its own country.
#[test]
fn datc_6d20_no_cutting_own_support() {
    let mut board = movement(&[
        "F lon England",
        "F nth England",
        "A yor England",
        "F eng France",
    ]);
    adjudicate(
        &mut board,
        "F lon S F nth - eng; F nth - eng; A yor - lon; F eng H",
    );
    succeeds(&board, "lon");
    succeeds(&board, "nth");
    fails(&board, "yor");
    assert!(is_dislodged(&board, "eng"));
}

/// 6.D.21: Dislodging does not cancel a support cut.
#[test]
fn datc_6d21_dislodging_does_not_cancel_support_cut() {
    let mut board = movement(&[
        "F tri Austria",
        "A ven Italy",
        "A tyr Italy",
        "A mun Germany",
        "A sil Russia",
        "A ber Russia",
    ]);
    adjudicate(
        &mut board,
        "F tri H; A ven - tri; A tyr S A ven - tri; A mun - tyr; A sil - mun; A ber S A sil - mun",
    );
    assert_eq!(outcome(&board, "tyr"), Err(OrderError::SupportBroken(p("mun"))));
    fails(&board, "ven");
    succeeds(&board, "sil");
    assert!(is_dislodged(&board, "mun"));
    assert!(!is_dislodged(&board, "tri"));
}

/// 6.D.22: Impossible fleet move can not be supported.
#[test]
fn datc_6d22_impossible_fleet_move_can_not_be_supported() {
    let mut board = movement(&[
        "F kie Germany",
        "A bur Germany",
        "A mun Russia",
        "A ber Russia",
    ]);
    adjudicate(
        &mut board,
        "F kie - mun; A bur S F kie - mun; A mun - kie; A ber S A mun - kie",
    );
    assert_eq!(outcome(&board, "bur"), Err(OrderError::IllegalSupportMove));
    succeeds(&board, "mun");
    assert!(is_dislodged(&board, "kie"));
}

/// 6.D.23: Impossible coast move can not be supported.
#[test]
fn datc_6d23_impossible_coast_move_can_not_be_supported() {
    let mut board = movement(&[
        "F gol Italy",
        "F wes Italy",
        "F spa/nc France",
        "F mar France",
    ]);
    adjudicate(
        &mut board,
        "F gol - spa/sc; F wes S F gol - spa/sc; F spa/nc - gol; F mar S F spa/nc - gol",
    );
    assert_eq!(outcome(&board, "mar"), Err(OrderError::IllegalSupportMove));
    succeeds(&board, "gol");
    assert_eq!(board.dislodged(&p("spa")).map(|(at, _)| at), Some(p("spa/nc")));
    assert_eq!(occupant(&board, "spa"), Some((p("spa/sc"), "Italy".to_string())));
}

/// 6.D.24: Impossible army move can not be supported.
#[test]
fn datc_6d24_impossible_army_move_can_not_be_supported() {
    let mut board = movement(&[
        "A mar France",
        "F spa/sc France",
        "F gol Italy",
        "F tys Turkey",
        "F wes Turkey",
    ]);
    adjudicate(
        &mut board,
        "A mar - gol; F spa/sc S A mar - gol; F gol H; F tys S F wes - gol; F wes - gol",
    );
    assert_eq!(outcome(&board, "mar"), Err(OrderError::IllegalDestination));
    assert_eq!(outcome(&board, "spa/sc"), Err(OrderError::IllegalSupportMove));
    succeeds(&board, "wes");
    assert!(is_dislodged(&board, "gol"));
}

/// 6.D.25: Failing hold support can be supported.
#[test]
fn datc_6d25_failing_hold_support_can_be_supported() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "F bal Russia",
        "A pru Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber S A pru; F kie S A ber; F bal S A pru - ber; A pru - ber",
    );
    fails(&board, "pru");
    assert!(!is_dislodged(&board, "ber"));
}

/// 6.D.26: Failing move support can be supported.
#[test]
fn datc_6d26_failing_move_support_can_be_supported() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "F bal Russia",
        "A pru Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber S A pru - sil; F kie S A ber; F bal S A pru - ber; A pru - ber",
    );
    fails(&board, "pru");
    assert!(!is_dislodged(&board, "ber"));
}

/// 6.D.27: Failing convoy can be supported.
#[test]
fn datc_6d27_failing_convoy_can_be_supported() {
    let mut board = movement(&[
        "F swe England",
        "F den England",
        "A ber Germany",
        "F bal Russia",
        "F pru Russia",
    ]);
    adjudicate(
        &mut board,
        "F swe - bal; F den S F swe - bal; A ber H; F bal C A ber - lvn; F pru S F bal",
    );
    fails(&board, "swe");
    assert!(!is_dislodged(&board, "bal"));
}

/// 6.D.28: Impossible move and support.
#[test]
fn datc_6d28_impossible_move_and_support() {
    let mut board = movement(&[
        "A bud Austria",
        "F rum Russia",
        "F bla Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "A bud S F rum; F rum - hol; F bla - rum; A bul S F bla - rum",
    );
    fails(&board, "rum");
    fails(&board, "bla");
    assert!(!is_dislodged(&board, "rum"));
}

/// 6.D.29: Move to impossible coast and support.
#[test]
fn datc_6d29_move_to_impossible_coast_and_support() {
    let mut board = movement(&[
        "A bud Austria",
        "F rum Russia",
        "F bla Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "A bud S F rum; F rum - bul/sc; F bla - rum; A bul S F bla - rum",
    );
    assert_eq!(outcome(&board, "rum"), Err(OrderError::IllegalMove));
    fails(&board, "bla");
    assert!(!is_dislodged(&board, "rum"));
}

/// 6.D.30: Move without coast and support.
#[test]
fn datc_6d30_move_without_coast_and_support() {
    let mut board = movement(&[
        "F aeg Italy",
        "F con Russia",
        "F bla Turkey",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "F aeg S F con; F con - bul; F bla - con; A bul S F bla - con",
    );
    fails(&board, "con");
    fails(&board, "bla");
    assert!(!is_dislodged(&board, "con"));
}

/// 6.D.33: Unwanted support allowed.
#[test]
fn datc_6d33_unwanted_support_allowed() {
    let mut board = movement(&[
        "A ser Austria",
        "A vie Austria",
        "A gal Russia",
        "A bul Turkey",
    ]);
    adjudicate(
        &mut board,
        "A ser - bud; A vie - bud; A gal S A ser - bud; A bul - ser",
    );
    succeeds(&board, "ser");
    fails(&board, "vie");
    succeeds(&board, "bul");
    assert_eq!(owner(&board, "bud").as_deref(), Some("Austria"));
    assert_eq!(owner(&board, "ser").as_deref(), Some("Turkey"));
}

/// 6.D.34: Support targeting own area not allowed.
#[test]
fn datc_6d34_support_targeting_own_area() {
    let mut board = movement(&[
        "A ber Germany",
        "A sil Germany",
        "F bal Germany",
        "A pru Italy",
        "A war Russia",
        "A lvn Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber - pru; A sil S A ber - pru; F bal S A ber - pru; \
         A pru S A lvn - pru; A war S A lvn - pru; A lvn - pru",
    );
    assert_eq!(outcome(&board, "pru"), Err(OrderError::IllegalSupportDestination));
    succeeds(&board, "ber");
    fails(&board, "lvn");
    assert!(is_destroyed(&board, "pru"));
}

// ===========================================================================
// SECTION 6.E: HEAD-TO-HEAD BATTLES AND RELATED SITUATIONS
// ===========================================================================

/// 6.E.1: Dislodged unit has no effect on attacker's area.
#[test]
fn datc_6e1_dislodged_unit_has_no_effect_on_attackers_area() {
    let mut board = movement(&[
        "A ber Germany",
        "F kie Germany",
        "A sil Germany",
        "A pru Russia",
    ]);
    adjudicate(
        &mut board,
        "A ber - pru; F kie - ber; A sil S A ber - pru; A pru - ber",
    );
    succeeds(&board, "ber");
    succeeds(&board, "kie");
    fails(&board, "pru");
    assert!(is_dislodged(&board, "pru"));
    assert_eq!(board.unit(&p("ber")).map(|(_, u)| u.unit_type), Some(UnitType::Fleet));
}

/// 6.E.2: No self dislodgement in head to head battle.
#[test]
fn datc_6e2_no_self_dislodgement_head_to_head() {
    let mut board = movement(&["A ber Germany", "F kie Germany", "A mun Germany"]);
    adjudicate(&mut board, "A ber - kie; F kie - ber; A mun S A ber - kie");
    fails(&board, "ber");
    fails(&board, "kie");
    assert!(board.dislodgeds().is_empty());
}

/// 6.E.3: No help in dislodging own unit.
#[test]
fn datc_6e3_no_help_in_dislodging_own_unit() {
    let mut board = movement(&["A ber Germany", "A mun Germany", "F kie England"]);
    adjudicate(&mut board, "A ber - kie; A mun S F kie - ber; F kie - ber");
    fails(&board, "ber");
    fails(&board, "kie");
    assert!(board.dislodgeds().is_empty());
}

/// 6.E.7: No self dislodgement with beleaguered garrison.
#[test]
fn datc_6e7_no_self_dislodgement_with_beleaguered_garrison() {
    let mut board = movement(&[
        "F nth England",
        "F yor England",
        "F hol Germany",
        "F hel Germany",
        "F ska Russia",
        "F nwy Russia",
    ]);
    adjudicate(
        &mut board,
        "F nth H; F yor S F nwy - nth; F hol S F hel - nth; F hel - nth; \
         F ska S F nwy - nth; F nwy - nth",
    );
    fails(&board, "hel");
    fails(&board, "nwy");
    assert!(!is_dislodged(&board, "nth"));
}

/// 6.E.9: Almost self dislodgement with beleaguered garrison.
#[test]
fn datc_6e9_almost_self_dislodgement_with_beleaguered_garrison() {
    let mut board = movement(&[
        "F nth England",
        "F yor England",
        "F hol Germany",
        "F hel Germany",
        "F ska Russia",
        "F nwy Russia",
    ]);
    adjudicate(
        &mut board,
        "F nth - nrg; F yor S F nwy - nth; F hol S F hel - nth; F hel - nth; \
         F ska S F nwy - nth; F nwy - nth",
    );
    succeeds(&board, "nth");
    succeeds(&board, "nwy");
    fails(&board, "hel");
    assert_eq!(owner(&board, "nth").as_deref(), Some("Russia"));
}

/// 6.E.12: Support on attack on own unit can be used for other means.
#[test]
fn datc_6e12_support_on_attack_on_own_unit_used_elsewhere() {
    let mut board = movement(&[
        "A bud Austria",
        "A ser Austria",
        "A vie Italy",
        "A gal Russia",
        "A rum Russia",
    ]);
    adjudicate(
        &mut board,
        "A bud - rum; A ser S A vie - bud; A vie - bud; A gal - bud; A rum S A gal - bud",
    );
    fails(&board, "bud");
    fails(&board, "vie");
    fails(&board, "gal");
    succeeds(&board, "rum");
    assert!(board.dislodgeds().is_empty());
}

// ===========================================================================
// SECTION 6.F: CONVOYS
// ===========================================================================

/// 6.F.1: No convoy in coastal areas.
#[test]
fn datc_6f1_no_convoy_in_coastal_areas() {
    let mut board = movement(&[
        "A gre Turkey",
        "F aeg Turkey",
        "F con Turkey",
        "F bla Turkey",
    ]);
    adjudicate(
        &mut board,
        "A gre - sev; F aeg C A gre - sev; F con C A gre - sev; F bla C A gre - sev",
    );
    assert_eq!(outcome(&board, "con"), Err(OrderError::IllegalConvoyPath));
    assert_eq!(outcome(&board, "gre"), Err(OrderError::MissingConvoyPath));
    assert_eq!(owner(&board, "gre").as_deref(), Some("Turkey"));
}

/// 6.F.2: An army being convoyed can bounce as normal.
#[test]
fn datc_6f2_convoyed_army_can_bounce() {
    let mut board = movement(&["F eng England", "A lon England", "A par France"]);
    adjudicate(&mut board, "F eng C A lon - bre; A lon - bre; A par - bre");
    assert_eq!(outcome(&board, "lon"), Err(OrderError::Bounce(p("par"))));
    assert_eq!(outcome(&board, "par"), Err(OrderError::Bounce(p("lon"))));
}

/// 6.F.3: An army being convoyed can receive support.
#[test]
fn datc_6f3_convoyed_army_can_receive_support() {
    let mut board = movement(&[
        "F eng England",
        "A lon England",
        "F mid England",
        "A par France",
    ]);
    adjudicate(
        &mut board,
        "F eng C A lon - bre; A lon - bre; F mid S A lon - bre; A par - bre",
    );
    succeeds(&board, "lon");
    fails(&board, "par");
    assert_eq!(owner(&board, "bre").as_deref(), Some("England"));
}

/// 6.F.4: An attacked convoy is not disrupted.
#[test]
fn datc_6f4_attacked_convoy_not_disrupted() {
    let mut board = movement(&["F nth England", "A lon England", "F ska Germany"]);
    adjudicate(&mut board, "F nth C A lon - hol; A lon - hol; F ska - nth");
    succeeds(&board, "nth");
    succeeds(&board, "lon");
    fails(&board, "ska");
    assert_eq!(owner(&board, "hol").as_deref(), Some("England"));
}

/// 6.F.5: A beleaguered convoy is not disrupted.
#[test]
fn datc_6f5_beleaguered_convoy_not_disrupted() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F eng France",
        "F bel France",
        "F ska Germany",
        "F den Germany",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - hol; A lon - hol; F eng - nth; F bel S F eng - nth; \
         F ska - nth; F den S F ska - nth",
    );
    succeeds(&board, "lon");
    fails(&board, "eng");
    fails(&board, "ska");
    assert!(!is_dislodged(&board, "nth"));
}

/// 6.F.6: Dislodged convoy does not cut support.
#[test]
fn datc_6f6_dislodged_convoy_does_not_cut_support() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "A hol Germany",
        "A bel Germany",
        "F hel Germany",
        "F ska Germany",
        "A pic France",
        "A bur France",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - hol; A lon - hol; A hol S A bel; A bel S A hol; \
         F hel S F ska - nth; F ska - nth; A pic - bel; A bur S A pic - bel",
    );
    assert_eq!(outcome(&board, "nth"), Err(OrderError::ConvoyDislodged(p("ska"))));
    assert_eq!(outcome(&board, "lon"), Err(OrderError::MissingConvoyPath));
    succeeds(&board, "hol");
    fails(&board, "pic");
    assert!(!is_dislodged(&board, "bel"));
}

/// 6.F.8: Dislodged convoy does not cause a bounce.
#[test]
fn datc_6f8_dislodged_convoy_does_not_cause_bounce() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F hel Germany",
        "F ska Germany",
        "A bel Germany",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - hol; A lon - hol; F hel S F ska - nth; F ska - nth; A bel - hol",
    );
    fails(&board, "lon");
    succeeds(&board, "bel");
    assert_eq!(owner(&board, "hol").as_deref(), Some("Germany"));
}

/// 6.F.9: Dislodge of multi-route convoy.
#[test]
fn datc_6f9_dislodge_of_multi_route_convoy() {
    let mut board = movement(&[
        "F eng England",
        "F nth England",
        "A lon England",
        "F bre France",
        "F mid France",
    ]);
    adjudicate(
        &mut board,
        "F eng C A lon - bel; F nth C A lon - bel; A lon - bel; F bre S F mid - eng; F mid - eng",
    );
    succeeds(&board, "lon");
    succeeds(&board, "mid");
    assert!(is_dislodged(&board, "eng"));
    assert_eq!(owner(&board, "bel").as_deref(), Some("England"));
}

/// 6.F.10: Dislodge of multi-route convoy with foreign fleet.
#[test]
fn datc_6f10_multi_route_convoy_with_foreign_fleet() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F eng Germany",
        "F bre France",
        "F mid France",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - bel; A lon - bel; F eng C A lon - bel; F bre S F mid - eng; F mid - eng",
    );
    succeeds(&board, "lon");
    assert!(is_dislodged(&board, "eng"));
}

/// 6.F.12: Dislodged convoying fleet not on route.
#[test]
fn datc_6f12_dislodged_fleet_not_on_route() {
    let mut board = movement(&[
        "F eng England",
        "A lon England",
        "F iri England",
        "F nat France",
        "F mid France",
    ]);
    adjudicate(
        &mut board,
        "F eng C A lon - bel; A lon - bel; F iri C A lon - bel; F nat S F mid - iri; F mid - iri",
    );
    succeeds(&board, "lon");
    assert!(is_dislodged(&board, "iri"));
}

/// 6.F.13: The unwanted alternative.
#[test]
fn datc_6f13_unwanted_alternative() {
    let mut board = movement(&[
        "A lon England",
        "F nth England",
        "F eng France",
        "F hol Germany",
        "F den Germany",
    ]);
    adjudicate(
        &mut board,
        "A lon - bel; F nth C A lon - bel; F eng C A lon - bel; F hol S F den - nth; F den - nth",
    );
    succeeds(&board, "lon");
    assert!(is_dislodged(&board, "nth"));
}

/// 6.F.14: Simple convoy paradox.
/// The convoy is the paradox's weak link: it fails, so the support in
/// London stands and the fleet in the Channel is dislodged.
#[test]
fn datc_6f14_simple_convoy_paradox() {
    let mut board = movement(&[
        "F lon England",
        "F wal England",
        "A bre France",
        "F eng France",
    ]);
    adjudicate(
        &mut board,
        "F lon S F wal - eng; F wal - eng; A bre - lon; F eng C A bre - lon",
    );
    succeeds(&board, "lon");
    succeeds(&board, "wal");
    assert_eq!(outcome(&board, "bre"), Err(OrderError::MissingConvoyPath));
    assert_eq!(outcome(&board, "eng"), Err(OrderError::ConvoyParadox));
    assert!(is_dislodged(&board, "eng"));
    assert_eq!(owner(&board, "bre").as_deref(), Some("France"));
}

// ===========================================================================
// SECTION 6.G: CONVOY DISRUPTION AND CONVOYS TO ADJACENT PLACES
// ===========================================================================

/// 6.G.1: Two units can swap places by convoy.
#[test]
fn datc_6g1_swap_places_by_convoy() {
    let mut board = movement(&["A nwy England", "F ska England", "A swe Russia"]);
    adjudicate(&mut board, "A nwy - swe; F ska C A nwy - swe; A swe - nwy");
    succeeds(&board, "nwy");
    succeeds(&board, "swe");
    assert_eq!(owner(&board, "swe").as_deref(), Some("England"));
    assert_eq!(owner(&board, "nwy").as_deref(), Some("Russia"));
}

/// 6.G.2: Kidnapping an army.
/// A foreign convoy does not turn an overland move into a convoyed one.
#[test]
fn datc_6g2_kidnapping_an_army() {
    let mut board = movement(&["A nwy England", "F swe Russia", "F ska Germany"]);
    adjudicate(&mut board, "A nwy - swe; F swe - nwy; F ska C A nwy - swe");
    fails(&board, "nwy");
    fails(&board, "swe");
    assert_eq!(owner(&board, "nwy").as_deref(), Some("England"));
}

/// 6.G.5: Swapping with intent.
#[test]
fn datc_6g5_swapping_with_intent() {
    let mut board = movement(&[
        "A rom Italy",
        "F tys Italy",
        "A apu Turkey",
        "F ion Turkey",
    ]);
    adjudicate(
        &mut board,
        "A rom - apu; F tys C A apu - rom; A apu - rom; F ion C A apu - rom",
    );
    succeeds(&board, "rom");
    succeeds(&board, "apu");
    assert_eq!(owner(&board, "rom").as_deref(), Some("Turkey"));
    assert_eq!(owner(&board, "apu").as_deref(), Some("Italy"));
}

// ===========================================================================
// SECTION 6.H: RETREATING
// ===========================================================================

/// 6.H.1: No supports during retreat.
#[test]
fn datc_6h1_no_supports_during_retreat() {
    let mut board = movement(&[
        "F tri Austria",
        "A ser Austria",
        "F gre Turkey",
        "A ven Italy",
        "A tyr Italy",
        "F ion Italy",
        "F aeg Italy",
    ]);
    adjudicate(
        &mut board,
        "F tri H; A ser H; F gre H; A ven S A tyr - tri; A tyr - tri; F ion - gre; F aeg S F ion - gre",
    );
    assert!(is_dislodged(&board, "tri"));
    assert!(is_dislodged(&board, "gre"));

    adjudicate(&mut board, "F tri - alb; A ser S F tri - alb; F gre - alb");
    assert_eq!(outcome(&board, "ser"), Err(OrderError::InvalidPhase));
    assert_eq!(outcome(&board, "tri"), Err(OrderError::Bounce(p("gre"))));
    assert_eq!(outcome(&board, "gre"), Err(OrderError::Bounce(p("tri"))));
    assert!(occupant(&board, "alb").is_none());
    assert!(board.dislodgeds().is_empty());
    assert!(board.force_disbands().contains(&p("tri")));
    assert!(board.force_disbands().contains(&p("gre")));
}

/// 6.H.3: No convoy during retreat.
#[test]
fn datc_6h3_no_convoy_during_retreat() {
    let mut board = movement(&[
        "F nth England",
        "A hol England",
        "F kie Germany",
        "A ruh Germany",
    ]);
    adjudicate(&mut board, "F nth H; A hol H; F kie S A ruh - hol; A ruh - hol");
    assert!(is_dislodged(&board, "hol"));

    adjudicate(&mut board, "A hol - yor; F nth C A hol - yor");
    assert_eq!(outcome(&board, "hol"), Err(OrderError::IllegalMove));
    assert_eq!(outcome(&board, "nth"), Err(OrderError::InvalidPhase));
    assert!(occupant(&board, "yor").is_none());
}

/// 6.H.4: No other moves during retreat.
#[test]
fn datc_6h4_no_other_moves_during_retreat() {
    let mut board = movement(&[
        "F nth England",
        "A hol England",
        "F kie Germany",
        "A ruh Germany",
    ]);
    adjudicate(&mut board, "F nth H; A hol H; F kie S A ruh - hol; A ruh - hol");

    adjudicate(&mut board, "A hol - bel; F nth - nrg");
    succeeds(&board, "hol");
    assert_eq!(outcome(&board, "nth"), Err(OrderError::MissingUnit));
    assert_eq!(owner(&board, "bel").as_deref(), Some("England"));
    assert_eq!(owner(&board, "nth").as_deref(), Some("England"));
}

/// 6.H.5: A unit may not retreat to the area from which it is attacked.
#[test]
fn datc_6h5_no_retreat_to_attackers_area() {
    let mut board = movement(&["F con Russia", "F bla Russia", "F ank Turkey"]);
    adjudicate(&mut board, "F con S F bla - ank; F bla - ank; F ank H");
    assert!(is_dislodged(&board, "ank"));

    adjudicate(&mut board, "F ank - bla");
    assert_eq!(outcome(&board, "ank"), Err(OrderError::IllegalRetreat));
    assert!(occupant(&board, "bla").is_none());
    assert!(board.force_disbands().contains(&p("ank")));
}

/// 6.H.6: Unit may not retreat to a contested area.
#[test]
fn datc_6h6_no_retreat_to_contested_area() {
    let mut board = movement(&[
        "A bud Austria",
        "A tri Austria",
        "A mun Germany",
        "A sil Germany",
        "A vie Italy",
    ]);
    adjudicate(
        &mut board,
        "A bud S A tri - vie; A tri - vie; A mun - boh; A sil - boh; A vie H",
    );
    assert!(is_dislodged(&board, "vie"));

    adjudicate(&mut board, "A vie - boh");
    assert_eq!(outcome(&board, "vie"), Err(OrderError::IllegalRetreat));
    assert!(occupant(&board, "boh").is_none());
}

/// 6.H.7: Multiple retreat to same area will disband units.
#[test]
fn datc_6h7_multiple_retreats_to_same_area() {
    let mut board = movement(&[
        "A bud Austria",
        "A tri Austria",
        "A mun Germany",
        "A sil Germany",
        "A vie Italy",
        "A boh Italy",
    ]);
    adjudicate(
        &mut board,
        "A bud S A tri - vie; A tri - vie; A mun S A sil - boh; A sil - boh; A vie H; A boh H",
    );
    assert!(is_dislodged(&board, "vie"));
    assert!(is_dislodged(&board, "boh"));

    adjudicate(&mut board, "A vie - tyr; A boh - tyr");
    fails(&board, "vie");
    fails(&board, "boh");
    assert!(occupant(&board, "tyr").is_none());
    assert!(board.dislodgeds().is_empty());
}

/// 6.H.11: Retreat when dislodged by adjacent convoy.
#[test]
fn datc_6h11_retreat_when_dislodged_by_adjacent_convoy() {
    let mut board = movement(&[
        "A gas France",
        "A bur France",
        "F mid France",
        "F wes France",
        "F gol France",
        "A mar Italy",
    ]);
    adjudicate(
        &mut board,
        "A gas - mar via convoy; A bur S A gas - mar; F mid C A gas - mar; \
         F wes C A gas - mar; F gol C A gas - mar; A mar H",
    );
    succeeds(&board, "gas");
    assert!(is_dislodged(&board, "mar"));

    adjudicate(&mut board, "A mar - gas");
    succeeds(&board, "mar");
    assert_eq!(owner(&board, "gas").as_deref(), Some("Italy"));
}

/// 6.H.15: No coastal crawl in retreat.
#[test]
fn datc_6h15_no_coastal_crawl_in_retreat() {
    let mut board = movement(&["F por England", "F spa/sc France", "F mid France"]);
    adjudicate(&mut board, "F por H; F spa/sc - por; F mid S F spa/sc - por");
    // The Mid-Atlantic is still held, so there is nowhere to go.
    assert!(is_destroyed(&board, "por"));

    // The same dislodgement with the Mid-Atlantic empty: Spain stays closed.
    let mut board = blank(Season::Spring, PhaseType::Retreat);
    place(&mut board, &["F por France"]);
    board.set_dislodged("por", Unit::fleet("England")).unwrap();
    board.set_dislodger(&p("spa/sc"), &p("por"));
    adjudicate(&mut board, "F por - spa/nc");
    assert_eq!(outcome(&board, "por"), Err(OrderError::IllegalRetreat));
    assert!(occupant(&board, "spa").is_none());
    assert!(is_destroyed(&board, "por"));
}

/// 6.H.16: Contested for both coasts.
#[test]
fn datc_6h16_contested_for_both_coasts() {
    let mut board = movement(&[
        "F mid France",
        "F gas France",
        "F wes France",
        "F tun Italy",
        "F tys Italy",
    ]);
    adjudicate(
        &mut board,
        "F mid - spa/nc; F gas - spa/nc; F wes H; F tun S F tys - wes; F tys - wes",
    );
    assert!(is_dislodged(&board, "wes"));

    adjudicate(&mut board, "F wes - spa/sc");
    assert_eq!(outcome(&board, "wes"), Err(OrderError::IllegalRetreat));
    assert!(occupant(&board, "spa").is_none());
}

/// 6.F.7: Dislodged convoy does not cause contested area.
#[test]
fn datc_6f7_dislodged_convoy_does_not_contest_area() {
    let mut board = movement(&[
        "F nth England",
        "A lon England",
        "F hel Germany",
        "F ska Germany",
    ]);
    adjudicate(
        &mut board,
        "F nth C A lon - hol; A lon - hol; F hel S F ska - nth; F ska - nth",
    );
    assert!(is_dislodged(&board, "nth"));
    assert!(!board.bounce(&p("nth"), &p("hol")));

    adjudicate(&mut board, "F nth - hol");
    succeeds(&board, "nth");
    assert_eq!(owner(&board, "hol").as_deref(), Some("England"));
}

/// A dislodged unit with every neighbour occupied is disbanded at the end
/// of the movement phase.
#[test]
fn dislodged_unit_without_retreat_is_disbanded() {
    let mut board = movement(&[
        "A ven Italy",
        "A tus Italy",
        "A pie Italy",
        "A apu Italy",
        "A rom Italy",
        "A tri Austria",
        "A tyr Austria",
        "F adr Austria",
    ]);
    adjudicate(&mut board, "A tri - ven; A tyr S A tri - ven; F adr S A tri - ven");
    succeeds(&board, "tri");
    assert!(!is_dislodged(&board, "ven"));
    assert_eq!(owner(&board, "ven").as_deref(), Some("Austria"));
    assert!(board.force_disbands().contains(&p("ven")));
}

// ===========================================================================
// SECTION 6.I: BUILDING
// ===========================================================================

fn adjustment(units: &[&str], scs: &[(&str, &str)]) -> Board {
    let mut board = blank(Season::Fall, PhaseType::Adjustment);
    place(&mut board, units);
    for (prov, nation) in scs {
        board.set_sc(*prov, Nation::from(*nation));
    }
    board
}

/// 6.I.1: Too many build orders.
/// The earliest builds win.
#[test]
fn datc_6i1_too_many_build_orders() {
    let mut board = adjustment(
        &["A ber Germany", "A ruh Germany"],
        &[("ber", "Germany"), ("kie", "Germany"), ("mun", "Germany")],
    );
    adjudicate(&mut board, "kie B A; mun B A");
    succeeds(&board, "kie");
    assert_eq!(outcome(&board, "mun"), Err(OrderError::IllegalBuild));
    assert_eq!(owner(&board, "kie").as_deref(), Some("Germany"));
    assert!(occupant(&board, "mun").is_none());
    assert_eq!(board.phase(), Phase::new(1902, Season::Spring, PhaseType::Movement));
}

/// 6.I.2: Fleets can not be built in land areas.
#[test]
fn datc_6i2_no_fleets_in_land_areas() {
    let mut board = adjustment(&[], &[("mos", "Russia")]);
    adjudicate(&mut board, "mos B F");
    assert_eq!(outcome(&board, "mos"), Err(OrderError::IllegalUnitType));
    assert!(board.units().is_empty());
}

/// 6.I.3: Supply center must be empty for building.
#[test]
fn datc_6i3_supply_center_must_be_empty() {
    let mut board = adjustment(&["A ber Germany"], &[("ber", "Germany"), ("kie", "Germany")]);
    adjudicate(&mut board, "ber B A");
    assert_eq!(outcome(&board, "ber"), Err(OrderError::OccupiedSupplyCenter));
}

/// 6.I.4: Both coasts must be empty for building.
#[test]
fn datc_6i4_both_coasts_must_be_empty() {
    let mut board = adjustment(
        &["F stp/sc Russia"],
        &[("stp", "Russia"), ("mos", "Russia")],
    );
    adjudicate(&mut board, "stp/nc B F");
    assert_eq!(outcome(&board, "stp/nc"), Err(OrderError::OccupiedSupplyCenter));
    assert_eq!(board.units().len(), 1);
}

/// 6.I.5: Building in home supply center that is not owned.
#[test]
fn datc_6i5_building_in_lost_home_center() {
    let mut board = adjustment(&[], &[("ber", "Russia")]);
    adjudicate(&mut board, "ber B A");
    assert_eq!(outcome(&board, "ber"), Err(OrderError::HostileSupplyCenter));
    assert!(board.units().is_empty());
}

/// 6.I.6: Building in owned supply center that is not a home supply center.
#[test]
fn datc_6i6_building_in_conquered_center() {
    let mut board = adjustment(&[], &[("war", "Germany")]);
    adjudicate(&mut board, "war B A");
    assert_eq!(outcome(&board, "war"), Err(OrderError::HostileSupplyCenter));
}

/// 6.I.7: Only one build in a home supply center.
#[test]
fn datc_6i7_only_one_build_per_center() {
    let mut board = adjustment(&[], &[("mos", "Russia"), ("stp", "Russia")]);
    submit(&mut board, "mos B A");
    let again = parse_orders("mos B A", 1).unwrap().remove(0);
    assert!(board.set_order("mos", again).is_err());
    board.next().unwrap();
    succeeds(&board, "mos");
    assert_eq!(board.units().len(), 1);
}

// ===========================================================================
// SECTION 6.J: CIVIL DISORDER AND DISBANDS
// ===========================================================================

/// 6.J.1: Too many remove orders.
#[test]
fn datc_6j1_too_many_remove_orders() {
    let mut board = adjustment(
        &["A par France", "A mar France", "A pic France"],
        &[("par", "France"), ("mar", "France")],
    );
    adjudicate(&mut board, "A pic D; A par D");
    succeeds(&board, "pic");
    assert_eq!(outcome(&board, "par"), Err(OrderError::IllegalDisband));
    assert!(occupant(&board, "pic").is_none());
    assert!(occupant(&board, "par").is_some());
    assert!(board.force_disbands().is_empty());
}

/// 6.J.2: Removing the same unit twice.
#[test]
fn datc_6j2_removing_the_same_unit_twice() {
    let mut board = adjustment(
        &["A par France", "A mar France", "A pic France", "A bur France"],
        &[("par", "France"), ("mar", "France")],
    );
    submit(&mut board, "A par D");
    let again = parse_orders("A par D", 1).unwrap().remove(0);
    assert!(board.set_order("par", again).is_err());
    board.next().unwrap();
    assert_eq!(board.units().len(), 2);
    assert!(occupant(&board, "par").is_none());
    // The second disband falls to civil disorder.
    assert_eq!(board.force_disbands().len(), 1);
}

/// 6.J.3: Civil disorder with two armies at different distance.
#[test]
fn datc_6j3_civil_disorder_different_distance() {
    let mut board = adjustment(&["A lvn Russia", "A swe Russia"], &[("stp", "Russia")]);
    board.next().unwrap();
    assert!(occupant(&board, "swe").is_none());
    assert!(occupant(&board, "lvn").is_some());
    assert!(board.force_disbands().contains(&p("swe")));
}

/// 6.J.4: Civil disorder with two armies at equal distance.
/// Ties go alphabetically.
#[test]
fn datc_6j4_civil_disorder_equal_distance() {
    let mut board = adjustment(&["A lvn Russia", "A sil Russia"], &[("stp", "Russia")]);
    board.next().unwrap();
    assert!(occupant(&board, "lvn").is_none());
    assert!(occupant(&board, "sil").is_some());
}

/// 6.J.7: Civil disorder: fleet before army at equal distance.
#[test]
fn datc_6j7_civil_disorder_fleet_before_army() {
    let mut board = adjustment(&["F bal Russia", "A boh Russia"], &[("stp", "Russia")]);
    board.next().unwrap();
    assert!(occupant(&board, "bal").is_none());
    assert!(occupant(&board, "boh").is_some());
}

// ===========================================================================
// ORDER INDEPENDENCE
// ===========================================================================

/// Adjudicates `units`/`orders` once per resolution order and checks that
/// every run ends in the same position.
fn assert_order_independent(units: &[&str], orders: &str) {
    let mut reference = movement(units);
    adjudicate(&mut reference, orders);
    let expected = reference.dump();

    let mut provinces: Vec<Province> = parse_orders(orders, 0)
        .unwrap()
        .iter()
        .map(|order| order.source().clone())
        .collect();
    for seed in 0..8u64 {
        provinces.shuffle(&mut SmallRng::seed_from_u64(seed));
        let mut board = movement(units);
        submit(&mut board, orders);
        board.next_from(&provinces).unwrap();
        assert_eq!(board.dump(), expected, "resolution order {:?}", provinces);
    }
}

#[test]
fn circular_convoy_is_order_independent() {
    assert_order_independent(CIRCULAR_CONVOY, CIRCULAR_CONVOY_ORDERS);
}

#[test]
fn convoy_paradox_is_order_independent() {
    assert_order_independent(
        &["F lon England", "F wal England", "A bre France", "F eng France"],
        "F lon S F wal - eng; F wal - eng; A bre - lon; F eng C A bre - lon",
    );
}

#[test]
fn head_to_head_is_order_independent() {
    assert_order_independent(
        &["A ber Germany", "F kie Germany", "A sil Germany", "A pru Russia"],
        "A ber - pru; F kie - ber; A sil S A ber - pru; A pru - ber",
    );
}

#[test]
fn unit_swap_is_order_independent() {
    assert_order_independent(
        &["F nth England", "A lon England", "F eng France", "A bel France"],
        "F nth C A lon - bel; A lon - bel; F eng C A bel - lon; A bel - lon",
    );
}

/// Resolving again changes nothing once every order has a resolution.
#[test]
fn resolutions_are_stable() {
    let mut board = movement(CIRCULAR_CONVOY);
    submit(&mut board, CIRCULAR_CONVOY_ORDERS);
    board.prepare();
    board.resolve_all(&[]).unwrap();
    let first = board.resolutions().clone();
    board.resolve_all(&[p("tri"), p("nap")]).unwrap();
    assert_eq!(board.resolutions(), &first);
}

// ===========================================================================
// FULL TURNS
// ===========================================================================

/// Supply centers change hands only at the end of the Fall retreat.
#[test]
fn supply_centers_transfer_after_fall() {
    let mut board = classical::start().unwrap();
    adjudicate(&mut board, "A par - bur");
    board.next().unwrap();
    assert_eq!(board.phase(), Phase::new(1901, Season::Fall, PhaseType::Movement));

    adjudicate(&mut board, "A bur - bel");
    assert_eq!(board.supply_center(&p("bel")), None);
    board.next().unwrap();
    assert_eq!(
        board.supply_center(&p("bel")),
        Some((p("bel"), Nation::from("France")))
    );
    assert_eq!(board.phase(), Phase::new(1901, Season::Fall, PhaseType::Adjustment));

    adjudicate(&mut board, "par B A");
    succeeds(&board, "par");
    assert_eq!(board.units().len(), 23);
    assert_eq!(board.phase(), Phase::new(1902, Season::Spring, PhaseType::Movement));
}
