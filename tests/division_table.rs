//! Division table construction and point lookups.

use ladder_server::ladder::{DivisionConfigError, DivisionTable};

fn stock() -> DivisionTable {
    DivisionTable::build(4, 5, 500).unwrap()
}

#[test]
fn builds_tiers_with_descending_subdivision_numerals() {
    let table = stock();
    let names: Vec<&str> = table.divisions().iter().map(|d| d.name.as_str()).collect();

    assert_eq!(table.len(), 4 * 5 + 1);
    assert_eq!(&names[..6], ["Bronze 5", "Bronze 4", "Bronze 3", "Bronze 2", "Bronze 1", "Silver 5"]);
    assert_eq!(names[19], "Platinum 1");
    assert_eq!(names[20], "Diamond");

    assert_eq!(table.divisions()[0].points, 0);
    assert_eq!(table.divisions()[5].points, 2500);
    assert_eq!(table.divisions()[20].points, 10_000);
}

#[test]
fn thresholds_strictly_increase() {
    for (tiers, subs, pts) in [(1, 1, 1), (4, 5, 500), (2, 3, 250), (0, 4, 100)] {
        let table = DivisionTable::build(tiers, subs, pts).unwrap();
        assert_eq!(table.len(), tiers * subs + 1);
        assert_eq!(table.lookup(0).1, 0);
        assert!(table
            .divisions()
            .windows(2)
            .all(|w| w[0].points < w[1].points));
    }
}

#[test]
fn every_threshold_maps_to_its_own_division() {
    let table = stock();
    for (i, d) in table.divisions().iter().enumerate() {
        let (found, rank) = table.lookup(d.points);
        assert_eq!(rank, i);
        assert_eq!(found, d);
        if i > 0 {
            assert_eq!(table.rank_index(d.points - 1), i - 1);
        }
    }
}

#[test]
fn out_of_range_totals_clamp() {
    let table = stock();
    assert_eq!(table.lookup(-300).1, 0);
    assert_eq!(table.lookup(-300).0.name, "Bronze 5");
    assert_eq!(table.lookup(1_000_000).0.name, "Diamond");
}

#[test]
fn rank_distance_is_signed_and_antisymmetric() {
    let table = stock();
    assert_eq!(table.rank_distance(1250, 5000), 8);
    assert_eq!(table.rank_distance(5000, 1250), -8);
    assert_eq!(table.rank_distance(1250, 1499), 0);

    for (a, b) in [(0, 10_000), (499, 500), (2600, 7400), (-5, 3000)] {
        assert_eq!(table.rank_distance(a, b), -table.rank_distance(b, a));
    }
}

#[test]
fn rejects_inconsistent_configuration() {
    assert_eq!(
        DivisionTable::build(5, 5, 500).unwrap_err(),
        DivisionConfigError::NotEnoughNames {
            tiers: 5,
            needed: 6,
            available: 5
        }
    );
    assert_eq!(
        DivisionTable::build(4, 0, 500).unwrap_err(),
        DivisionConfigError::NoSubdivisions
    );
    assert_eq!(
        DivisionTable::build(4, 5, 0).unwrap_err(),
        DivisionConfigError::NonPositivePoints(0)
    );
}

#[test]
fn custom_names_are_honoured() {
    let table = DivisionTable::build_with_names(&["Wood", "Stone", "Iron"], 2, 2, 10).unwrap();
    let names: Vec<&str> = table.divisions().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Wood 2", "Wood 1", "Stone 2", "Stone 1", "Iron"]);
    assert_eq!(table.divisions()[4].points, 40);
}
