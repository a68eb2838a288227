use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use lineup_terminal::catalog::{Catalog, LineupRecord, Map, Side, UtilityType};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn record(id: &str, map: Map, side: Side, utility_type: UtilityType) -> LineupRecord {
    LineupRecord {
        id: id.to_string(),
        map,
        side,
        utility_type,
        name: format!("Lineup {id}"),
        image_url: format!("https://example.com/{id}.png"),
        video_url: format!("https://example.com/{id}"),
    }
}

#[test]
fn builtin_catalog_has_unique_ids() {
    let catalog = Catalog::builtin();
    assert!(!catalog.is_empty());
    let ids: HashSet<&str> = catalog
        .all_lineups()
        .iter()
        .map(|lineup| lineup.id.as_str())
        .collect();
    assert_eq!(ids.len(), catalog.len());
}

#[test]
fn builtin_catalog_validates_through_new() {
    let records = Catalog::builtin().all_lineups().to_vec();
    let rebuilt = Catalog::new(records).expect("builtin records are valid");
    assert_eq!(rebuilt.all_lineups(), Catalog::builtin().all_lineups());
}

#[test]
fn builtin_catalog_leaves_some_triples_empty() {
    // No placeholder records are generated for unlisted combinations.
    let catalog = Catalog::builtin();
    assert_eq!(catalog.count_for(Map::Ancient, Side::CT, UtilityType::Smoke), 0);
    assert_eq!(catalog.count_for(Map::Anubis, Side::TR, UtilityType::Flash), 0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Catalog::new(vec![
        record("dup", Map::Mirage, Side::CT, UtilityType::Smoke),
        record("dup", Map::Nuke, Side::TR, UtilityType::Flash),
    ])
    .expect_err("duplicate ids must fail");
    assert!(err.to_string().contains("dup"));
}

#[test]
fn empty_ids_are_rejected() {
    assert!(Catalog::new(vec![record(" ", Map::Mirage, Side::CT, UtilityType::Smoke)]).is_err());
}

#[test]
fn all_lineups_preserves_insertion_order() {
    let catalog = Catalog::new(vec![
        record("c", Map::Nuke, Side::TR, UtilityType::Smoke),
        record("a", Map::Mirage, Side::CT, UtilityType::Flash),
        record("b", Map::Nuke, Side::TR, UtilityType::Smoke),
    ])
    .unwrap();
    let ids: Vec<&str> = catalog.all_lineups().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);

    let nuke: Vec<&str> = catalog
        .lineups_for(Map::Nuke, Side::TR, UtilityType::Smoke)
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(nuke, ["c", "b"]);
    assert_eq!(catalog.count_for(Map::Nuke, Side::TR, UtilityType::Smoke), 2);
}

#[test]
fn find_by_id() {
    let catalog = Catalog::builtin();
    let lineup = catalog.find("nuke-tr-smoke-outside").expect("known id");
    assert_eq!(lineup.map, Map::Nuke);
    assert!(catalog.find("missing").is_none());
}

#[test]
fn loads_json_fixture() {
    let catalog = Catalog::load(&fixture_path("catalog.json")).expect("fixture should load");
    assert_eq!(catalog.len(), 3);
    let first = &catalog.all_lineups()[0];
    assert_eq!(first.id, "x1");
    assert_eq!(first.map, Map::Mirage);
    assert_eq!(first.utility_type, UtilityType::Smoke);
    assert_eq!(first.video_url, "https://www.youtube.com/watch?v=jungle");
    assert_eq!(catalog.all_lineups()[1].map, Map::DustII);
}

#[test]
fn json_with_unknown_map_fails() {
    let raw = fs::read_to_string(fixture_path("catalog.json"))
        .unwrap()
        .replace("\"Mirage\"", "\"Cache\"");
    assert!(Catalog::from_json_str(&raw).is_err());
}

#[test]
fn missing_catalog_file_is_an_error() {
    assert!(Catalog::load(&fixture_path("does_not_exist.json")).is_err());
}

#[test]
fn enum_parsing_is_lenient() {
    assert_eq!(Map::parse("Dust II"), Some(Map::DustII));
    assert_eq!(Map::parse("dust2"), Some(Map::DustII));
    assert_eq!(Map::parse("de_mirage"), Some(Map::Mirage));
    assert_eq!(Map::parse("Cache"), None);
    assert_eq!(Side::parse("t"), Some(Side::TR));
    assert_eq!(Side::parse("Counter-Terrorist"), Some(Side::CT));
    assert_eq!(UtilityType::parse("molly"), Some(UtilityType::Molotov));
    assert_eq!(UtilityType::parse("HE"), None);
}

#[test]
fn enum_labels_follow_display_order() {
    let maps: Vec<&str> = Map::ALL.iter().map(|m| m.label()).collect();
    assert_eq!(
        maps,
        ["Dust II", "Mirage", "Inferno", "Overpass", "Anubis", "Ancient", "Nuke"]
    );
    assert_eq!(Side::ALL.map(Side::label), ["CT", "TR"]);
    assert_eq!(
        UtilityType::ALL.map(UtilityType::label),
        ["Smoke", "Flash", "Molotov"]
    );
    for map in Map::ALL {
        assert_eq!(Map::parse(map.label()), Some(map));
    }
}
