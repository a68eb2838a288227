use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use lineup_terminal::catalog::Catalog;
use lineup_terminal::config::AppConfig;

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = config_from(&[]);
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.tick_rate, Duration::from_millis(250));
    let catalog = config.load_catalog().expect("builtin catalog");
    assert_eq!(catalog.len(), Catalog::builtin().len());
}

#[test]
fn reads_and_clamps_values() {
    let config = config_from(&[
        ("LINEUPS_OPENER", "  firefox --new-tab "),
        ("LINEUPS_TICK_MS", "10"),
        ("LINEUPS_CATALOG_PATH", ""),
    ]);
    assert_eq!(config.opener_command.as_deref(), Some("firefox --new-tab"));
    assert_eq!(config.tick_rate, Duration::from_millis(50));
    assert_eq!(config.catalog_path, None);
}

#[test]
fn invalid_tick_falls_back_to_default() {
    let config = config_from(&[("LINEUPS_TICK_MS", "fast")]);
    assert_eq!(config.tick_rate, Duration::from_millis(250));
}

#[test]
fn catalog_path_points_at_json_file() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("catalog.json");
    let config = config_from(&[("LINEUPS_CATALOG_PATH", path.to_str().unwrap())]);
    let catalog = config.load_catalog().expect("fixture catalog");
    assert_eq!(catalog.len(), 3);

    let missing = config_from(&[("LINEUPS_CATALOG_PATH", "/nonexistent/lineups.json")]);
    assert!(missing.load_catalog().is_err());
}
