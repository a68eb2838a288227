use anyhow::{Context, Result, anyhow};

use lineup_terminal::catalog::{Map, Side, UtilityType};
use lineup_terminal::config::AppConfig;
use lineup_terminal::details::DetailParams;
use lineup_terminal::selection::SelectionEngine;

const USAGE: &str = "usage: lineup_query <map> <side> <utility> [--json]";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let json = args.iter().any(|arg| arg == "--json");
    let positional = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .collect::<Vec<_>>();
    let [map, side, utility] = positional.as_slice() else {
        return Err(anyhow!(USAGE));
    };

    let map = Map::parse(map).with_context(|| format!("unknown map '{map}'"))?;
    let side = Side::parse(side).with_context(|| format!("unknown side '{side}'"))?;
    let utility_type =
        UtilityType::parse(utility).with_context(|| format!("unknown utility '{utility}'"))?;

    let catalog = AppConfig::from_env().load_catalog()?;
    let mut engine = SelectionEngine::new(&catalog);
    engine.choose_map(map);
    engine.choose_side(side);
    engine.choose_utility_type(utility_type);
    let lineups = engine.visible_lineups();

    if json {
        let out = serde_json::to_string_pretty(&lineups).context("serialize lineups")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", engine.summary());
    for lineup in lineups {
        println!();
        println!("{} [{}]", lineup.name, lineup.id);
        println!("  video: {}", lineup.video_url);
        println!("  image: {}", lineup.image_url);
        println!("  link:  {}", DetailParams::from_record(lineup).to_deep_link());
    }
    Ok(())
}
