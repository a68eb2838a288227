use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::catalog::Catalog;

const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: Option<PathBuf>,
    pub opener_command: Option<String>,
    pub tick_rate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            opener_command: None,
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl AppConfig {
    /// Reads `LINEUPS_*` variables. Call after `.env` files are loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = opt_string(lookup("LINEUPS_CATALOG_PATH")).map(PathBuf::from);
        let opener_command = opt_string(lookup("LINEUPS_OPENER"));
        let tick_ms = lookup("LINEUPS_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(MIN_TICK_MS);
        Self {
            catalog_path,
            opener_command,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    /// The configured catalog file, or the compiled-in catalog when none is set.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin().clone()),
        }
    }
}

fn opt_string(raw: Option<String>) -> Option<String> {
    raw.map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
