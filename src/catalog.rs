use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Map {
    #[serde(rename = "Dust II")]
    DustII,
    Mirage,
    Inferno,
    Overpass,
    Anubis,
    Ancient,
    Nuke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Side {
    CT,
    TR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilityType {
    Smoke,
    Flash,
    Molotov,
}

impl Map {
    pub const ALL: [Map; 7] = [
        Map::DustII,
        Map::Mirage,
        Map::Inferno,
        Map::Overpass,
        Map::Anubis,
        Map::Ancient,
        Map::Nuke,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Map::DustII => "Dust II",
            Map::Mirage => "Mirage",
            Map::Inferno => "Inferno",
            Map::Overpass => "Overpass",
            Map::Anubis => "Anubis",
            Map::Ancient => "Ancient",
            Map::Nuke => "Nuke",
        }
    }

    /// Lenient lookup used by deep links and the query tool (`dust2`, `Dust II`, `de_mirage`).
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        let key = key.strip_prefix("de").unwrap_or(&key);
        match key {
            "dustii" | "dust2" | "dust" | "d2" => Some(Map::DustII),
            "mirage" => Some(Map::Mirage),
            "inferno" => Some(Map::Inferno),
            "overpass" => Some(Map::Overpass),
            "anubis" => Some(Map::Anubis),
            "ancient" => Some(Map::Ancient),
            "nuke" => Some(Map::Nuke),
            _ => None,
        }
    }
}

impl Side {
    pub const ALL: [Side; 2] = [Side::CT, Side::TR];

    pub fn label(self) -> &'static str {
        match self {
            Side::CT => "CT",
            Side::TR => "TR",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_key(raw).as_str() {
            "ct" | "counterterrorist" | "counterterrorists" => Some(Side::CT),
            "tr" | "t" | "terrorist" | "terrorists" => Some(Side::TR),
            _ => None,
        }
    }
}

impl UtilityType {
    pub const ALL: [UtilityType; 3] = [UtilityType::Smoke, UtilityType::Flash, UtilityType::Molotov];

    pub fn label(self) -> &'static str {
        match self {
            UtilityType::Smoke => "Smoke",
            UtilityType::Flash => "Flash",
            UtilityType::Molotov => "Molotov",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_key(raw).as_str() {
            "smoke" => Some(UtilityType::Smoke),
            "flash" | "flashbang" => Some(UtilityType::Flash),
            "molotov" | "molly" | "incendiary" => Some(UtilityType::Molotov),
            _ => None,
        }
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRecord {
    pub id: String,
    pub map: Map,
    pub side: Side,
    #[serde(rename = "type")]
    pub utility_type: UtilityType,
    pub name: String,
    pub image_url: String,
    pub video_url: String,
}

impl LineupRecord {
    pub fn matches(&self, map: Map, side: Side, utility_type: UtilityType) -> bool {
        self.map == map && self.side == side && self.utility_type == utility_type
    }
}

type TripleKey = (Map, Side, UtilityType);

/// Immutable lineup catalog. Built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    lineups: Vec<LineupRecord>,
    // Positions into `lineups`, ascending, so lookups keep insertion order.
    index: HashMap<TripleKey, Vec<usize>>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::indexed(builtin_records()));

impl Catalog {
    pub fn new(lineups: Vec<LineupRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(lineups.len());
        for lineup in &lineups {
            if lineup.id.trim().is_empty() {
                bail!("lineup '{}' has an empty id", lineup.name);
            }
            if !seen.insert(lineup.id.as_str()) {
                bail!("duplicate lineup id '{}'", lineup.id);
            }
        }
        Ok(Self::indexed(lineups))
    }

    /// The compiled-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let lineups: Vec<LineupRecord> =
            serde_json::from_str(raw).context("parse lineup catalog json")?;
        Self::new(lineups)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read lineup catalog {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("load {}", path.display()))
    }

    fn indexed(lineups: Vec<LineupRecord>) -> Self {
        let mut index: HashMap<TripleKey, Vec<usize>> = HashMap::new();
        for (pos, lineup) in lineups.iter().enumerate() {
            index
                .entry((lineup.map, lineup.side, lineup.utility_type))
                .or_default()
                .push(pos);
        }
        Self { lineups, index }
    }

    pub fn all_lineups(&self) -> &[LineupRecord] {
        &self.lineups
    }

    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    pub fn lineups_for(
        &self,
        map: Map,
        side: Side,
        utility_type: UtilityType,
    ) -> Vec<&LineupRecord> {
        self.index
            .get(&(map, side, utility_type))
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|pos| self.lineups.get(*pos))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count_for(&self, map: Map, side: Side, utility_type: UtilityType) -> usize {
        self.index
            .get(&(map, side, utility_type))
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn find(&self, id: &str) -> Option<&LineupRecord> {
        self.lineups.iter().find(|lineup| lineup.id == id)
    }
}

fn lineup(
    id: &str,
    map: Map,
    side: Side,
    utility_type: UtilityType,
    name: &str,
    image_url: &str,
    video_url: &str,
) -> LineupRecord {
    LineupRecord {
        id: id.to_string(),
        map,
        side,
        utility_type,
        name: name.to_string(),
        image_url: image_url.to_string(),
        video_url: video_url.to_string(),
    }
}

fn builtin_records() -> Vec<LineupRecord> {
    use Map::*;
    use Side::*;
    use UtilityType::*;

    vec![
        lineup(
            "d2-ct-smoke-xbox",
            DustII,
            CT,
            Smoke,
            "Smoke Xbox",
            "https://images.unsplash.com/photo-1589241062272-c0a000072dfa?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=a0zEGixjkt0",
        ),
        lineup(
            "d2-ct-smoke-long",
            DustII,
            CT,
            Smoke,
            "Smoke Long",
            "https://images.unsplash.com/photo-1542751371-adc38448a05e?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=3S6uV8i7-qY",
        ),
        lineup(
            "d2-ct-flash-retake-b",
            DustII,
            CT,
            Flash,
            "Flash Retake B",
            "https://images.unsplash.com/photo-1511512578047-dfb367046420?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=OJxFvQd3A2Q",
        ),
        lineup(
            "d2-ct-molotov-car",
            DustII,
            CT,
            Molotov,
            "Molotov Car Long",
            "https://images.unsplash.com/photo-1548686304-89d188a80029?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=ebJiIGfNKB4",
        ),
        lineup(
            "d2-tr-smoke-ct-a",
            DustII,
            TR,
            Smoke,
            "Smoke CT A",
            "https://images.unsplash.com/photo-1552820728-8b83bb6b773f?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=xE6sY7f3jPk",
        ),
        lineup(
            "d2-tr-flash-long",
            DustII,
            TR,
            Flash,
            "Flash Long Exit",
            "https://images.unsplash.com/photo-1493711662062-fa541adb3fc8?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=3dY5wQ5K7p8",
        ),
        lineup(
            "d2-tr-molotov-goose",
            DustII,
            TR,
            Molotov,
            "Molotov Goose",
            "https://images.unsplash.com/photo-1509198397868-475647b2a1e5?auto=format&fit=crop&w=900&q=80",
            "https://www.youtube.com/watch?v=PQ1UmhA2zSE",
        ),
        lineup(
            "mirage-ct-smoke-a-ramp",
            Mirage,
            CT,
            Smoke,
            "Smoke A Ramp (retake)",
            "https://dummyimage.com/900x600/1f2937/ffffff&text=Mirage+CT+Smoke+A+Ramp",
            "https://www.youtube.com/watch?v=2EMM4nM7Q8Q",
        ),
        lineup(
            "mirage-ct-smoke-palace",
            Mirage,
            CT,
            Smoke,
            "Smoke Palace (retake)",
            "https://dummyimage.com/900x600/1f2937/ffffff&text=Mirage+CT+Smoke+Palace",
            "https://www.youtube.com/watch?v=VK0tNANB8cE",
        ),
        lineup(
            "mirage-tr-flash-a-exec",
            Mirage,
            TR,
            Flash,
            "Flash A Execute",
            "https://dummyimage.com/900x600/0f766e/ffffff&text=Mirage+TR+Flash+A+Exec",
            "https://www.youtube.com/watch?v=fF04NQFF39U",
        ),
        lineup(
            "dust2-tr-smoke-xbox",
            DustII,
            TR,
            Smoke,
            "Smoke Xbox (mid control)",
            "https://dummyimage.com/900x600/0f172a/ffffff&text=Dust+II+TR+Smoke+Xbox",
            "https://www.youtube.com/watch?v=HfwwWf5rRpk",
        ),
        lineup(
            "inferno-ct-molotov-banana",
            Inferno,
            CT,
            Molotov,
            "Molotov Banana (delay rush)",
            "https://dummyimage.com/900x600/7f1d1d/ffffff&text=Inferno+CT+Molotov+Banana",
            "https://www.youtube.com/watch?v=QdiDaPr1y78",
        ),
        lineup(
            "nuke-tr-smoke-outside",
            Nuke,
            TR,
            Smoke,
            "Outside Smokes",
            "https://dummyimage.com/900x600/1e3a8a/ffffff&text=Nuke+TR+Outside+Smokes",
            "https://www.youtube.com/watch?v=3GPl1xNCRwM",
        ),
    ]
}
