use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::catalog::LineupRecord;

pub const DEEP_LINK_BASE: &str = "lineups://video";
pub const PLACEHOLDER: &str = "-";
pub const FALLBACK_TITLE: &str = "Selected utility";
pub const NO_IMAGE: &str = "(no image)";
pub const WATCH_LABEL: &str = "Watch lineup video";

/// Flat parameters handed to the details screen. Any of them may be missing when the
/// screen is reached from a deep link rather than from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailParams {
    pub name: Option<String>,
    pub map: Option<String>,
    pub side: Option<String>,
    #[serde(rename = "type")]
    pub utility_type: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl DetailParams {
    pub fn from_record(record: &LineupRecord) -> Self {
        Self {
            name: non_empty(&record.name),
            map: non_empty(record.map.label()),
            side: non_empty(record.side.label()),
            utility_type: non_empty(record.utility_type.label()),
            image_url: non_empty(&record.image_url),
            video_url: non_empty(&record.video_url),
        }
    }

    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = non_empty(value.as_ref());
            let slot = match key.as_ref() {
                "name" => &mut params.name,
                "map" => &mut params.map,
                "side" => &mut params.side,
                "type" | "utilityType" => &mut params.utility_type,
                "imageUrl" => &mut params.image_url,
                "videoUrl" => &mut params.video_url,
                _ => continue,
            };
            *slot = value;
        }
        params
    }

    /// Reads the query string of any URL; the scheme and path are not checked.
    pub fn from_deep_link(link: &str) -> Result<Self> {
        let url = Url::parse(link.trim()).with_context(|| format!("invalid deep link '{link}'"))?;
        Ok(Self::from_query_pairs(url.query_pairs()))
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("map", &self.map),
            ("side", &self.side),
            ("type", &self.utility_type),
            ("imageUrl", &self.image_url),
            ("videoUrl", &self.video_url),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }

    pub fn to_deep_link(&self) -> String {
        let Ok(mut url) = Url::parse(DEEP_LINK_BASE) else {
            return DEEP_LINK_BASE.to_string();
        };
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.to_query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url.to_string()
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }
}

/// Text rendered by the details screen, with placeholders for absent fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub meta: String,
    pub image: String,
    pub action: &'static str,
}

impl DetailView {
    pub fn from_params(params: &DetailParams) -> Self {
        let field = |value: &Option<String>| value.as_deref().unwrap_or(PLACEHOLDER).to_string();
        Self {
            title: params
                .name
                .clone()
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            meta: format!(
                "{} • {} • {}",
                field(&params.map),
                field(&params.side),
                field(&params.utility_type)
            ),
            image: params
                .image_url
                .clone()
                .unwrap_or_else(|| NO_IMAGE.to_string()),
            action: WATCH_LABEL,
        }
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
