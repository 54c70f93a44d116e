use crate::classifier::EventClassifier;
use crate::constants::{
    indexed_artist_var, ARTISTS_JSON_ENV, ARTIST_COUNT_ENV, DEFAULT_ARTISTS, DEFAULT_ARTIST_COUNT,
    DEFAULT_OCR_URL, DEFAULT_SINK_URL, EVENT_KEYWORDS, OCR_URL_ENV, SINK_URL_ENV, VENUES_JSON_ENV,
};
use crate::error::{Result, ScraperError};
use crate::extraction::{FieldPatterns, PatternExtractor, VenueGazetteer};
use crate::types::ArtistConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// Timing and paging knobs, read from an optional TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub flyer_timeout_secs: u64,
    pub delivery_timeout_secs: u64,
    pub page_interval_secs: u64,
    pub max_posts_per_page: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            flyer_timeout_secs: 10,
            delivery_timeout_secs: 30,
            page_interval_secs: 2,
            max_posts_per_page: 10,
        }
    }
}

impl RunSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Missing file means defaults. A file that cannot be read or parsed is
    /// logged and also falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(ScraperError::from)
            .and_then(|content| Self::from_toml_str(&content));
        match parsed {
            Ok(settings) => {
                info!("Loaded run settings from {}", path.display());
                settings
            }
            Err(e) => {
                error!("Failed to parse settings file '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn flyer_timeout(&self) -> Duration {
        Duration::from_secs(self.flyer_timeout_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }

    pub fn page_interval(&self) -> Duration {
        Duration::from_secs(self.page_interval_secs)
    }
}

/// Everything a run needs, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub sink_url: String,
    pub ocr_url: String,
    pub artists: Vec<ArtistConfig>,
    pub venues: VenueGazetteer,
    /// Fixed list; not read from the environment
    pub event_keywords: Vec<String>,
    /// Date, time and cover priority lists used on flyer text
    pub patterns: FieldPatterns,
    pub settings: RunSettings,
}

#[derive(Debug, Deserialize)]
struct ArtistEntry {
    name: String,
    category_id: i64,
}

impl Config {
    pub fn from_env(settings: RunSettings) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), settings)
    }

    /// Build from any key lookup. Every source is optional and every parse
    /// failure falls back to the built-in default for that part.
    pub fn from_lookup<F>(lookup: F, settings: RunSettings) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let sink_url = lookup(SINK_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SINK_URL.to_string());
        let ocr_url = lookup(OCR_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OCR_URL.to_string());

        Self {
            sink_url,
            ocr_url,
            artists: load_artists(&lookup),
            venues: load_venues(&lookup),
            event_keywords: EVENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            patterns: FieldPatterns::standard().clone(),
            settings,
        }
    }

    pub fn classifier(&self) -> EventClassifier<'_> {
        EventClassifier::new(&self.event_keywords, &self.venues)
    }

    pub fn extractor(&self) -> PatternExtractor<'_> {
        PatternExtractor::new(&self.patterns)
    }
}

/// Page id → artist entry, kept in the order the registry lists them
pub fn parse_artists_json(json: &str) -> Result<Vec<ArtistConfig>> {
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .map(|(page_id, value)| -> Result<ArtistConfig> {
            let entry: ArtistEntry = serde_json::from_value(value)?;
            Ok(ArtistConfig::new(page_id, entry.name, entry.category_id))
        })
        .collect()
}

fn load_artists<F>(lookup: &F) -> Vec<ArtistConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(json) = lookup(ARTISTS_JSON_ENV) {
        match parse_artists_json(&json) {
            Ok(artists) => return artists,
            Err(e) => error!("Failed to parse {} JSON: {}", ARTISTS_JSON_ENV, e),
        }
    }

    let artists = load_indexed_artists(lookup);
    if !artists.is_empty() {
        return artists;
    }

    warn!("No artist configuration found in environment, using defaults");
    DEFAULT_ARTISTS
        .iter()
        .map(|&(page_id, name, category_id)| ArtistConfig::new(page_id, name, category_id))
        .collect()
}

fn load_indexed_artists<F>(lookup: &F) -> Vec<ArtistConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let count = match lookup(ARTIST_COUNT_ENV) {
        None => DEFAULT_ARTIST_COUNT,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            error!("Invalid {} '{}', using {}", ARTIST_COUNT_ENV, raw, DEFAULT_ARTIST_COUNT);
            DEFAULT_ARTIST_COUNT
        }),
    };

    let mut artists = Vec::new();
    for i in 1..=count {
        let (Some(page_id), Some(name), Some(category)) = (
            lookup(&indexed_artist_var(i, "URL")),
            lookup(&indexed_artist_var(i, "NAME")),
            lookup(&indexed_artist_var(i, "CATEGORY_ID")),
        ) else {
            continue;
        };
        match category.trim().parse::<i64>() {
            Ok(category_id) => artists.push(ArtistConfig::new(page_id, name, category_id)),
            Err(e) => error!("Skipping artist {}: invalid category id '{}': {}", i, category, e),
        }
    }
    artists
}

fn load_venues<F>(lookup: &F) -> VenueGazetteer
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(json) = lookup(VENUES_JSON_ENV) {
        match serde_json::from_str::<Vec<String>>(&json) {
            Ok(venues) => return VenueGazetteer::new(venues),
            Err(e) => error!("Failed to parse {} JSON: {}", VENUES_JSON_ENV, e),
        }
    }
    VenueGazetteer::default()
}
