//! Names of the environment variables read at startup, and the fallbacks used
//! when they are missing or unparsable.

// Sink
pub const SINK_URL_ENV: &str = "N8N_WEBHOOK_URL";
pub const DEFAULT_SINK_URL: &str = "https://n8n.example.com/webhook/facebook-events";

// Image-text service
pub const OCR_URL_ENV: &str = "OCR_SERVICE_URL";
pub const DEFAULT_OCR_URL: &str = "http://localhost:8884/ocr";

// Artist registry
pub const ARTISTS_JSON_ENV: &str = "FACEBOOK_ARTISTS_CONFIG";
pub const ARTIST_COUNT_ENV: &str = "FACEBOOK_ARTIST_COUNT";
pub const DEFAULT_ARTIST_COUNT: usize = 3;

// Venue gazetteer
pub const VENUES_JSON_ENV: &str = "FACEBOOK_VENUES_CONFIG";

/// Settings file read when `--settings` is not given
pub const DEFAULT_SETTINGS_PATH: &str = "scraper.toml";

/// Only images served from the Facebook CDN are treated as flyer candidates
pub const FLYER_IMAGE_MARKER: &str = "scontent";

/// The only sink status that counts as delivered
pub const SINK_SUCCESS_STATUS: u16 = 200;

/// Separator between description parts
pub const DESCRIPTION_SEPARATOR: &str = "\n\n";

pub fn indexed_artist_var(index: usize, field: &str) -> String {
    format!("FACEBOOK_ARTIST_{index}_{field}")
}

/// Fixed event keyword list. Deliberately not exposed through the
/// environment like venues and artists are.
pub const EVENT_KEYWORDS: &[&str] = &[
    "tonight",
    "show",
    "live",
    "performance",
    "gig",
    "concert",
    "playing",
    "music",
    "venue",
    "bar",
    "club",
    "festival",
    "friday",
    "saturday",
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
];

/// Built-in gazetteer, in match priority order
pub const DEFAULT_VENUES: &[&str] = &[
    "blue moon saloon",
    "whiskey tales",
    "artmosphere",
    "feed and seed",
    "hurricane bar",
    "social southern table",
    "the grouse room",
    "legends bar",
    "acadiana bar",
    "cowboy country",
    "chophouse",
    "el sid o",
    "rock n bowl",
    "spankys",
    "jefferson street pub",
];

/// (page id, display name, category id) used when no registry is configured
pub const DEFAULT_ARTISTS: &[(&str, &str, i64)] = &[
    ("facebook.com/example.artist.1", "Example Artist 1", 4),
    ("facebook.com/example.artist.2", "Example Artist 2", 5),
    ("facebook.com/example.artist.3", "Example Artist 3", 6),
];
