use crate::constants::DESCRIPTION_SEPARATOR;
use crate::extraction::ExtractedFields;
use crate::types::{ArtistConfig, RawPost};
use serde::{Deserialize, Serialize};

/// Event record as delivered to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub artist: String,
    pub category_id: i64,
    pub post_text: String,
    pub flyer_text: String,
    #[serde(flatten)]
    pub fields: ExtractedFields,
    pub title: String,
    pub description: String,
}

pub struct EventRecordBuilder;

impl EventRecordBuilder {
    pub fn build(artist: &ArtistConfig, post_text: &str, flyer_text: &str, fields: ExtractedFields) -> EventRecord {
        EventRecord {
            artist: artist.name.clone(),
            category_id: artist.category_id,
            post_text: post_text.to_string(),
            flyer_text: flyer_text.to_string(),
            title: Self::title(&artist.name, &fields),
            description: Self::description(post_text, flyer_text, fields.cover_charge.as_deref()),
            fields,
        }
    }

    pub fn from_raw_post(artist: &ArtistConfig, post: RawPost, fields: ExtractedFields) -> EventRecord {
        Self::build(artist, &post.caption_text, &post.flyer_text, fields)
    }

    /// Venue beats date beats the bare fallback, so the title is never empty
    pub fn title(artist: &str, fields: &ExtractedFields) -> String {
        if let Some(venue) = &fields.venue {
            format!("{artist} at {venue}")
        } else if let Some(date) = &fields.date {
            format!("{artist} Live Show - {date}")
        } else {
            format!("{artist} Live Show")
        }
    }

    pub fn description(post_text: &str, flyer_text: &str, cover_charge: Option<&str>) -> String {
        let mut parts = Vec::with_capacity(3);
        if !post_text.is_empty() {
            parts.push(format!("Facebook Post: {post_text}"));
        }
        if !flyer_text.is_empty() {
            parts.push(format!("Flyer Details: {flyer_text}"));
        }
        if let Some(cover) = cover_charge {
            parts.push(format!("Cover: {cover}"));
        }
        parts.join(DESCRIPTION_SEPARATOR)
    }
}
