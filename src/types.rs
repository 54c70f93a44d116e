use crate::error::{Result, ScraperError};
use serde::Serialize;

/// Raw post entry as yielded by a post enumerator
pub type RawPostEntry = serde_json::Value;

/// One monitored artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistConfig {
    pub page_id: String,
    pub name: String,
    pub category_id: i64,
}

impl ArtistConfig {
    pub fn new(page_id: impl Into<String>, name: impl Into<String>, category_id: i64) -> Self {
        Self {
            page_id: page_id.into(),
            name: name.into(),
            category_id,
        }
    }
}

/// A post as found on a page: its caption and the image references attached
/// to it, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedPost {
    pub caption: String,
    pub image_refs: Vec<String>,
}

impl ScrapedPost {
    /// Interpret a raw entry. A missing or null caption reads as empty text,
    /// anything else of the wrong shape is an error.
    pub fn from_raw(raw: &RawPostEntry) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ScraperError::MissingField("post entry is not an object".into()))?;

        let caption = match obj.get("caption") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(value) => value
                .as_str()
                .ok_or_else(|| ScraperError::MissingField("caption is not a string".into()))?
                .to_string(),
        };

        let image_refs = match obj.get("images") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(value) => value
                .as_array()
                .ok_or_else(|| ScraperError::MissingField("images is not an array".into()))?
                .iter()
                .map(|img| {
                    img.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ScraperError::MissingField("image reference is not a string".into()))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self { caption, image_refs })
    }
}

/// Caption plus the flyer text that was read for it. Consumed once.
#[derive(Debug, Clone, Default)]
pub struct RawPost {
    pub caption_text: String,
    pub flyer_text: String,
}
