use crate::app::ports::PostSourcePort;
use crate::error::{Result, ScraperError};
use crate::types::RawPostEntry;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Posts exported by the browsing layer as one JSON document mapping each
/// page id to its list of `{caption, images}` entries.
#[derive(Debug, Default)]
pub struct JsonSnapshotSource {
    pages: HashMap<String, Vec<RawPostEntry>>,
}

impl JsonSnapshotSource {
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: HashMap<String, Vec<RawPostEntry>> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&content)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[async_trait]
impl PostSourcePort for JsonSnapshotSource {
    async fn fetch_posts(&self, page_id: &str) -> Result<Vec<RawPostEntry>> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| ScraperError::PageScrape {
                page_id: page_id.to_string(),
                message: "page not present in snapshot".into(),
            })
    }
}
