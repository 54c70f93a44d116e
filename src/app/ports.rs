use crate::error::Result;
use crate::types::RawPostEntry;
use async_trait::async_trait;
use serde_json::Value;

/// Enumerates recent posts on a monitored page, newest first
#[async_trait]
pub trait PostSourcePort: Send + Sync {
    async fn fetch_posts(&self, page_id: &str) -> Result<Vec<RawPostEntry>>;
}

/// Best-effort text extraction from an image reference. `Ok(None)` means the
/// image was readable but carried no text.
#[async_trait]
pub trait ImageTextPort: Send + Sync {
    async fn extract_text(&self, image_ref: &str) -> Result<Option<String>>;
}

/// Outbound delivery of a JSON body to the sink
#[async_trait]
pub trait SinkClientPort: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<SinkResponse>;
}

#[derive(Clone, Debug)]
pub struct SinkResponse {
    pub status: u16,
    pub body: String,
}
