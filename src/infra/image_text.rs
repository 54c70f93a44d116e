use crate::app::ports::ImageTextPort;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Reply shape of the OCR service
#[derive(Debug, Deserialize)]
struct OcrReply {
    #[serde(default)]
    text: Option<String>,
}

/// Downloads an image and hands its bytes to an HTTP OCR service.
pub struct HttpImageText {
    client: reqwest::Client,
    ocr_url: String,
}

impl HttpImageText {
    pub fn new(ocr_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            ocr_url: ocr_url.into(),
        })
    }

    async fn download(&self, image_ref: &str) -> Result<(Vec<u8>, String)> {
        let resp = self
            .client
            .get(image_ref)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ScraperError::ImageAcquisition {
                image_ref: truncate(image_ref),
                message: e.to_string(),
            })?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();
        Ok((bytes, content_type))
    }
}

#[async_trait]
impl ImageTextPort for HttpImageText {
    #[instrument(skip(self, image_ref), fields(image = %truncate(image_ref)))]
    async fn extract_text(&self, image_ref: &str) -> Result<Option<String>> {
        let (bytes, content_type) = self.download(image_ref).await?;
        debug!("Downloaded {} bytes", bytes.len());

        let reply: OcrReply = self
            .client
            .post(&self.ocr_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(reply
            .text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

/// Image URLs are long; keep log lines readable
fn truncate(image_ref: &str) -> String {
    image_ref.chars().take(100).collect()
}
