use crate::app::ports::{SinkClientPort, SinkResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// Sink client backed by a shared reqwest client with a request timeout
pub struct ReqwestSinkClient {
    client: reqwest::Client,
}

impl ReqwestSinkClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SinkClientPort for ReqwestSinkClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<SinkResponse> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        // The body is only used for logging failures
        let body = resp.text().await.unwrap_or_default();
        Ok(SinkResponse { status, body })
    }
}
