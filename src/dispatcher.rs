use crate::app::ports::SinkClientPort;
use crate::constants::SINK_SUCCESS_STATUS;
use crate::metrics::PipelineMetrics;
use crate::record::EventRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

/// At-most-once delivery of event records to the sink. Failures are logged
/// and reported as `false`; nothing is retried or queued.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn SinkClientPort>,
    sink_url: String,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SinkClientPort>, sink_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            sink_url: sink_url.into(),
            timeout,
        }
    }

    pub fn sink_url(&self) -> &str {
        &self.sink_url
    }

    #[instrument(skip(self, record), fields(title = %record.title))]
    pub async fn send(&self, record: &EventRecord) -> bool {
        let delivered = self.try_send(record).await;
        PipelineMetrics::record_delivery(delivered);
        delivered
    }

    async fn try_send(&self, record: &EventRecord) -> bool {
        info!("Sending event to webhook: {}", record.title);

        let body = match serde_json::to_value(record) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize event record: {}", e);
                return false;
            }
        };

        let response = match tokio::time::timeout(self.timeout, self.client.post_json(&self.sink_url, &body)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("Error sending to webhook: {}", e);
                return false;
            }
            Err(_) => {
                error!("Webhook request timed out after {}s", self.timeout.as_secs_f64());
                return false;
            }
        };

        if response.status == SINK_SUCCESS_STATUS {
            info!("Successfully sent event: {}", record.title);
            true
        } else {
            error!("Webhook error {}: {}", response.status, response.body);
            false
        }
    }
}
