//! Counters for the scrape pipeline.
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these freely. The CLI installs a Prometheus recorder and
//! renders a snapshot at the end of a run.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

pub const POSTS_CLASSIFIED: &str = "fb_scraper_posts_classified_total";
pub const POST_ERRORS: &str = "fb_scraper_post_errors_total";
pub const FLYER_IMAGES: &str = "fb_scraper_flyer_images_total";
pub const DELIVERIES: &str = "fb_scraper_deliveries_total";
pub const PAGE_ERRORS: &str = "fb_scraper_page_errors_total";

/// Install the global Prometheus recorder. Returns `None` if a recorder is
/// already installed.
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install metrics recorder: {}", e);
            None
        }
    }
}

pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_classification(is_event: bool) {
        let outcome = if is_event { "event" } else { "skipped" };
        ::metrics::counter!(POSTS_CLASSIFIED, "outcome" => outcome).increment(1);
    }

    pub fn record_post_error() {
        ::metrics::counter!(POST_ERRORS).increment(1);
    }

    /// `outcome` is one of "parsed", "no_fields", "no_text", "failed", "timeout"
    pub fn record_flyer_image(outcome: &'static str) {
        ::metrics::counter!(FLYER_IMAGES, "outcome" => outcome).increment(1);
    }

    pub fn record_delivery(delivered: bool) {
        let outcome = if delivered { "delivered" } else { "failed" };
        ::metrics::counter!(DELIVERIES, "outcome" => outcome).increment(1);
    }

    pub fn record_page_error() {
        ::metrics::counter!(PAGE_ERRORS).increment(1);
    }
}
