use crate::app::ports::{ImageTextPort, PostSourcePort};
use crate::config::Config;
use crate::constants::FLYER_IMAGE_MARKER;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, ScraperError};
use crate::extraction::{parse_flyer_text, ExtractedFields};
use crate::metrics::PipelineMetrics;
use crate::record::EventRecordBuilder;
use crate::types::{ArtistConfig, RawPost, RawPostEntry, ScrapedPost};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// What happened to a single post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PostOutcome {
    Delivered { title: String },
    DeliveryFailed { title: String },
    /// Caption did not pass the event gate
    NotAnEvent,
    Failed { reason: String },
}

/// Per-page counters. `error` is set when the page itself could not be
/// scraped, in which case every counter is zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageReport {
    pub page_id: String,
    pub artist: String,
    pub posts_seen: usize,
    pub events_found: usize,
    pub delivered: usize,
    pub delivery_failures: usize,
    pub not_events: usize,
    pub post_errors: usize,
    pub error: Option<String>,
}

impl PageReport {
    fn new(artist: &ArtistConfig) -> Self {
        Self {
            page_id: artist.page_id.clone(),
            artist: artist.name.clone(),
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: &PostOutcome) {
        self.posts_seen += 1;
        match outcome {
            PostOutcome::Delivered { .. } => {
                self.events_found += 1;
                self.delivered += 1;
            }
            PostOutcome::DeliveryFailed { .. } => {
                self.events_found += 1;
                self.delivery_failures += 1;
            }
            PostOutcome::NotAnEvent => self.not_events += 1,
            PostOutcome::Failed { .. } => self.post_errors += 1,
        }
    }
}

/// Result of a complete run over every configured page
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_events: usize,
    pub total_delivered: usize,
    pub failed_pages: usize,
    pub pages: Vec<PageReport>,
}

impl RunSummary {
    /// Totals are computed once from the page reports
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, pages: Vec<PageReport>) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            total_events: pages.iter().map(|p| p.events_found).sum(),
            total_delivered: pages.iter().map(|p| p.delivered).sum(),
            failed_pages: pages.iter().filter(|p| p.error.is_some()).count(),
            pages,
        }
    }
}

/// Drives caption → gate → flyer → fields → record → sink for every post of
/// every configured artist page.
pub struct Pipeline {
    config: Arc<Config>,
    posts: Arc<dyn PostSourcePort>,
    image_text: Arc<dyn ImageTextPort>,
    dispatcher: Dispatcher,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        posts: Arc<dyn PostSourcePort>,
        image_text: Arc<dyn ImageTextPort>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            posts,
            image_text,
            dispatcher,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> RunSummary {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "Starting scrape of {} artist pages", self.config.artists.len());

        let mut pages = Vec::with_capacity(self.config.artists.len());
        let interval = self.config.settings.page_interval();
        for (i, artist) in self.config.artists.iter().enumerate() {
            pages.push(self.scrape_page(artist).await);
            // Courtesy pause between page visits
            if i + 1 < self.config.artists.len() && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }

        let summary = RunSummary::new(run_id, started_at, pages);
        info!(
            "Scraping completed. Total events found: {} ({} delivered, {} pages failed)",
            summary.total_events, summary.total_delivered, summary.failed_pages
        );
        summary
    }

    #[instrument(skip(self, artist), fields(artist = %artist.name, page = %artist.page_id))]
    pub async fn scrape_page(&self, artist: &ArtistConfig) -> PageReport {
        let mut report = PageReport::new(artist);
        info!("Scraping {} page: {}", artist.name, artist.page_id);

        let entries = match self.posts.fetch_posts(&artist.page_id).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error scraping {} page: {}", artist.name, e);
                PipelineMetrics::record_page_error();
                report.error = Some(e.to_string());
                return report;
            }
        };

        for (i, entry) in entries.iter().take(self.config.settings.max_posts_per_page).enumerate() {
            let outcome = self.process_post(artist, entry).await;
            if let PostOutcome::Failed { reason } = &outcome {
                error!("Error processing post {}: {}", i, reason);
            }
            report.record(&outcome);
        }

        info!("Found {} events for {}", report.events_found, artist.name);
        report
    }

    pub async fn process_post(&self, artist: &ArtistConfig, entry: &RawPostEntry) -> PostOutcome {
        let post = match ScrapedPost::from_raw(entry) {
            Ok(post) => post,
            Err(e) => {
                PipelineMetrics::record_post_error();
                return PostOutcome::Failed { reason: e.to_string() };
            }
        };

        let is_event = self.config.classifier().is_event(Some(post.caption.as_str()));
        PipelineMetrics::record_classification(is_event);
        if !is_event {
            debug!("Post is not event-related, skipping");
            return PostOutcome::NotAnEvent;
        }
        info!("Found potential event post: {}", excerpt(&post.caption, 100));

        // Structured fields come from the flyer only, never the caption
        let (fields, flyer_text) = self.acquire_flyer(&post.image_refs).await;
        let raw = RawPost {
            caption_text: post.caption,
            flyer_text,
        };
        let record = EventRecordBuilder::from_raw_post(artist, raw, fields);

        if self.dispatcher.send(&record).await {
            PostOutcome::Delivered { title: record.title }
        } else {
            PostOutcome::DeliveryFailed { title: record.title }
        }
    }

    /// First CDN image whose text yields any field wins. Images that fail,
    /// time out, carry no text or yield nothing are skipped.
    pub async fn acquire_flyer(&self, image_refs: &[String]) -> (ExtractedFields, String) {
        for image_ref in image_refs.iter().filter(|r| r.contains(FLYER_IMAGE_MARKER)) {
            let text = match self.read_image(image_ref).await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    PipelineMetrics::record_flyer_image("no_text");
                    continue;
                }
                Err(e) => {
                    warn!("Error extracting text from image: {}", e);
                    let outcome = if matches!(e, ScraperError::Timeout { .. }) { "timeout" } else { "failed" };
                    PipelineMetrics::record_flyer_image(outcome);
                    continue;
                }
            };
            info!("Extracted text: {}", excerpt(&text, 200));

            let fields = parse_flyer_text(&text, &self.config.extractor(), &self.config.venues);
            if fields.is_empty() {
                PipelineMetrics::record_flyer_image("no_fields");
                continue;
            }
            PipelineMetrics::record_flyer_image("parsed");
            info!(?fields, "Found event details in flyer");
            return (fields, text);
        }
        (ExtractedFields::default(), String::new())
    }

    async fn read_image(&self, image_ref: &str) -> Result<Option<String>> {
        let timeout = self.config.settings.flyer_timeout();
        match tokio::time::timeout(timeout, self.image_text.extract_text(image_ref)).await {
            Ok(result) => Ok(result?.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())),
            Err(_) => Err(ScraperError::Timeout {
                operation: "flyer text extraction",
                secs: timeout.as_secs(),
            }),
        }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("café au lait", 4), "café...");
    }

    #[test]
    fn report_counts_each_outcome() {
        let mut report = PageReport::new(&ArtistConfig::new("p", "A", 1));
        report.record(&PostOutcome::Delivered { title: "t".into() });
        report.record(&PostOutcome::DeliveryFailed { title: "t".into() });
        report.record(&PostOutcome::NotAnEvent);
        report.record(&PostOutcome::Failed { reason: "bad".into() });
        assert_eq!(report.posts_seen, 4);
        assert_eq!(report.events_found, 2);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.delivery_failures, 1);
        assert_eq!(report.not_events, 1);
        assert_eq!(report.post_errors, 1);
    }

    #[test]
    fn summary_serializes_totals() {
        let mut ok = PageReport::new(&ArtistConfig::new("p1", "A", 1));
        ok.record(&PostOutcome::Delivered { title: "t".into() });
        ok.record(&PostOutcome::DeliveryFailed { title: "t".into() });
        let failed = PageReport {
            error: Some("navigation timed out".into()),
            ..PageReport::new(&ArtistConfig::new("p2", "B", 2))
        };

        let summary = RunSummary::new(Uuid::new_v4(), Utc::now(), vec![ok, failed]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_events"], 2);
        assert_eq!(value["total_delivered"], 1);
        assert_eq!(value["failed_pages"], 1);
        assert_eq!(value["pages"].as_array().map(Vec::len), Some(2));
    }
}
