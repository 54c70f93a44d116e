use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use fb_event_scraper::config::{Config, RunSettings};
use fb_event_scraper::constants::DEFAULT_SETTINGS_PATH;
use fb_event_scraper::dispatcher::Dispatcher;
use fb_event_scraper::extraction::parse_flyer_text;
use fb_event_scraper::infra::{HttpImageText, JsonSnapshotSource, ReqwestSinkClient};
use fb_event_scraper::pipeline::Pipeline;
use fb_event_scraper::record::EventRecordBuilder;
use fb_event_scraper::types::ArtistConfig;
use fb_event_scraper::{logging, metrics};

#[derive(Parser)]
#[command(name = "fb_event_scraper")]
#[command(about = "Turns artist page posts and flyers into event records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Run settings file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every configured artist page from a post snapshot and deliver events
    Run {
        /// JSON snapshot mapping page id to its posts
        #[arg(long)]
        posts: PathBuf,
        /// Write the run summary as JSON to this path
        #[arg(long)]
        summary_out: Option<PathBuf>,
        /// Write a Prometheus text snapshot of the run counters to this path
        #[arg(long)]
        metrics_out: Option<PathBuf>,
    },
    /// Check whether a caption would pass the event gate
    Classify {
        #[arg(long)]
        text: String,
    },
    /// Show the fields extracted from a piece of flyer text
    Extract {
        #[arg(long)]
        text: String,
    },
    /// Build the record a post would produce, without sending it
    Preview {
        /// Artist display name
        #[arg(long)]
        artist: String,
        #[arg(long, default_value_t = 0)]
        category_id: i64,
        #[arg(long, default_value = "")]
        post: String,
        #[arg(long, default_value = "")]
        flyer: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let settings = RunSettings::load_or_default(&cli.settings);
    let config = Arc::new(Config::from_env(settings));

    match cli.command {
        Commands::Run {
            posts,
            summary_out,
            metrics_out,
        } => {
            let metrics_handle = metrics_out.as_ref().and_then(|_| metrics::install_recorder());

            println!("🕷️  Scraping {} artist pages...", config.artists.len());
            let source = JsonSnapshotSource::load(&posts).await?;
            let image_text = HttpImageText::new(config.ocr_url.clone(), config.settings.flyer_timeout())?;
            let sink = ReqwestSinkClient::new(config.settings.delivery_timeout())?;
            let dispatcher = Dispatcher::new(Arc::new(sink), config.sink_url.clone(), config.settings.delivery_timeout());

            let pipeline = Pipeline::new(config.clone(), Arc::new(source), Arc::new(image_text), dispatcher);
            let summary = pipeline.run().await;

            println!("\n📊 Run {}:", summary.run_id);
            for page in &summary.pages {
                match &page.error {
                    Some(e) => println!("   {} ❌ {}", page.artist, e),
                    None => println!(
                        "   {}: {} events ({} delivered), {} skipped, {} errors",
                        page.artist, page.events_found, page.delivered, page.not_events, page.post_errors
                    ),
                }
            }
            println!("   Total events: {}", summary.total_events);

            if let Some(path) = summary_out {
                tokio::fs::write(&path, serde_json::to_string_pretty(&summary)?).await?;
                info!("Wrote run summary to {}", path.display());
            }
            if let (Some(path), Some(handle)) = (metrics_out, metrics_handle) {
                if let Err(e) = tokio::fs::write(&path, handle.render()).await {
                    error!("Failed to write metrics snapshot to {}: {}", path.display(), e);
                }
            }
        }
        Commands::Classify { text } => {
            let signals = config.classifier().signals(Some(text.as_str()));
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                "is_event": signals.any(),
                "signals": signals,
            }))?);
        }
        Commands::Extract { text } => {
            let fields = parse_flyer_text(&text, &config.extractor(), &config.venues);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Commands::Preview {
            artist,
            category_id,
            post,
            flyer,
        } => {
            let artist = ArtistConfig::new("", artist, category_id);
            let fields = parse_flyer_text(&flyer, &config.extractor(), &config.venues);
            let record = EventRecordBuilder::build(&artist, &post, &flyer, fields);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
