//! Severe-weather alert watcher.
//!
//! Polls the NWS active-alerts feed and, for every new warning from the
//! configured office:
//! - Projects the warning polygon onto a static-map backdrop
//! - Extracts hazard levels from the alert narrative
//! - Composites an 800x600 card and a one-line caption
//! - Writes both to the output directory

mod config;
mod dedup;
mod feed;
mod publish;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use alert_pipeline::RenderPipeline;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::WatcherConfig;
use feed::FeedClient;
use publish::FilePublisher;
use scheduler::Watcher;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Parser, Debug)]
#[command(name = "alert-watcher")]
#[command(about = "Renders new NWS warnings into shareable alert cards")]
struct Args {
    /// Configuration file
    #[arg(long, env = "ALERT_WATCHER_CONFIG", default_value = "config/alert-watcher.yaml")]
    config: PathBuf,

    /// Run one poll cycle and exit (vs continuous polling)
    #[arg(long)]
    once: bool,

    /// Directory for finished cards (overrides the config file)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Static-map access token (overrides the config file)
    #[arg(long, env = "MAPBOX_TOKEN", hide_env_values = true)]
    mapbox_token: Option<String>,

    /// Maximum concurrent renders (overrides the config file)
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "json")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    info!("Starting alert watcher");

    let mut config = WatcherConfig::load(&args.config)?;
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(token) = &args.mapbox_token {
        config.pipeline.backdrop.access_token = token.clone();
    }
    if let Some(n) = args.max_concurrent {
        config.schedule.max_concurrent = n;
    }

    let pipeline = RenderPipeline::from_config(&config.pipeline)
        .context("Failed to build render pipeline")?;
    let source = FeedClient::new(config.feed.clone())?;
    let publisher = FilePublisher::new(config.output.dir.clone());

    info!(
        feed = %config.feed.url,
        office = %config.feed.sender_filter,
        output_dir = %config.output.dir.display(),
        zone = %pipeline.zone().tz(),
        "Watcher configured"
    );

    let watcher = Watcher::new(
        Arc::new(source),
        pipeline,
        Arc::new(publisher),
        config.schedule.clone(),
        &config.dedup,
    );

    if args.once {
        info!("Running single poll cycle");
        let stats = watcher.run_once().await?;
        info!(
            fetched = stats.fetched,
            published = stats.published,
            failed = stats.failed,
            "Single cycle complete"
        );
    } else {
        info!(
            interval_secs = config.schedule.poll_interval().as_secs(),
            "Starting continuous polling"
        );

        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        // Handle Ctrl+C
        let shutdown_tx_clone = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
            shutdown_tx_clone.send(()).ok();
        });

        watcher.run_forever(shutdown_tx.subscribe()).await?;
    }

    info!(remembered = watcher.seen_count().await, "Alert watcher stopped");
    Ok(())
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    match args.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
