//! Poll loop: fetch, drop already-published alerts, render, publish.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use alert_common::{Alert, AlertError};
use alert_pipeline::RenderPipeline;
use anyhow::{anyhow, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::{broadcast, Mutex};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument, warn};

use crate::config::{DedupConfig, ScheduleConfig};
use crate::dedup::SeenAlerts;
use crate::feed::AlertSource;
use crate::publish::Publisher;

/// Counts for one poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub fetched: usize,
    pub new: usize,
    pub published: usize,
    pub failed: usize,
}

pub struct Watcher {
    source: Arc<dyn AlertSource>,
    pipeline: RenderPipeline,
    publisher: Arc<dyn Publisher>,
    seen: Mutex<SeenAlerts>,
    schedule: ScheduleConfig,
}

impl Watcher {
    pub fn new(
        source: Arc<dyn AlertSource>,
        pipeline: RenderPipeline,
        publisher: Arc<dyn Publisher>,
        schedule: ScheduleConfig,
        dedup: &DedupConfig,
    ) -> Self {
        let window = chrono::Duration::seconds(dedup.window_secs.min(i64::MAX as u64) as i64);
        Self {
            source,
            pipeline,
            publisher,
            seen: Mutex::new(SeenAlerts::new(window, dedup.capacity)),
            schedule,
        }
    }

    /// Run a single poll cycle.
    ///
    /// Only a feed failure is an error; per-alert failures are counted and
    /// logged, and those alerts are tried again next cycle.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<CycleStats> {
        let alerts = self.source.fetch_alerts().await?;
        let mut stats = CycleStats {
            fetched: alerts.len(),
            ..CycleStats::default()
        };

        let fresh = self.unseen(alerts).await;
        stats.new = fresh.len();
        if fresh.is_empty() {
            info!(fetched = stats.fetched, "No new alerts");
            return Ok(stats);
        }

        let results = stream::iter(fresh)
            .map(|alert| async move {
                let outcome = self.process(&alert).await;
                (alert, outcome)
            })
            .buffer_unordered(self.schedule.max_concurrent.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut seen = self.seen.lock().await;
        for (alert, outcome) in results {
            match outcome {
                Ok(path) => {
                    seen.insert(&alert.id, Utc::now());
                    stats.published += 1;
                    info!(alert_id = %alert.id, path = %path.display(), "Alert published");
                }
                Err(e) => {
                    stats.failed += 1;
                    log_failure(&alert, &e);
                }
            }
        }
        drop(seen);

        info!(
            fetched = stats.fetched,
            new = stats.new,
            published = stats.published,
            failed = stats.failed,
            "Poll cycle complete"
        );
        Ok(stats)
    }

    /// Poll until a shutdown signal arrives.
    pub async fn run_forever(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.schedule.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down watcher");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        error!(error = %e, "Poll cycle failed");
                    }
                }
            }
        }

        Ok(())
    }

    pub async fn seen_count(&self) -> usize {
        self.seen.lock().await.len()
    }

    /// Alerts not yet published, first occurrence of each id only.
    async fn unseen(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        let now = Utc::now();
        let mut seen = self.seen.lock().await;
        seen.prune(now);

        let mut batch = HashSet::new();
        alerts
            .into_iter()
            .filter(|alert| !seen.contains(&alert.id, now) && batch.insert(alert.id.clone()))
            .collect()
    }

    async fn process(&self, alert: &Alert) -> Result<PathBuf> {
        let timeout = self.schedule.render_timeout();
        let rendered = tokio::time::timeout(timeout, self.pipeline.render(alert))
            .await
            .map_err(|_| anyhow!("render timed out after {}s", timeout.as_secs()))??;

        self.publisher.publish(&rendered).await
    }
}

fn log_failure(alert: &Alert, e: &anyhow::Error) {
    match e.downcast_ref::<AlertError>() {
        Some(render_error) => warn!(
            alert_id = %alert.id,
            kind = render_error.kind(),
            retryable = render_error.is_retryable(),
            error = %render_error,
            "Alert render failed"
        ),
        None => warn!(alert_id = %alert.id, error = %e, "Alert not published"),
    }
}
