//! Hand-off of rendered cards to their destination.

use std::path::{Path, PathBuf};

use alert_common::RenderedAlert;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{info, instrument};

/// Destination for finished cards.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one card and return where it went.
    async fn publish(&self, rendered: &RenderedAlert) -> Result<PathBuf>;
}

/// Writes `{stem}.png` and `{stem}.txt` (the caption) into a directory.
///
/// Both files are written under a temporary name and renamed into place,
/// so a reader watching the directory never sees a partial card.
pub struct FilePublisher {
    dir: PathBuf,
}

impl FilePublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stage both files, then move the caption and the card into place.
    ///
    /// On failure nothing is left behind: staged files are removed, and a
    /// caption already moved into place is removed again if the card cannot
    /// follow it.
    async fn publish_at(&self, rendered: &RenderedAlert, now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Creating output directory {}", self.dir.display()))?;

        let stem = output_stem(rendered, now);
        let png_path = self.dir.join(format!("{}.png", stem));
        let caption_path = self.dir.join(format!("{}.txt", stem));

        let caption_tmp = stage(&caption_path, rendered.caption.as_bytes()).await?;
        let png_tmp = match stage(&png_path, &rendered.png).await {
            Ok(tmp) => tmp,
            Err(e) => {
                fs::remove_file(&caption_tmp).await.ok();
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&caption_tmp, &caption_path).await {
            fs::remove_file(&caption_tmp).await.ok();
            fs::remove_file(&png_tmp).await.ok();
            return Err(e).with_context(|| format!("Moving {} into place", caption_path.display()));
        }
        if let Err(e) = fs::rename(&png_tmp, &png_path).await {
            fs::remove_file(&png_tmp).await.ok();
            fs::remove_file(&caption_path).await.ok();
            return Err(e).with_context(|| format!("Moving {} into place", png_path.display()));
        }

        info!(
            path = %png_path.display(),
            bytes = rendered.png.len(),
            "Published alert card"
        );
        Ok(png_path)
    }
}

#[async_trait]
impl Publisher for FilePublisher {
    #[instrument(skip(self, rendered), fields(alert_id = %rendered.alert_id))]
    async fn publish(&self, rendered: &RenderedAlert) -> Result<PathBuf> {
        self.publish_at(rendered, Utc::now()).await
    }
}

/// Write `contents` next to `path` under a `.part` name.
async fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = fs::write(&tmp, contents).await {
        fs::remove_file(&tmp).await.ok();
        return Err(e).with_context(|| format!("Writing {}", tmp.display()));
    }
    Ok(tmp)
}

/// File stem for a card: `{event}_{timestamp}_{id suffix}`.
///
/// e.g. `tornado-warning_20250331T184500Z_a1b2c3d4`.
pub fn output_stem(rendered: &RenderedAlert, now: DateTime<Utc>) -> String {
    let event = slug(&rendered.event.to_string());

    let alnum: Vec<char> = rendered
        .alert_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let suffix: String = alnum[alnum.len().saturating_sub(8)..]
        .iter()
        .collect::<String>()
        .to_ascii_lowercase();

    let suffix = if suffix.is_empty() { "alert".to_string() } else { suffix };
    format!("{}_{}_{}", event, now.format("%Y%m%dT%H%M%SZ"), suffix)
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "alert".to_string()
    } else {
        trimmed.to_string()
    }
}
