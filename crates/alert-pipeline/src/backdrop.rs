//! Map backdrop from a static-map tile provider.

use std::time::Duration;

use alert_common::{AlertError, AlertResult, ViewportSpec};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Source of the map raster drawn under the alert card.
#[async_trait]
pub trait BackdropProvider: Send + Sync {
    /// Fetch an encoded raster of `width` x `height` pixels for the viewport.
    async fn fetch(&self, viewport: &ViewportSpec, width: u32, height: u32) -> AlertResult<Bytes>;
}

/// Static-map provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub base_url: String,
    /// Map style as `owner/style`.
    pub style: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Path overlay stroke width in pixels.
    pub path_width: u32,
    /// Path overlay color as six hex digits, no `#`.
    pub path_color: String,
    pub path_opacity: f32,
    pub request_timeout_secs: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            style: "mapbox/light-v10".to_string(),
            access_token: String::new(),
            path_width: 5,
            path_color: "ff0000".to_string(),
            path_opacity: 0.8,
            request_timeout_secs: 30,
        }
    }
}

impl BackdropConfig {
    /// Build the static-image URL for a viewport.
    ///
    /// The polygon is drawn as a path overlay; rings too short to draw are
    /// requested without one.
    pub fn static_map_url(
        &self,
        viewport: &ViewportSpec,
        width: u32,
        height: u32,
    ) -> AlertResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AlertError::Config(format!("invalid backdrop base url: {}", e)))?;

        let position = format!(
            "{:.5},{:.5},{}",
            viewport.center_lng, viewport.center_lat, viewport.zoom
        );
        let size = format!("{}x{}", width, height);

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AlertError::Config(format!("backdrop base url cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(["styles", "v1"]);
            segments.extend(self.style.split('/').filter(|s| !s.is_empty()));
            segments.push("static");
            if viewport.has_path() {
                segments.push(&format!(
                    "path-{}+{}-{}({})",
                    self.path_width, self.path_color, self.path_opacity, viewport.encoded_path
                ));
            }
            segments.push(&position);
            segments.push(&size);
        }

        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

/// HTTP client for a Mapbox-style static images API.
pub struct StaticMapClient {
    client: Client,
    config: BackdropConfig,
}

impl StaticMapClient {
    pub fn new(config: BackdropConfig) -> AlertResult<Self> {
        if config.access_token.trim().is_empty() {
            return Err(AlertError::Config(
                "backdrop access token is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AlertError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }
}

#[async_trait]
impl BackdropProvider for StaticMapClient {
    #[instrument(skip(self, viewport), fields(zoom = viewport.zoom))]
    async fn fetch(&self, viewport: &ViewportSpec, width: u32, height: u32) -> AlertResult<Bytes> {
        let url = self.config.static_map_url(viewport, width, height)?;

        // The query string carries the token; log only the path.
        debug!(path = %url.path(), "Requesting backdrop");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AlertError::BackdropFetchFailed(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::BackdropFetchFailed(format!(
                "tile provider returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AlertError::BackdropFetchFailed(format!("reading body: {}", e.without_url())))?;

        info!(bytes = bytes.len(), "Fetched backdrop");
        Ok(bytes)
    }
}
