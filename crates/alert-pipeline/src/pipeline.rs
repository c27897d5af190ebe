//! One alert in, one finished card and caption out.

use std::sync::Arc;

use alert_common::{Alert, AlertError, AlertResult, DisplayZone, RenderedAlert};
use bytes::Bytes;
use image::RgbaImage;
use renderer::{CompositeRenderer, RenderInputs};
use tracing::{info, instrument, Span};

use crate::backdrop::{BackdropProvider, StaticMapClient};
use crate::caption::build_caption;
use crate::config::PipelineConfig;
use crate::logo::LogoStore;

/// Renders alerts into cards.
///
/// Cheap to clone and holds no per-alert state: concurrent renders share the
/// compositor, backdrop provider and logo cache.
#[derive(Clone)]
pub struct RenderPipeline {
    renderer: Arc<CompositeRenderer>,
    backdrop: Arc<dyn BackdropProvider>,
    logo: Arc<LogoStore>,
}

impl RenderPipeline {
    pub fn new(
        renderer: CompositeRenderer,
        backdrop: Arc<dyn BackdropProvider>,
        logo: LogoStore,
    ) -> Self {
        Self {
            renderer: Arc::new(renderer),
            backdrop,
            logo: Arc::new(logo),
        }
    }

    /// Pipeline backed by the static-map HTTP client and a logo file.
    pub fn from_config(config: &PipelineConfig) -> AlertResult<Self> {
        let renderer = CompositeRenderer::new(config.render.clone(), config.display_zone)?;
        let backdrop = StaticMapClient::new(config.backdrop.clone())?;
        Ok(Self::new(
            renderer,
            Arc::new(backdrop),
            LogoStore::new(&config.logo_path),
        ))
    }

    pub fn zone(&self) -> DisplayZone {
        self.renderer.zone()
    }

    /// Render one alert.
    ///
    /// Fails when the backdrop or logo cannot be obtained, or the card cannot
    /// be encoded. Missing hazard fields never fail a render.
    #[instrument(
        skip(self, alert),
        fields(alert_id = %alert.id, event = %alert.event, zoom = tracing::field::Empty)
    )]
    pub async fn render(&self, alert: &Alert) -> AlertResult<RenderedAlert> {
        let viewport = projection::project_ring(&alert.geometry);
        let threats = threat_parser::extract_threats(&alert.description, &alert.event);
        Span::current().record("zoom", viewport.zoom);

        let (map_width, map_height) = self.renderer.config().map_size();
        let backdrop = self.backdrop.fetch(&viewport, map_width, map_height).await?;
        let logo = self.logo.get().await?;

        // Decoding and compositing are CPU-bound; keep them off the runtime.
        let renderer = Arc::clone(&self.renderer);
        let owned = alert.clone();
        let png = tokio::task::spawn_blocking(move || -> AlertResult<Vec<u8>> {
            let backdrop = decode_backdrop(&backdrop)?;
            renderer.render_png(&RenderInputs {
                alert: &owned,
                viewport: &viewport,
                threats: &threats,
                backdrop: &backdrop,
                logo: &logo,
            })
        })
        .await
        .map_err(|e| AlertError::EncodingFailed(format!("render task failed: {}", e)))??;

        let config = self.renderer.config();
        let rendered = RenderedAlert {
            alert_id: alert.id.clone(),
            event: alert.event.clone(),
            png,
            width: config.width,
            height: config.height,
            caption: build_caption(alert, &self.renderer.zone()),
        };

        info!(bytes = rendered.png.len(), "Rendered alert");
        Ok(rendered)
    }
}

fn decode_backdrop(bytes: &Bytes) -> AlertResult<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| AlertError::BackdropFetchFailed(format!("undecodable backdrop: {}", e)))
}
