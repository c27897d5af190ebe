//! Layered composition of the alert card.
//!
//! Layers are drawn in a fixed order, later ones over earlier ones:
//! banner, map backdrop, county footer, sidebar panel, sidebar content
//! (sender, time badges, narrative), hazard badge grid, logo.
//!
//! The sidebar content is laid out top to bottom. Each step takes the
//! current vertical cursor and returns the cursor for the next step.

use alert_common::{Alert, AlertResult, DisplayZone, ThreatSummary, ViewportSpec};
use image::RgbaImage;
use tracing::debug;

use crate::canvas::{Canvas, Rect};
use crate::fonts::FontSet;
use crate::layout::{layout_block, lines_fitting, Align, TextBlock, TextFrame};
use crate::png;
use crate::style::{GradientPair, RenderConfig, TextStyle};

/// Baseline of the banner title, from the top of the canvas.
const BANNER_BASELINE: f32 = 33.0;

/// Offset from the banner bottom to the sender line baseline.
const SENDER_OFFSET: f32 = 20.0;

/// Gap between the sender block and the first time badge.
const SENDER_GAP: f32 = 14.0;

/// Offset from the last time badge to the first narrative baseline.
const NARRATIVE_OFFSET: f32 = 20.0;

/// Footer county list is cut after this many lines.
const FOOTER_MAX_LINES: usize = 2;

const HAZARD_VALUE_MAX_LINES: usize = 2;

/// Everything one card is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct RenderInputs<'a> {
    pub alert: &'a Alert,
    pub viewport: &'a ViewportSpec,
    pub threats: &'a ThreatSummary,
    /// Map raster; scaled to the map area when its size differs.
    pub backdrop: &'a RgbaImage,
    pub logo: &'a RgbaImage,
}

/// Draws alert cards for one configuration.
///
/// Holds no per-render state, so one instance can serve concurrent renders.
#[derive(Debug, Clone)]
pub struct CompositeRenderer {
    config: RenderConfig,
    fonts: FontSet,
    zone: DisplayZone,
}

impl CompositeRenderer {
    pub fn new(config: RenderConfig, zone: DisplayZone) -> AlertResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fonts: FontSet::embedded()?,
            zone,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Compose the card and encode it as PNG.
    pub fn render_png(&self, inputs: &RenderInputs<'_>) -> AlertResult<Vec<u8>> {
        let image = self.render(inputs);
        let bytes = png::encode_image(&image)?;
        debug!(
            alert_id = %inputs.alert.id,
            bytes = bytes.len(),
            "encoded alert card"
        );
        Ok(bytes)
    }

    /// Compose the card.
    pub fn render(&self, inputs: &RenderInputs<'_>) -> RgbaImage {
        let cfg = &self.config;
        let mut canvas = Canvas::new(cfg.width, cfg.height, cfg.colors.background);

        self.draw_banner(&mut canvas, inputs.alert);
        self.draw_map(&mut canvas, inputs.backdrop);
        self.draw_footer(&mut canvas, inputs.alert);
        canvas.fill_rect(cfg.sidebar_rect(), cfg.colors.sidebar);

        let mut cursor = cfg.banner_height as f32 + SENDER_OFFSET;
        cursor = self.draw_sender(&mut canvas, inputs.alert, cursor);
        cursor = self.draw_time_badge(
            &mut canvas,
            cursor,
            "IN EFFECT:",
            &self.zone.badge_timestamp(&inputs.alert.effective),
            cfg.colors.in_effect_badge,
        );
        cursor = self.draw_time_badge(
            &mut canvas,
            cursor,
            "EXPIRES:",
            &self.zone.badge_timestamp(&inputs.alert.expires),
            cfg.colors.expires_badge,
        );

        let badges = inputs.alert.event.has_hazard_badges();
        let content_bottom = if badges {
            self.hazard_grid_top() - cfg.padding as f32
        } else {
            (cfg.height - cfg.padding) as f32
        };
        self.draw_narrative(&mut canvas, inputs.alert, cursor, content_bottom);

        if badges {
            self.draw_hazard_badges(&mut canvas, inputs.alert, inputs.threats);
        }

        self.draw_logo(&mut canvas, inputs.logo);

        debug!(
            alert_id = %inputs.alert.id,
            event = %inputs.alert.event,
            zoom = inputs.viewport.zoom,
            badges,
            "composited alert card"
        );
        canvas.into_image()
    }

    fn draw_banner(&self, canvas: &mut Canvas, alert: &Alert) {
        let cfg = &self.config;
        canvas.fill_rect(cfg.banner_rect(), cfg.colors.banner);

        let title = alert.event.as_str().to_uppercase();
        let style = &cfg.text.banner;
        let width = self.measure(&title, style);
        canvas.draw_text(
            &self.fonts,
            &title,
            (cfg.width as f32 - width) / 2.0,
            BANNER_BASELINE,
            style,
            cfg.colors.text,
        );
    }

    fn draw_map(&self, canvas: &mut Canvas, backdrop: &RgbaImage) {
        let area = self.config.map_rect();
        let (width, height) = self.config.map_size();
        canvas.draw_image(backdrop, area.x as i64, area.y as i64, width, height);
    }

    fn draw_footer(&self, canvas: &mut Canvas, alert: &Alert) {
        let cfg = &self.config;
        let footer = cfg.footer_rect();
        canvas.fill_rect(footer, cfg.colors.footer);

        // Keep centered text clear of the logo on the left.
        let logo_right = (cfg.padding as f32) + self.logo_draw_width();
        let max_width = 2.0 * (footer.center_x() - logo_right - cfg.padding as f32);

        let style = &cfg.text.footer;
        let text = format!("Counties: {}", alert.area_desc);
        let mut block = self.layout(
            &text,
            footer.center_x(),
            0.0,
            max_width,
            style,
            Align::Center,
            Some(FOOTER_MAX_LINES),
        );

        // Center the block vertically on the cap height of its lines.
        let lines = block.line_count() as f32;
        let cap = self.fonts.cap_height(style.size, style.weight);
        block.offset(footer.center_y() + cap / 2.0 - (lines - 1.0) * style.line_height / 2.0);

        canvas.draw_block(&self.fonts, &block, style, cfg.colors.text);
    }

    fn draw_sender(&self, canvas: &mut Canvas, alert: &Alert, cursor: f32) -> f32 {
        let style = &self.config.text.sender;
        let block = self.layout(
            &alert.sender_name.to_uppercase(),
            self.content_x(),
            cursor,
            self.config.sidebar_content_width(),
            style,
            Align::Left,
            None,
        );
        canvas.draw_block(&self.fonts, &block, style, self.config.colors.text);
        block.next_baseline + SENDER_GAP
    }

    fn draw_time_badge(
        &self,
        canvas: &mut Canvas,
        cursor: f32,
        label: &str,
        value: &str,
        fill: GradientPair,
    ) -> f32 {
        let cfg = &self.config;
        let rect = Rect::new(
            self.content_x(),
            cursor,
            cfg.sidebar_content_width(),
            cfg.time_badge_height as f32,
        );
        canvas.fill_rounded_rect(rect, cfg.corner_radius, fill);

        self.draw_centered(canvas, label, rect.center_x(), rect.y + 15.0, &cfg.text.time_label);
        self.draw_centered(canvas, value, rect.center_x(), rect.y + 30.0, &cfg.text.time_value);

        rect.bottom()
    }

    /// Narrative lines from `cursor`, clipped so no baseline passes `bottom`.
    fn draw_narrative(
        &self,
        canvas: &mut Canvas,
        alert: &Alert,
        cursor: f32,
        bottom: f32,
    ) -> f32 {
        let style = &self.config.text.narrative;
        let first_baseline = cursor + NARRATIVE_OFFSET;
        let max_lines = lines_fitting(first_baseline, bottom, style.line_height);
        if max_lines == 0 {
            return cursor;
        }

        let block = self.layout(
            &alert.description,
            self.content_x(),
            first_baseline,
            self.config.sidebar_content_width(),
            style,
            Align::Left,
            Some(max_lines),
        );
        canvas.draw_block(&self.fonts, &block, style, self.config.colors.text);
        block.next_baseline
    }

    fn hazard_grid_top(&self) -> f32 {
        self.config
            .height
            .saturating_sub(self.config.padding)
            .saturating_sub(self.config.hazard_grid_extent()) as f32
    }

    fn draw_hazard_badges(&self, canvas: &mut Canvas, alert: &Alert, threats: &ThreatSummary) {
        let cfg = &self.config;
        let fill = if alert.event.is_tornado_related() {
            cfg.colors.tornado_badges
        } else {
            cfg.colors.thunderstorm_badges
        };

        let size = cfg.hazard_badge_size as f32;
        let step = size + cfg.hazard_badge_spacing as f32;
        let (x0, y0) = (self.content_x(), self.hazard_grid_top());

        let badges = [
            ("TORNADO", threats.tornado_display(), 0.0, 0.0),
            ("WIND", threats.wind_display(), step, 0.0),
            ("HAIL", threats.hail_display(), 0.0, step),
            ("MOTION", threats.motion_display(), step, step),
        ];
        for (label, value, dx, dy) in badges {
            let rect = Rect::new(x0 + dx, y0 + dy, size, size);
            self.draw_hazard_badge(canvas, rect, label, &value, fill);
        }
    }

    fn draw_hazard_badge(
        &self,
        canvas: &mut Canvas,
        rect: Rect,
        label: &str,
        value: &str,
        fill: GradientPair,
    ) {
        let cfg = &self.config;
        canvas.fill_rounded_rect(rect, cfg.corner_radius, fill);

        let label_baseline = rect.center_y() - 5.0;
        self.draw_centered(canvas, label, rect.center_x(), label_baseline, &cfg.text.hazard_label);

        let style = &cfg.text.hazard_value;
        let block = self.layout(
            value,
            rect.center_x(),
            rect.center_y() + 15.0,
            rect.width - 2.0 * cfg.padding as f32,
            style,
            Align::Center,
            Some(HAZARD_VALUE_MAX_LINES),
        );
        canvas.draw_block(&self.fonts, &block, style, cfg.colors.text);
    }

    fn logo_draw_width(&self) -> f32 {
        self.config.logo_width as f32 * self.config.logo_scale
    }

    fn draw_logo(&self, canvas: &mut Canvas, logo: &RgbaImage) {
        if logo.width() == 0 || logo.height() == 0 {
            return;
        }
        let cfg = &self.config;
        let footer = cfg.footer_rect();

        let width = self.logo_draw_width();
        let height = width * logo.height() as f32 / logo.width() as f32;
        let y = footer.y + (footer.height - height) / 2.0;

        canvas.draw_image(
            logo,
            cfg.padding as i64,
            y.round() as i64,
            width.round() as u32,
            height.round() as u32,
        );
    }

    fn content_x(&self) -> f32 {
        self.config.sidebar_rect().x + self.config.padding as f32
    }

    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        self.fonts.measure(text, style.size, style.weight)
    }

    fn draw_centered(
        &self,
        canvas: &mut Canvas,
        text: &str,
        center_x: f32,
        baseline: f32,
        style: &TextStyle,
    ) {
        let x = center_x - self.measure(text, style) / 2.0;
        canvas.draw_text(&self.fonts, text, x, baseline, style, self.config.colors.text);
    }

    #[allow(clippy::too_many_arguments)]
    fn layout(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        max_width: f32,
        style: &TextStyle,
        align: Align,
        max_lines: Option<usize>,
    ) -> TextBlock {
        let frame = TextFrame {
            x,
            baseline,
            max_width,
            line_height: style.line_height,
            align,
            max_lines,
        };
        layout_block(text, &frame, &|s: &str| self.measure(s, style))
    }
}
