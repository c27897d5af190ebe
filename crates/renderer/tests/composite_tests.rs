//! Tests for alert card composition.
//!
//! Pixel checks avoid text so they do not depend on glyph rasterization.

use alert_common::{Alert, DisplayZone};
use image::{Rgba, RgbaImage};
use renderer::{CompositeRenderer, RenderConfig, RenderInputs};
use test_utils::{degenerate_alert, sample_other_alert, sample_severe_alert, sample_tornado_alert};

const MAP_GREEN: [u8; 4] = [10, 200, 10, 255];

// ============================================================================
// Helper functions
// ============================================================================

fn renderer() -> CompositeRenderer {
    CompositeRenderer::new(RenderConfig::default(), DisplayZone::default()).unwrap()
}

fn logo() -> RgbaImage {
    image::load_from_memory(&test_utils::logo_png()).unwrap().to_rgba8()
}

fn render(alert: &Alert, backdrop: &RgbaImage) -> RgbaImage {
    let viewport = projection::project_ring(&alert.geometry);
    let threats = threat_parser::extract_threats(&alert.description, &alert.event);
    let logo = logo();
    renderer().render(&RenderInputs {
        alert,
        viewport: &viewport,
        threats: &threats,
        backdrop,
        logo: &logo,
    })
}

fn green_backdrop() -> RgbaImage {
    RgbaImage::from_pixel(550, 540, Rgba(MAP_GREEN))
}

// ============================================================================
// Output shape and determinism
// ============================================================================

#[test]
fn test_render_dimensions() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    assert_eq!(image.dimensions(), (800, 600));
    assert!(image.pixels().all(|p| p[3] == 255), "card must be opaque");
}

#[test]
fn test_render_png_is_deterministic() {
    let alert = sample_tornado_alert();
    let viewport = projection::project_ring(&alert.geometry);
    let threats = threat_parser::extract_threats(&alert.description, &alert.event);
    let backdrop = image::load_from_memory(&test_utils::backdrop_png(550, 540))
        .unwrap()
        .to_rgba8();
    let logo = logo();
    let inputs = RenderInputs {
        alert: &alert,
        viewport: &viewport,
        threats: &threats,
        backdrop: &backdrop,
        logo: &logo,
    };

    let first = renderer().render_png(&inputs).unwrap();
    let second = renderer().render_png(&inputs).unwrap();
    assert_eq!(first, second);

    let decoded = image::load_from_memory(&first).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 600));
}

#[test]
fn test_degenerate_ring_still_renders() {
    let image = render(&degenerate_alert(), &green_backdrop());
    assert_eq!(image.dimensions(), (800, 600));
}

// ============================================================================
// Layer placement
// ============================================================================

#[test]
fn test_banner_gradient_starts_red() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    let px = image.get_pixel(3, 3);
    assert!(px[0] > 180 && px[1] < 80, "banner start {:?}", px);
}

#[test]
fn test_gap_above_map_is_background() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    assert_eq!(*image.get_pixel(300, 55), Rgba([0x26, 0x32, 0x38, 255]));
}

#[test]
fn test_backdrop_fills_map_area() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    assert_eq!(*image.get_pixel(300, 100), Rgba(MAP_GREEN));
    assert_eq!(*image.get_pixel(549, 300), Rgba(MAP_GREEN));
}

#[test]
fn test_small_backdrop_is_scaled_to_map_area() {
    let small = RgbaImage::from_pixel(275, 270, Rgba(MAP_GREEN));
    let image = render(&sample_tornado_alert(), &small);
    let px = image.get_pixel(500, 500);
    assert!(px[1] > 190 && px[0] < 20, "scaled backdrop {:?}", px);
}

#[test]
fn test_sidebar_is_drawn_over_map() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    assert_eq!(*image.get_pixel(552, 300), Rgba([0x1C, 0x1C, 0x1C, 255]));
}

#[test]
fn test_footer_covers_map_bottom() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    let px = image.get_pixel(540, 595);
    assert_ne!(*px, Rgba(MAP_GREEN));
    assert!(px[0] < 70 && px[2] < 90, "footer {:?}", px);
}

#[test]
fn test_logo_in_footer() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    // 200x100 logo drawn 64x32 at (10, 564); its opaque core is blue
    let px = image.get_pixel(42, 580);
    assert!(px[2] > 200 && px[0] < 80, "logo {:?}", px);
}

// ============================================================================
// Hazard badges
// ============================================================================

/// Inside the top-left badge, past its rounded corner, away from its text.
const BADGE_PIXEL: (u32, u32) = (565, 395);

#[test]
fn test_tornado_badges_are_red() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    let px = image.get_pixel(BADGE_PIXEL.0, BADGE_PIXEL.1);
    assert!(px[0] > 180 && px[1] < 80, "tornado badge {:?}", px);
}

#[test]
fn test_thunderstorm_badges_are_yellow() {
    let image = render(&sample_severe_alert(), &green_backdrop());
    let px = image.get_pixel(BADGE_PIXEL.0, BADGE_PIXEL.1);
    assert!(px[0] > 220 && px[1] > 150 && px[2] < 80, "thunderstorm badge {:?}", px);
}

#[test]
fn test_other_events_have_no_badges() {
    let image = render(&sample_other_alert(), &green_backdrop());
    assert_eq!(
        *image.get_pixel(BADGE_PIXEL.0, BADGE_PIXEL.1),
        Rgba([0x1C, 0x1C, 0x1C, 255])
    );
}

#[test]
fn test_time_badges_present() {
    let image = render(&sample_tornado_alert(), &green_backdrop());
    // left edge of IN EFFECT (y 100..140) and EXPIRES (y 140..180) badges
    let in_effect = image.get_pixel(562, 120);
    let expires = image.get_pixel(562, 160);
    assert!(in_effect[1] > 60 && in_effect[0] < 30, "in effect {:?}", in_effect);
    assert!(expires[0] > 180 && expires[2] < 40, "expires {:?}", expires);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_renderer_rejects_canvas_too_short_for_badge_grid() {
    let config = RenderConfig {
        height: 200,
        ..RenderConfig::default()
    };
    let err = CompositeRenderer::new(config, DisplayZone::default()).unwrap_err();
    assert!(matches!(err, alert_common::AlertError::Config(_)), "{:?}", err);
}
