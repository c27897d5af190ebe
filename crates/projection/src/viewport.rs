//! Viewport selection for alert polygons.
//!
//! Center is the bounding-box midpoint rather than the polygon centroid, and
//! zoom is a fixed two-level policy: warning polygons are small, so a
//! continuous fit-to-bounds is not needed.

use alert_common::{BoundingBox, ViewportSpec, CLOSE_ZOOM, WIDE_ZOOM};
use tracing::debug;

use crate::polyline;

/// Spans below this many degrees on both axes use the close zoom.
pub const CLOSE_ZOOM_MAX_SPAN_DEG: f64 = 1.0;

/// Compute the viewport for a (lng, lat) ring.
///
/// Never fails: an empty or degenerate ring yields a zero-span box and the
/// close zoom level.
pub fn project_ring(ring: &[(f64, f64)]) -> ViewportSpec {
    let bbox = match BoundingBox::from_ring(ring) {
        Some(bbox) => bbox,
        None => {
            debug!("empty alert ring, using zero-span box at origin");
            BoundingBox::point(0.0, 0.0)
        }
    };

    if bbox.is_degenerate() {
        debug!(
            points = ring.len(),
            width = bbox.width(),
            height = bbox.height(),
            "degenerate alert geometry"
        );
    }

    let (center_lng, center_lat) = bbox.center();

    ViewportSpec {
        center_lat,
        center_lng,
        zoom: select_zoom(&bbox),
        bbox,
        encoded_path: encode_ring(ring),
    }
}

/// Close zoom iff both spans are strictly below one degree.
pub fn select_zoom(bbox: &BoundingBox) -> u8 {
    if bbox.height() < CLOSE_ZOOM_MAX_SPAN_DEG && bbox.width() < CLOSE_ZOOM_MAX_SPAN_DEG {
        CLOSE_ZOOM
    } else {
        WIDE_ZOOM
    }
}

/// Encode the ring as a polyline with each point swapped to (lat, lng).
///
/// Rings with fewer than two points cannot be drawn as a path and produce an
/// empty token.
pub fn encode_ring(ring: &[(f64, f64)]) -> String {
    if ring.len() < 2 {
        return String::new();
    }
    let swapped: Vec<(f64, f64)> = ring.iter().map(|&(lng, lat)| (lat, lng)).collect();
    polyline::encode(&swapped)
}
