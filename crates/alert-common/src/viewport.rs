//! Map viewport derived from an alert polygon.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// Zoom used when the polygon spans less than a degree on both axes.
pub const CLOSE_ZOOM: u8 = 8;

/// Zoom used for everything else.
pub const WIDE_ZOOM: u8 = 7;

/// What geographic extent the backdrop should show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub bbox: BoundingBox,
    /// Polyline-encoded ring in (lat, lng) order. Empty when the ring has
    /// fewer than two points.
    pub encoded_path: String,
}

impl ViewportSpec {
    /// Whether the backdrop request should carry a path overlay.
    pub fn has_path(&self) -> bool {
        !self.encoded_path.is_empty()
    }
}
