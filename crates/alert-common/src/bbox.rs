//! Geographic bounding box over a polygon ring.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// `x` is longitude and `y` is latitude, matching the (lng, lat) order of
/// alert rings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Zero-span box at a single point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Bounding box of a (lng, lat) ring in a single pass.
    ///
    /// Returns `None` for an empty ring.
    pub fn from_ring(ring: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = ring.split_first()?;
        let mut bbox = Self::point(x0, y0);
        for &(x, y) in rest {
            bbox.min_x = bbox.min_x.min(x);
            bbox.max_x = bbox.max_x.max(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box as (lng, lat).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// True when the box has no area (all points collinear on an axis or identical).
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Edges count as inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ring() {
        let ring = [(-83.38, 32.68), (-83.22, 32.71), (-83.26, 32.76), (-83.38, 32.68)];
        let bbox = BoundingBox::from_ring(&ring).unwrap();
        assert_eq!(bbox.min_x, -83.38);
        assert_eq!(bbox.max_x, -83.22);
        assert_eq!(bbox.min_y, 32.68);
        assert_eq!(bbox.max_y, 32.76);
    }

    #[test]
    fn test_empty_ring() {
        assert!(BoundingBox::from_ring(&[]).is_none());
    }

    #[test]
    fn test_point_is_degenerate() {
        let bbox = BoundingBox::point(-84.0, 33.0);
        assert!(bbox.is_degenerate());
        assert_eq!(bbox.center(), (-84.0, 33.0));
    }

    #[test]
    fn test_contains_point_includes_edges() {
        let bbox = BoundingBox::new(-84.0, 33.0, -83.0, 34.0);
        assert!(bbox.contains_point(-84.0, 33.5));
        assert!(bbox.contains_point(-83.5, 34.0));
        assert!(!bbox.contains_point(-82.9, 33.5));
        assert!(!bbox.contains_point(-83.5, 32.9));
    }
}
