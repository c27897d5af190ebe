//! Geometry projection for alert polygons.
//!
//! Computes the bounding box, center and zoom used to request a map backdrop,
//! and encodes the polygon ring as a polyline path token.

pub mod polyline;
pub mod viewport;

pub use polyline::PolylineError;
pub use viewport::{encode_ring, project_ring, select_zoom};
