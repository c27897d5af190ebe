//! Common types shared across the alert graphics crates and services.

pub mod alert;
pub mod bbox;
pub mod error;
pub mod threat;
pub mod time;
pub mod viewport;

pub use alert::{Alert, AlertCollection, AlertFeature, EventKind, RenderedAlert};
pub use bbox::BoundingBox;
pub use error::{AlertError, AlertResult};
pub use threat::{StormMotion, ThreatSummary, TornadoStatus, NOT_AVAILABLE};
pub use time::DisplayZone;
pub use viewport::{ViewportSpec, CLOSE_ZOOM, WIDE_ZOOM};
