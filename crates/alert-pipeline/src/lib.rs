//! Alert-to-raster render pipeline.
//!
//! Ties the projector, threat extractor and compositor together with the
//! two external inputs a render needs: the map backdrop from a static-map
//! provider and the logo asset.

pub mod backdrop;
pub mod caption;
pub mod config;
pub mod logo;
pub mod pipeline;

pub use backdrop::{BackdropConfig, BackdropProvider, StaticMapClient};
pub use caption::build_caption;
pub use config::PipelineConfig;
pub use logo::LogoStore;
pub use pipeline::RenderPipeline;
