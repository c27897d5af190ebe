//! Pipeline configuration.

use std::path::PathBuf;

use alert_common::DisplayZone;
use renderer::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::backdrop::BackdropConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub render: RenderConfig,
    pub backdrop: BackdropConfig,
    pub logo_path: PathBuf,
    /// IANA zone for badge and caption times.
    pub display_zone: DisplayZone,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            backdrop: BackdropConfig::default(),
            logo_path: PathBuf::from("assets/logo.png"),
            display_zone: DisplayZone::default(),
        }
    }
}
