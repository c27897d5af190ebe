//! Structured hazard facts extracted from alert narratives.

use serde::{Deserialize, Serialize};

/// Marker shown in place of a hazard value the narrative does not mention.
pub const NOT_AVAILABLE: &str = "N/A";

/// Tornado status for tornado-related alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TornadoStatus {
    Observed,
    RadarIndicated,
    Possible,
    /// The event is not tornado-related.
    None,
}

impl TornadoStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TornadoStatus::Observed => "Observed",
            TornadoStatus::RadarIndicated => "Radar Indicated",
            TornadoStatus::Possible => "Possible",
            TornadoStatus::None => "None",
        }
    }
}

/// Storm motion as stated in the narrative, e.g. "moving east at 40 mph".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormMotion {
    pub direction: String,
    pub speed_mph: u32,
}

/// Hazard fields for one alert. Recomputed per render, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatSummary {
    pub tornado_status: TornadoStatus,
    pub wind_mph: Option<u32>,
    pub hail_inches: Option<f64>,
    pub motion: Option<StormMotion>,
}

impl ThreatSummary {
    /// Summary with nothing extracted.
    pub fn empty(tornado_status: TornadoStatus) -> Self {
        Self {
            tornado_status,
            wind_mph: None,
            hail_inches: None,
            motion: None,
        }
    }

    pub fn tornado_display(&self) -> String {
        self.tornado_status.label().to_string()
    }

    pub fn wind_display(&self) -> String {
        match self.wind_mph {
            Some(mph) => format!("{} mph", mph),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn hail_display(&self) -> String {
        match self.hail_inches {
            Some(inches) => format!("{} in", format_decimal(inches)),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn motion_display(&self) -> String {
        match &self.motion {
            Some(motion) => format!("{} {} mph", motion.direction, motion.speed_mph),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Format a decimal with at most two places and no trailing zeros.
fn format_decimal(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
