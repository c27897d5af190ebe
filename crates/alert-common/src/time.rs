//! Formatting alert timestamps in a fixed display time zone.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};

/// Default zone for badge and caption times.
pub const DEFAULT_DISPLAY_ZONE: &str = "America/New_York";

/// IANA time zone used for every rendered timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayZone(Tz);

impl DisplayZone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parse an IANA zone name such as `America/New_York`.
    pub fn from_name(name: &str) -> AlertResult<Self> {
        name.parse::<Tz>()
            .map(Self)
            .map_err(|e| AlertError::Config(format!("unknown time zone '{}': {}", name, e)))
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Long form used on the time badges, e.g. `3/31/2025, 2:40:00 PM`.
    pub fn badge_timestamp<Z: TimeZone>(&self, instant: &DateTime<Z>) -> String {
        instant
            .with_timezone(&self.0)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
            .to_uppercase()
    }

    /// Short form used in captions, e.g. `3:15 PM EDT`.
    pub fn caption_time<Z: TimeZone>(&self, instant: &DateTime<Z>) -> String {
        instant
            .with_timezone(&self.0)
            .format("%-I:%M %p %Z")
            .to_string()
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self(chrono_tz::America::New_York)
    }
}

impl TryFrom<String> for DisplayZone {
    type Error = AlertError;

    fn try_from(name: String) -> AlertResult<Self> {
        Self::from_name(&name)
    }
}

impl From<DisplayZone> for String {
    fn from(zone: DisplayZone) -> Self {
        zone.0.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_badge_timestamp_in_eastern_daylight_time() {
        let instant = DateTime::parse_from_rfc3339("2025-03-31T18:40:00Z").unwrap();
        let zone = DisplayZone::default();
        assert_eq!(zone.badge_timestamp(&instant), "3/31/2025, 2:40:00 PM");
    }

    #[test]
    fn test_caption_time_includes_abbreviation() {
        let instant = DateTime::parse_from_rfc3339("2025-03-31T19:15:00Z").unwrap();
        let zone = DisplayZone::default();
        assert_eq!(zone.caption_time(&instant), "3:15 PM EDT");
    }

    #[test]
    fn test_winter_offset() {
        let instant = DateTime::parse_from_rfc3339("2025-01-15T17:05:00Z").unwrap();
        let zone = DisplayZone::default();
        assert_eq!(zone.caption_time(&instant), "12:05 PM EST");
    }

    #[test]
    fn test_unknown_zone_is_config_error() {
        assert!(matches!(
            DisplayZone::from_name("Mars/Olympus_Mons"),
            Err(AlertError::Config(_))
        ));
    }
}
