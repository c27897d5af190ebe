//! Hazard extraction from alert narratives.
//!
//! Each field is matched independently against the free-text description, so
//! a missing wind phrase never hides the hail size and so on. Phrasing that
//! does not match (metric units, reworded hazards) yields no value rather
//! than a guess.

use alert_common::{EventKind, StormMotion, ThreatSummary, TornadoStatus};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::trace;

/// Tag NWS uses when a tornado has been confirmed.
const OBSERVED_TAG: &str = "OBSERVED";

/// Tag NWS uses for radar-detected rotation.
const RADAR_TAG: &str = "RADAR";

/// "winds up to 70 mph", "wind around 60 mph", "winds 80mph"
static WIND_RE: Lazy<Regex> = Lazy::new(|| case_insensitive(r"winds? (?:up to|around)?\s?(\d{2,3})\s?mph"));

/// "1.25 inch hail", "2-inch hail", ".75 in hail", "HAZARD...1.25 inch hail".
/// The number must start at a digit or a single leading dot.
static HAIL_RE: Lazy<Regex> = Lazy::new(|| case_insensitive(r"(\d*\.?\d+)[\s-]?(?:inch|in)\s+hail"));

/// "moving east at 40 mph"
static MOTION_RE: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"moving\s+([a-z]+)\s+at\s+(\d+)\s?mph"));

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("static hazard pattern")
}

/// Parse the narrative of an alert into structured hazard fields.
pub fn extract_threats(description: &str, event: &EventKind) -> ThreatSummary {
    let summary = ThreatSummary {
        tornado_status: tornado_status(description, event),
        wind_mph: wind_mph(description),
        hail_inches: hail_inches(description),
        motion: storm_motion(description),
    };
    trace!(?summary, event = %event, "extracted threats");
    summary
}

/// Tornado status; only tornado-related events can be anything but `None`.
pub fn tornado_status(description: &str, event: &EventKind) -> TornadoStatus {
    if !event.is_tornado_related() {
        return TornadoStatus::None;
    }
    if description.contains(OBSERVED_TAG) {
        TornadoStatus::Observed
    } else if description.contains(RADAR_TAG) {
        TornadoStatus::RadarIndicated
    } else {
        TornadoStatus::Possible
    }
}

pub fn wind_mph(description: &str) -> Option<u32> {
    WIND_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn hail_inches(description: &str) -> Option<f64> {
    HAIL_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|inches| inches.is_finite() && *inches > 0.0)
}

/// Direction and speed captured as one unit; either both or neither.
pub fn storm_motion(description: &str) -> Option<StormMotion> {
    let caps = MOTION_RE.captures(description)?;
    let direction = caps.get(1)?.as_str().to_lowercase();
    let speed_mph = caps.get(2)?.as_str().parse().ok()?;
    Some(StormMotion {
        direction,
        speed_mph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_beats_radar() {
        let status = tornado_status(
            "TORNADO...OBSERVED. SOURCE...RADAR CONFIRMED",
            &EventKind::TornadoWarning,
        );
        assert_eq!(status, TornadoStatus::Observed);
    }

    #[test]
    fn test_radar_indicated() {
        let status = tornado_status("TORNADO...RADAR INDICATED.", &EventKind::TornadoWarning);
        assert_eq!(status, TornadoStatus::RadarIndicated);
    }

    #[test]
    fn test_tornado_possible_when_untagged() {
        let status = tornado_status("A tornado may develop.", &EventKind::TornadoWarning);
        assert_eq!(status, TornadoStatus::Possible);
    }

    #[test]
    fn test_wind_variants() {
        assert_eq!(wind_mph("winds up to 70 mph"), Some(70));
        assert_eq!(wind_mph("Wind around 60 MPH"), Some(60));
        assert_eq!(wind_mph("winds 100mph"), Some(100));
        assert_eq!(wind_mph("60 mph wind gusts"), None);
        assert_eq!(wind_mph("winds up to 90 km/h"), None);
    }

    #[test]
    fn test_hail_variants() {
        assert_eq!(hail_inches("1.25 inch hail"), Some(1.25));
        assert_eq!(hail_inches("2-inch hail"), Some(2.0));
        assert_eq!(hail_inches(".75 in hail"), Some(0.75));
        assert_eq!(hail_inches("quarter size hail"), None);
        assert_eq!(hail_inches("... inch hail"), None);
    }

    #[test]
    fn test_motion_lowercases_direction() {
        let motion = storm_motion("MOVING NORTHEAST AT 35 MPH").unwrap();
        assert_eq!(motion.direction, "northeast");
        assert_eq!(motion.speed_mph, 35);
    }

    #[test]
    fn test_motion_absent() {
        assert_eq!(storm_motion("This storm is stationary."), None);
    }
}
