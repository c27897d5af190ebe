//! Common test fixtures for alert rendering tests.

use alert_common::{Alert, EventKind};
use chrono::DateTime;

/// Common polygon rings in (lng, lat) order.
pub mod rings {
    /// Six-point closed ring over middle Georgia, ~0.16° x 0.09°.
    pub const MIDDLE_GEORGIA: [(f64, f64); 6] = [
        (-83.38, 32.68),
        (-83.29, 32.67),
        (-83.22, 32.71),
        (-83.26, 32.76),
        (-83.34, 32.75),
        (-83.38, 32.68),
    ];

    /// Ring spanning more than one degree of longitude.
    pub const WIDE_LINE: [(f64, f64); 5] = [
        (-85.2, 33.1),
        (-83.6, 33.2),
        (-83.7, 33.6),
        (-85.1, 33.5),
        (-85.2, 33.1),
    ];

    /// Every point identical.
    pub const SINGLE_POINT: [(f64, f64); 4] = [
        (-84.39, 33.75),
        (-84.39, 33.75),
        (-84.39, 33.75),
        (-84.39, 33.75),
    ];

    /// Points on a horizontal line.
    pub const COLLINEAR: [(f64, f64); 4] = [
        (-84.5, 33.0),
        (-84.3, 33.0),
        (-84.1, 33.0),
        (-84.5, 33.0),
    ];
}

/// Narrative of the reference tornado warning.
pub const TORNADO_NARRATIVE: &str = "A severe thunderstorm capable of producing a tornado was \
located near Jeffersonville, moving east at 40 mph. Tornado...OBSERVED. Hazard...winds up to \
70 mph and quarter size hail. A tornado is possible with this storm.";

/// Narrative of a severe thunderstorm warning with hail and wind.
pub const SEVERE_NARRATIVE: &str = "At 512 PM EDT, a severe thunderstorm was located over \
Macon, moving northeast at 35 mph. HAZARD...winds around 60 mph and 1.25 inch hail. \
SOURCE...Radar indicated.";

/// The reference tornado warning used across tests.
pub fn sample_tornado_alert() -> Alert {
    Alert {
        id: "urn:oid:2.49.0.1.840.0.tornado-test".to_string(),
        event: EventKind::TornadoWarning,
        sender_name: "NWS Peachtree City GA".to_string(),
        area_desc: "Twiggs, Wilkinson, Baldwin, Jones".to_string(),
        effective: DateTime::parse_from_rfc3339("2025-03-31T18:40:00Z").unwrap(),
        expires: DateTime::parse_from_rfc3339("2025-03-31T19:15:00Z").unwrap(),
        description: TORNADO_NARRATIVE.to_string(),
        geometry: rings::MIDDLE_GEORGIA.to_vec(),
    }
}

/// A severe thunderstorm warning over the same area.
pub fn sample_severe_alert() -> Alert {
    Alert {
        id: "urn:oid:2.49.0.1.840.0.severe-test".to_string(),
        event: EventKind::SevereThunderstormWarning,
        description: SEVERE_NARRATIVE.to_string(),
        ..sample_tornado_alert()
    }
}

/// An alert whose event is not one the renderer knows about.
pub fn sample_other_alert() -> Alert {
    Alert {
        id: "urn:oid:2.49.0.1.840.0.other-test".to_string(),
        event: EventKind::Other("Special Weather Statement".to_string()),
        description: "Strong thunderstorms will impact portions of middle Georgia.".to_string(),
        ..sample_tornado_alert()
    }
}

/// The reference alert with every ring point identical.
pub fn degenerate_alert() -> Alert {
    Alert {
        id: "urn:oid:2.49.0.1.840.0.degenerate-test".to_string(),
        geometry: rings::SINGLE_POINT.to_vec(),
        ..sample_tornado_alert()
    }
}
