//! Alert records and the NWS GeoJSON feed format they arrive in.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};

/// Hazard category of an alert.
///
/// Unknown event names are kept verbatim in `Other` so the banner can still
/// show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    TornadoWarning,
    SevereThunderstormWarning,
    Other(String),
}

impl EventKind {
    /// Map a feed event name onto a category. Matching ignores case and
    /// surrounding whitespace.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("Tornado Warning") {
            EventKind::TornadoWarning
        } else if trimmed.eq_ignore_ascii_case("Severe Thunderstorm Warning") {
            EventKind::SevereThunderstormWarning
        } else {
            EventKind::Other(trimmed.to_string())
        }
    }

    /// Display name as issued.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::TornadoWarning => "Tornado Warning",
            EventKind::SevereThunderstormWarning => "Severe Thunderstorm Warning",
            EventKind::Other(name) => name,
        }
    }

    pub fn is_tornado_related(&self) -> bool {
        matches!(self, EventKind::TornadoWarning)
    }

    pub fn is_severe_thunderstorm_related(&self) -> bool {
        matches!(self, EventKind::SevereThunderstormWarning)
    }

    /// Only tornado and severe thunderstorm alerts get the hazard badge grid.
    pub fn has_hazard_badges(&self) -> bool {
        self.is_tornado_related() || self.is_severe_thunderstorm_related()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(EventKind::parse(&name))
    }
}

/// One hazard notification, immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub event: EventKind,
    pub sender_name: String,
    /// Comma-joined list of affected sub-regions.
    pub area_desc: String,
    pub effective: DateTime<FixedOffset>,
    pub expires: DateTime<FixedOffset>,
    pub description: String,
    /// Closed polygon ring of (longitude, latitude) pairs.
    pub geometry: Vec<(f64, f64)>,
}

/// Finished raster plus caption, ready for a publisher.
#[derive(Debug, Clone)]
pub struct RenderedAlert {
    pub alert_id: String,
    pub event: EventKind,
    /// PNG-encoded raster.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub caption: String,
}

// ============================================================================
// NWS feed records (api.weather.gov /alerts GeoJSON)
// ============================================================================

/// `FeatureCollection` returned by the alerts endpoint.
///
/// Features are decoded one at a time; a feature that does not decode is
/// reported in `rejected` instead of failing the whole collection.
#[derive(Debug, Clone, Default)]
pub struct AlertCollection {
    pub features: Vec<AlertFeature>,
    /// One message per feature that could not be decoded.
    pub rejected: Vec<String>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: AlertProperties,
    #[serde(default)]
    pub geometry: Option<FeedGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default)]
    pub id: Option<String>,
    pub event: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub area_desc: String,
    pub effective: DateTime<FixedOffset>,
    pub expires: DateTime<FixedOffset>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
}

/// Raw GeoJSON geometry; only polygons are usable.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl FeedGeometry {
    /// Outer ring of a Polygon, or of the first member of a MultiPolygon.
    pub fn outer_ring(&self) -> AlertResult<Vec<(f64, f64)>> {
        let ring = match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<[f64; 2]>> = serde_json::from_value(self.coordinates.clone())?;
                rings.into_iter().next()
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<[f64; 2]>>> =
                    serde_json::from_value(self.coordinates.clone())?;
                polygons.into_iter().next().and_then(|p| p.into_iter().next())
            }
            other => {
                return Err(AlertError::InvalidAlert(format!(
                    "unsupported geometry type: {}",
                    other
                )))
            }
        };

        ring.map(|points| points.into_iter().map(|[lng, lat]| (lng, lat)).collect())
            .ok_or_else(|| AlertError::InvalidAlert("polygon has no rings".to_string()))
    }
}

impl AlertCollection {
    /// Fails only when the document itself is not a feature collection.
    pub fn from_json(json_str: &str) -> AlertResult<Self> {
        let raw: RawCollection = serde_json::from_str(json_str)?;

        let mut collection = Self::default();
        for (index, value) in raw.features.into_iter().enumerate() {
            let label = feature_label(&value, index);
            match serde_json::from_value::<AlertFeature>(value) {
                Ok(feature) => collection.features.push(feature),
                Err(e) => collection.rejected.push(format!("{}: {}", label, e)),
            }
        }
        Ok(collection)
    }
}

/// Best identifier available for a feature that may not decode.
fn feature_label(value: &serde_json::Value, index: usize) -> String {
    value
        .pointer("/properties/id")
        .or_else(|| value.get("id"))
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("feature #{}", index))
}

impl TryFrom<AlertFeature> for Alert {
    type Error = AlertError;

    fn try_from(feature: AlertFeature) -> AlertResult<Self> {
        let props = feature.properties;
        let id = props
            .id
            .or(feature.id)
            .ok_or_else(|| AlertError::InvalidAlert("alert has no identifier".to_string()))?;

        let geometry = feature
            .geometry
            .ok_or_else(|| AlertError::InvalidAlert(format!("alert {} has no geometry", id)))?
            .outer_ring()?;

        Ok(Alert {
            id,
            event: EventKind::parse(&props.event),
            sender_name: props.sender_name,
            area_desc: props.area_desc,
            effective: props.effective,
            expires: props.expires,
            description: props.description.unwrap_or_default(),
            geometry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_parse() {
        assert_eq!(EventKind::parse("Tornado Warning"), EventKind::TornadoWarning);
        assert_eq!(
            EventKind::parse("SEVERE THUNDERSTORM WARNING"),
            EventKind::SevereThunderstormWarning
        );
        assert_eq!(
            EventKind::parse("Flash Flood Warning"),
            EventKind::Other("Flash Flood Warning".to_string())
        );
    }

    #[test]
    fn test_hazard_badges_only_for_convective_warnings() {
        assert!(EventKind::TornadoWarning.has_hazard_badges());
        assert!(EventKind::SevereThunderstormWarning.has_hazard_badges());
        assert!(!EventKind::Other("Special Weather Statement".into()).has_hazard_badges());
    }

    #[test]
    fn test_multipolygon_uses_first_outer_ring() {
        let geometry = FeedGeometry {
            kind: "MultiPolygon".to_string(),
            coordinates: serde_json::json!([
                [[[-84.0, 33.0], [-83.9, 33.0], [-83.9, 33.1], [-84.0, 33.0]]],
                [[[-80.0, 30.0], [-79.9, 30.0], [-79.9, 30.1], [-80.0, 30.0]]]
            ]),
        };
        let ring = geometry.outer_ring().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], (-84.0, 33.0));
    }

    #[test]
    fn test_point_geometry_rejected() {
        let geometry = FeedGeometry {
            kind: "Point".to_string(),
            coordinates: serde_json::json!([-84.0, 33.0]),
        };
        assert!(matches!(geometry.outer_ring(), Err(AlertError::InvalidAlert(_))));
    }
}
