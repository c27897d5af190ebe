//! Tests for turning NWS feed records into alerts.

use alert_common::{Alert, AlertCollection, AlertError, EventKind};

const FEED: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "id": "https://api.weather.gov/alerts/urn:oid:2.49.0.1.840.0.abc",
      "type": "Feature",
      "geometry": {
        "type": "Polygon",
        "coordinates": [[
          [-83.38, 32.68], [-83.29, 32.67], [-83.22, 32.71],
          [-83.26, 32.76], [-83.34, 32.75], [-83.38, 32.68]
        ]]
      },
      "properties": {
        "id": "urn:oid:2.49.0.1.840.0.abc",
        "areaDesc": "Twiggs, Wilkinson, Baldwin, Jones",
        "effective": "2025-03-31T14:40:00-04:00",
        "expires": "2025-03-31T15:15:00-04:00",
        "senderName": "NWS Peachtree City GA",
        "event": "Tornado Warning",
        "headline": "Tornado Warning issued March 31 at 2:40PM EDT",
        "description": "Tornado...OBSERVED."
      }
    },
    {
      "id": "https://api.weather.gov/alerts/urn:oid:2.49.0.1.840.0.def",
      "type": "Feature",
      "geometry": null,
      "properties": {
        "id": "urn:oid:2.49.0.1.840.0.def",
        "areaDesc": "Fulton",
        "effective": "2025-03-31T14:40:00-04:00",
        "expires": "2025-03-31T20:00:00-04:00",
        "senderName": "NWS Peachtree City GA",
        "event": "Wind Advisory",
        "description": null
      }
    }
  ]
}"#;

#[test]
fn test_parse_feed_collection() {
    let collection = AlertCollection::from_json(FEED).unwrap();
    assert_eq!(collection.features.len(), 2);
}

#[test]
fn test_polygon_feature_becomes_alert() {
    let collection = AlertCollection::from_json(FEED).unwrap();
    let feature = collection.features.into_iter().next().unwrap();
    let alert = Alert::try_from(feature).unwrap();

    assert_eq!(alert.id, "urn:oid:2.49.0.1.840.0.abc");
    assert_eq!(alert.event, EventKind::TornadoWarning);
    assert_eq!(alert.area_desc, "Twiggs, Wilkinson, Baldwin, Jones");
    assert_eq!(alert.geometry.len(), 6);
    assert_eq!(alert.geometry.first(), alert.geometry.last());
    assert_eq!(alert.expires.timestamp() - alert.effective.timestamp(), 35 * 60);
}

#[test]
fn test_feature_without_geometry_is_invalid() {
    let collection = AlertCollection::from_json(FEED).unwrap();
    let feature = collection.features.into_iter().nth(1).unwrap();
    let err = Alert::try_from(feature).unwrap_err();
    assert!(matches!(err, AlertError::InvalidAlert(_)));
    assert!(!err.is_retryable());
}

#[test]
fn test_malformed_document_is_invalid_alert() {
    let err = AlertCollection::from_json("not json").unwrap_err();
    assert!(matches!(err, AlertError::InvalidAlert(_)));
}

#[test]
fn test_bad_feature_does_not_drop_the_rest() {
    let feed = r#"{
      "features": [
        {
          "id": "urn:oid:bad",
          "properties": {
            "id": "urn:oid:bad",
            "event": "Tornado Warning",
            "effective": "yesterday afternoon",
            "expires": "2025-03-31T15:15:00-04:00"
          }
        },
        {},
        {
          "id": "urn:oid:good",
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[-84.0, 33.0], [-83.9, 33.0], [-83.9, 33.1], [-84.0, 33.0]]]
          },
          "properties": {
            "id": "urn:oid:good",
            "event": "Severe Thunderstorm Warning",
            "effective": "2025-03-31T14:40:00-04:00",
            "expires": "2025-03-31T15:15:00-04:00"
          }
        }
      ]
    }"#;

    let collection = AlertCollection::from_json(feed).unwrap();
    assert_eq!(collection.features.len(), 1);
    assert_eq!(collection.rejected.len(), 2);
    assert!(collection.rejected[0].starts_with("urn:oid:bad: "));
    assert!(collection.rejected[1].starts_with("feature #1: "));

    let alert = Alert::try_from(collection.features.into_iter().next().unwrap()).unwrap();
    assert_eq!(alert.id, "urn:oid:good");
}
