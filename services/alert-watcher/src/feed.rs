//! NWS active-alerts feed client and alert selection.

use std::time::Duration;

use alert_common::{Alert, AlertCollection};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, info, instrument, warn};

use crate::config::FeedConfig;

/// Source of candidate alerts for one poll cycle.
#[async_trait]
pub trait AlertSource: Send + Sync {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>>;
}

/// Client for the api.weather.gov `/alerts/active` endpoint.
pub struct FeedClient {
    client: Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AlertSource for FeedClient {
    #[instrument(skip(self), fields(url = %self.config.url))]
    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        let response = self
            .client
            .get(&self.config.url)
            .header(header::ACCEPT, "application/geo+json")
            .send()
            .await
            .context("Alert feed request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Alert feed returned {}", response.status()));
        }

        let body = response.text().await.context("Reading alert feed body")?;
        let collection = AlertCollection::from_json(&body)?;
        let total = collection.features.len() + collection.rejected.len();

        let alerts = select_alerts(collection, &self.config);
        info!(total, selected = alerts.len(), "Fetched alert feed");
        Ok(alerts)
    }
}

/// Keep features from the configured office whose event is wanted and that
/// carry polygon geometry.
pub fn select_alerts(collection: AlertCollection, config: &FeedConfig) -> Vec<Alert> {
    for reason in &collection.rejected {
        warn!(error = %reason, "Skipping undecodable feed entry");
    }

    collection
        .features
        .into_iter()
        .filter(|feature| {
            let props = &feature.properties;
            props.sender_name.contains(&config.sender_filter)
                && config
                    .events
                    .iter()
                    .any(|wanted| wanted.trim().eq_ignore_ascii_case(props.event.trim()))
        })
        .filter_map(|feature| {
            let label = feature
                .properties
                .id
                .clone()
                .or_else(|| feature.id.clone())
                .unwrap_or_default();
            match Alert::try_from(feature) {
                Ok(alert) => {
                    debug!(alert_id = %alert.id, event = %alert.event, "Selected alert");
                    Some(alert)
                }
                Err(e) => {
                    warn!(alert_id = %label, error = %e, "Skipping alert");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_common::EventKind;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "id": "https://api.weather.gov/alerts/urn:oid:1",
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-83.38, 32.68], [-83.29, 32.67], [-83.22, 32.71], [-83.38, 32.68]]]
                },
                "properties": {
                    "id": "urn:oid:1",
                    "event": "Tornado Warning",
                    "senderName": "NWS Peachtree City GA",
                    "areaDesc": "Twiggs, Wilkinson",
                    "effective": "2025-03-31T14:40:00-04:00",
                    "expires": "2025-03-31T15:15:00-04:00",
                    "description": "Tornado...OBSERVED."
                }
            },
            {
                "id": "urn:oid:2",
                "type": "Feature",
                "geometry": null,
                "properties": {
                    "id": "urn:oid:2",
                    "event": "Severe Thunderstorm Warning",
                    "senderName": "NWS Peachtree City GA",
                    "areaDesc": "Bibb",
                    "effective": "2025-03-31T14:40:00-04:00",
                    "expires": "2025-03-31T15:15:00-04:00"
                }
            },
            {
                "id": "urn:oid:3",
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-84.0, 31.0], [-83.9, 31.0], [-83.9, 31.1], [-84.0, 31.0]]]
                },
                "properties": {
                    "id": "urn:oid:3",
                    "event": "Tornado Warning",
                    "senderName": "NWS Tallahassee FL",
                    "areaDesc": "Decatur",
                    "effective": "2025-03-31T14:40:00-04:00",
                    "expires": "2025-03-31T15:15:00-04:00"
                }
            },
            {
                "id": "urn:oid:4",
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-84.0, 33.0], [-83.9, 33.0], [-83.9, 33.1], [-84.0, 33.0]]]
                },
                "properties": {
                    "id": "urn:oid:4",
                    "event": "Flood Advisory",
                    "senderName": "NWS Peachtree City GA",
                    "areaDesc": "Fulton",
                    "effective": "2025-03-31T14:40:00-04:00",
                    "expires": "2025-03-31T15:15:00-04:00"
                }
            }
        ]
    }"#;

    #[test]
    fn test_select_alerts_filters_sender_event_and_geometry() {
        let collection = AlertCollection::from_json(FEED).unwrap();
        let alerts = select_alerts(collection, &FeedConfig::default());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "urn:oid:1");
        assert_eq!(alerts[0].event, EventKind::TornadoWarning);
        assert_eq!(alerts[0].geometry.len(), 4);
    }

    #[test]
    fn test_event_list_matches_case_insensitively() {
        let config = FeedConfig {
            events: vec!["flood advisory".to_string()],
            ..FeedConfig::default()
        };
        let alerts = select_alerts(AlertCollection::from_json(FEED).unwrap(), &config);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "urn:oid:4");
    }

    #[test]
    fn test_undecodable_entry_does_not_hide_good_alerts() {
        // The tornado warning gets an unparseable expiry.
        let feed = FEED.replacen(
            r#""expires": "2025-03-31T15:15:00-04:00",
                    "description""#,
            r#""expires": "until further notice",
                    "description""#,
            1,
        );
        let collection = AlertCollection::from_json(&feed).unwrap();
        assert_eq!(collection.rejected.len(), 1);
        assert!(collection.rejected[0].starts_with("urn:oid:1: "));

        let config = FeedConfig {
            events: vec!["Tornado Warning".to_string(), "Flood Advisory".to_string()],
            ..FeedConfig::default()
        };
        let alerts = select_alerts(collection, &config);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, EventKind::Other("Flood Advisory".into()));
    }
}
