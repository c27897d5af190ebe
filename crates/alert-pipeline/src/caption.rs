//! Plain-text caption published alongside the card.

use alert_common::{Alert, DisplayZone};

/// `"{event} for {areas} until {expires}"`, the expiry in the display zone.
pub fn build_caption(alert: &Alert, zone: &DisplayZone) -> String {
    format!(
        "{} for {} until {}",
        alert.event,
        alert.area_desc.trim(),
        zone.caption_time(&alert.expires)
    )
}
