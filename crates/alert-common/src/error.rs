//! Error types for alert rendering.

use thiserror::Error;

/// Result type alias using AlertError.
pub type AlertResult<T> = Result<T, AlertError>;

/// Primary error type for a single alert render.
///
/// Degenerate geometry is not represented here: the projector falls back to a
/// zero-span box and never fails.
#[derive(Debug, Error)]
pub enum AlertError {
    // === Input Errors ===
    #[error("Invalid alert record: {0}")]
    InvalidAlert(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // === Collaborator Errors ===
    #[error("Backdrop fetch failed: {0}")]
    BackdropFetchFailed(String),

    #[error("Asset load failed: {0}")]
    AssetLoadFailed(String),

    // === Output Errors ===
    #[error("Raster encoding failed: {0}")]
    EncodingFailed(String),
}

impl AlertError {
    /// Whether rendering the same alert again on a later poll can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AlertError::BackdropFetchFailed(_)
            | AlertError::AssetLoadFailed(_)
            | AlertError::EncodingFailed(_) => true,

            AlertError::InvalidAlert(_) | AlertError::Config(_) => false,
        }
    }

    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AlertError::InvalidAlert(_) => "invalid_alert",
            AlertError::Config(_) => "config",
            AlertError::BackdropFetchFailed(_) => "backdrop_fetch_failed",
            AlertError::AssetLoadFailed(_) => "asset_load_failed",
            AlertError::EncodingFailed(_) => "encoding_failed",
        }
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        AlertError::InvalidAlert(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(AlertError::BackdropFetchFailed("503".into()).is_retryable());
        assert!(AlertError::AssetLoadFailed("missing".into()).is_retryable());
        assert!(!AlertError::InvalidAlert("no geometry".into()).is_retryable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AlertError::EncodingFailed("zero-sized image".into());
        assert_eq!(err.to_string(), "Raster encoding failed: zero-sized image");
        assert_eq!(err.kind(), "encoding_failed");
    }
}
