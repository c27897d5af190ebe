//! Logo asset, loaded once and shared across renders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alert_common::{AlertError, AlertResult};
use image::RgbaImage;
use tokio::sync::OnceCell;
use tracing::info;

/// Lazily loaded logo raster.
///
/// A failed load is not cached, so a logo that appears later is picked up
/// on the next render.
#[derive(Debug)]
pub struct LogoStore {
    path: PathBuf,
    image: OnceCell<Arc<RgbaImage>>,
}

impl LogoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: OnceCell::new(),
        }
    }

    /// Store that is already loaded.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            path: PathBuf::new(),
            image: OnceCell::new_with(Some(Arc::new(image))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> AlertResult<Arc<RgbaImage>> {
        self.image
            .get_or_try_init(|| load_logo(&self.path))
            .await
            .cloned()
    }
}

async fn load_logo(path: &Path) -> AlertResult<Arc<RgbaImage>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AlertError::AssetLoadFailed(format!("reading logo {}: {}", path.display(), e))
    })?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| AlertError::AssetLoadFailed(format!("decoding logo {}: {}", path.display(), e)))?
        .to_rgba8();

    if image.width() == 0 || image.height() == 0 {
        return Err(AlertError::AssetLoadFailed(format!(
            "logo {} has no pixels",
            path.display()
        )));
    }

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded logo"
    );
    Ok(Arc::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_logo_is_asset_error() {
        let store = LogoStore::new("/nonexistent/logo.png");
        let err = store.get().await.unwrap_err();
        assert!(matches!(err, AlertError::AssetLoadFailed(_)));
    }

    #[tokio::test]
    async fn test_corrupt_logo_is_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        tokio::fs::write(&path, b"not a png").await.unwrap();

        let err = LogoStore::new(&path).get().await.unwrap_err();
        assert!(matches!(err, AlertError::AssetLoadFailed(_)));
    }

    #[tokio::test]
    async fn test_logo_loaded_once_and_shared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        tokio::fs::write(&path, test_utils::logo_png()).await.unwrap();

        let store = LogoStore::new(&path);
        let first = store.get().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        let second = store.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.dimensions(), (200, 100));
    }

    #[tokio::test]
    async fn test_failed_load_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let store = LogoStore::new(&path);
        assert!(store.get().await.is_err());

        tokio::fs::write(&path, test_utils::logo_png()).await.unwrap();
        assert!(store.get().await.is_ok());
    }
}
