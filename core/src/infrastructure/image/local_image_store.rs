use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::{error, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, value_objects::UserId},
    image::{
        entities::{FoodImage, ImageReference},
        ports::ImageStore,
    },
};

/// Image artifacts on the local filesystem, laid out as
/// `<root>/<user_id>/<uuid>.<ext>`. References hold paths relative to the root.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(CoreError::StorageError(format!(
                "invalid image path {}",
                relative.display()
            )));
        }

        Ok(self.root.join(relative))
    }
}

impl ImageStore for LocalImageStore {
    #[instrument(skip(self, image), fields(size_bytes = image.data.len()))]
    async fn save(&self, user_id: &UserId, image: &FoodImage) -> Result<ImageReference, CoreError> {
        let checksum_sha256 = hex::encode(Sha256::digest(&image.data));
        let relative = format!(
            "{}/{}.{}",
            user_id.as_str(),
            generate_uuid_v7(),
            image.mime_type.extension()
        );
        let path = self.resolve(&relative)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create image directory: {}", e);
                CoreError::StorageError(format!("Failed to store image: {}", e))
            })?;
        }

        tokio::fs::write(&path, &image.data).await.map_err(|e| {
            error!("Failed to write image {}: {}", path.display(), e);
            CoreError::StorageError(format!("Failed to store image: {}", e))
        })?;

        Ok(ImageReference {
            path: relative,
            mime_type: image.mime_type,
            size_bytes: image.size_bytes(),
            width: image.width,
            height: image.height,
            checksum_sha256,
            source: image.source,
            original_name: image.original_name.clone(),
        })
    }

    async fn load(&self, reference: &ImageReference) -> Result<Bytes, CoreError> {
        let path = self.resolve(&reference.path)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            error!("Failed to read image {}: {}", path.display(), e);
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::NotFound
            } else {
                CoreError::StorageError(format!("Failed to read image: {}", e))
            }
        })?;

        Ok(Bytes::from(data))
    }

    async fn delete(&self, reference: &ImageReference) -> Result<(), CoreError> {
        let path = self.resolve(&reference.path)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to delete image {}: {}", path.display(), e);
                Err(CoreError::StorageError(format!("Failed to delete image: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::image::{
        entities::{ImageMimeType, ImageSource},
        services::test_images,
    };

    fn food_image() -> FoodImage {
        FoodImage {
            data: test_images::png(),
            mime_type: ImageMimeType::Png,
            width: 4,
            height: 3,
            original_name: Some("plate.png".to_string()),
            source: ImageSource::Camera,
        }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path());
        let image = food_image();

        let reference = store
            .save(&UserId::parse("alice").unwrap(), &image)
            .await
            .unwrap();

        assert!(reference.path.starts_with("alice/"));
        assert!(reference.path.ends_with(".png"));
        assert_eq!(reference.size_bytes, image.data.len() as u64);
        assert_eq!(reference.checksum_sha256.len(), 64);
        assert_eq!(reference.source, ImageSource::Camera);
        assert_eq!(store.load(&reference).await.unwrap(), image.data);
    }

    #[tokio::test]
    async fn test_load_rejects_escaping_path() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path());
        let mut reference = store
            .save(&UserId::parse("alice").unwrap(), &food_image())
            .await
            .unwrap();
        reference.path = "../outside.png".to_string();

        let err = store.load(&reference).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path());
        let mut reference = store
            .save(&UserId::parse("alice").unwrap(), &food_image())
            .await
            .unwrap();
        reference.path = "alice/gone.png".to_string();

        assert_eq!(store.load(&reference).await.unwrap_err(), CoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path());
        let reference = store
            .save(&UserId::parse("alice").unwrap(), &food_image())
            .await
            .unwrap();

        store.delete(&reference).await.unwrap();
        assert!(!dir.path().join(&reference.path).exists());

        store.delete(&reference).await.unwrap();
    }
}
