use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::PhotoStorage;
use crate::core::error::{AppError, Result};

/// Photo storage on the local filesystem, rooted at the upload directory
pub struct LocalPhotoStorage {
    root: PathBuf,
}

impl LocalPhotoStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative key under the root; absolute keys and `..` are rejected
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if key.is_empty() || !is_plain {
            return Err(AppError::Internal(format!("Invalid storage key '{}'", key)));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        tokio::fs::try_exists(&path).await.map_err(|e| {
            AppError::Internal(format!("Failed to stat '{}': {}", path.display(), e))
        })
    }

    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    AppError::Internal(format!("'{}' already exists", path.display()))
                } else {
                    AppError::Internal(format!("Failed to create '{}': {}", path.display(), e))
                }
            })?;

        file.write_all(&data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        file.flush().await.map_err(|e| {
            AppError::Internal(format!("Failed to flush '{}': {}", path.display(), e))
        })?;

        tracing::debug!("Stored photo at {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, location: &str) -> Result<()> {
        let path = Path::new(location);
        let key = path
            .strip_prefix(&self.root)
            .map_err(|_| {
                AppError::Internal(format!("'{}' is outside the upload directory", location))
            })?
            .to_string_lossy()
            .into_owned();
        let path = self.resolve(&key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_exists() {
        let dir = TempDir::new().unwrap();
        let storage = LocalPhotoStorage::new(dir.path());

        assert!(!storage.exists("landmarks/Tower/Tower_1.jpg").await.unwrap());

        let location = storage
            .put("landmarks/Tower/Tower_1.jpg", b"jpeg".to_vec(), "image/jpeg")
            .await
            .unwrap();

        assert!(storage.exists("landmarks/Tower/Tower_1.jpg").await.unwrap());
        assert_eq!(
            PathBuf::from(&location),
            dir.path().join("landmarks/Tower/Tower_1.jpg")
        );
        assert_eq!(std::fs::read(&location).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = LocalPhotoStorage::new(dir.path());

        storage
            .put("reviews/dev/dev_1.png", b"first".to_vec(), "image/png")
            .await
            .unwrap();
        let second = storage
            .put("reviews/dev/dev_1.png", b"second".to_vec(), "image/png")
            .await;

        assert!(matches!(second, Err(AppError::Internal(_))));
        let stored = std::fs::read(dir.path().join("reviews/dev/dev_1.png")).unwrap();
        assert_eq!(stored, b"first");
    }

    #[tokio::test]
    async fn test_remove_deletes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let storage = LocalPhotoStorage::new(dir.path());

        let location = storage
            .put("landmarks/Gate/Gate_1.gif", b"gif".to_vec(), "image/gif")
            .await
            .unwrap();

        storage.remove(&location).await.unwrap();
        assert!(!storage.exists("landmarks/Gate/Gate_1.gif").await.unwrap());

        storage.remove(&location).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalPhotoStorage::new(dir.path());

        assert!(storage.exists("../outside.jpg").await.is_err());
        assert!(storage
            .put("/etc/passwd", b"x".to_vec(), "image/png")
            .await
            .is_err());
        assert!(storage.remove("/tmp/not-ours.jpg").await.is_err());
    }
}
