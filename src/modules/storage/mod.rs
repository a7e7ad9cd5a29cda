//! Storage module for uploaded photo binaries
//!
//! A deployment writes photos either to the local disk or to a MinIO/S3
//! bucket, never both. Services only see the [`PhotoStorage`] port.

mod local_storage;
mod minio_client;
mod sigv4;

use async_trait::async_trait;

use crate::core::error::Result;

pub use local_storage::LocalPhotoStorage;
pub use minio_client::MinIOClient;

/// Port for persisting photo binaries under generated keys
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Whether an object already occupies `key`
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Store `data` under `key` and return the resolved path or public URL.
    ///
    /// Never overwrites: writing to an occupied key fails. Callers pick a free
    /// key with [`PhotoStorage::exists`] first.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Remove the object at a location previously returned by `put`
    async fn remove(&self, location: &str) -> Result<()>;
}
