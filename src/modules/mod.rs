//! Infrastructure adapters for external services
//!
//! Photo storage lives here: MinIO/S3 and the local filesystem.

pub mod storage;
