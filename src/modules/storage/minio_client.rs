//! MinIO/S3-compatible photo storage
//!
//! Photos live under a single publicly readable prefix of one bucket and
//! are referenced from the database by their public URL.

use async_trait::async_trait;
use axum::http::{header::IF_NONE_MATCH, HeaderMap, HeaderValue};
use chrono::Utc;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};

use super::sigv4::{CanonicalRequest, SigV4Signer};
use super::PhotoStorage;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    http_client: Client,
}

impl MinIOClient {
    /// Connect to the bucket, creating it and its public read policy when missing
    pub async fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to open MinIO bucket: {}", e)))?;
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: trim_slash(config.endpoint),
            public_endpoint: trim_slash(config.public_endpoint),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        client.ensure_bucket_exists().await;
        client.set_public_read_policy().await;

        info!(
            "MinIO photo storage ready (endpoint: {}, bucket: {}, prefix: {})",
            client.endpoint,
            client.bucket.name(),
            client.public_prefix
        );

        Ok(client)
    }

    async fn ensure_bucket_exists(&self) {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    async fn set_public_read_policy(&self) {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{}/{}/*", bucket_name, self.public_prefix)]
                }
            ]
        })
        .to_string();

        if let Err(e) = self.put_bucket_policy(&bucket_name, &policy).await {
            warn!(
                "Failed to set read policy on '{}': {}. \
                Set it manually with: mc anonymous set download minio/{}/{}",
                bucket_name, e, bucket_name, self.public_prefix
            );
        } else {
            info!("Public read enabled for {}/{}/*", bucket_name, self.public_prefix);
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let canonical_uri = format!("/{}", bucket_name);
        let signer = SigV4Signer {
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.region_name,
            service: "s3",
        };
        let signed = signer.sign(
            &CanonicalRequest {
                method: "PUT",
                host: &host_header,
                uri: &canonical_uri,
                query: "policy=",
                payload: policy.as_bytes(),
            },
            Utc::now(),
        )?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host_header)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::Internal(format!(
            "Failed to set bucket policy: {} - {}",
            status, body
        )))
    }

    /// Full object key for a photo key
    fn object_key(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }

    /// Public URL of an object; path segments are percent-encoded
    pub fn public_url(&self, object_key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_endpoint,
            self.bucket.name(),
            encode_key(object_key)
        )
    }

    /// Object key of a URL produced by [`MinIOClient::public_url`] (or the internal endpoint)
    pub fn extract_key_from_url(&self, url: &str) -> Option<String> {
        let bucket = self.bucket.name();
        [&self.public_endpoint, &self.endpoint]
            .into_iter()
            .find_map(|endpoint| url.strip_prefix(&format!("{}/{}/", endpoint, bucket)))
            .and_then(|encoded| urlencoding::decode(encoded).ok())
            .map(|key| key.into_owned())
    }
}

#[async_trait]
impl PhotoStorage for MinIOClient {
    async fn exists(&self, key: &str) -> Result<bool> {
        let object_key = self.object_key(key);
        match self.bucket.head_object(&object_key).await {
            Ok((_, 200..=299)) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, code)) => Err(AppError::Internal(format!(
                "Unexpected status {} checking '{}'",
                code, object_key
            ))),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::Internal(format!(
                        "Failed to check if '{}' exists: {}",
                        object_key, e
                    )))
                }
            }
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let object_key = self.object_key(key);
        let response = self
            .bucket
            .put_object_with_content_type_and_headers(
                &object_key,
                &data,
                content_type,
                Some(create_only_headers()),
            )
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to upload '{}': {}", object_key, e))
            })?;

        if !(200..300).contains(&response.status_code()) {
            return Err(AppError::Internal(format!(
                "Upload of '{}' returned status {}",
                object_key,
                response.status_code()
            )));
        }

        debug!("Uploaded '{}' to bucket '{}'", object_key, self.bucket.name());
        Ok(self.public_url(&object_key))
    }

    async fn remove(&self, location: &str) -> Result<()> {
        let object_key = self.extract_key_from_url(location).ok_or_else(|| {
            AppError::Internal(format!("'{}' is not a URL of this bucket", location))
        })?;

        self.bucket
            .delete_object(&object_key)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to delete '{}': {}", object_key, e))
            })?;

        debug!("Deleted '{}' from bucket '{}'", object_key, self.bucket.name());
        Ok(())
    }
}

/// Makes the store reject a PUT onto an existing key with 412
fn create_only_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
    headers
}

fn trim_slash(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
