//! Minimal AWS Signature Version 4 signing for the few raw S3 calls
//! rust-s3 does not cover (bucket policy).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

pub struct SigV4Signer<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
    pub service: &'a str,
}

/// Header values to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub payload_hash: String,
    pub authorization: String,
}

/// The parts of a request that enter the canonical form
pub struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub uri: &'a str,
    pub query: &'a str,
    pub payload: &'a [u8],
}

impl SigV4Signer<'_> {
    pub fn sign(
        &self,
        request: &CanonicalRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders, AppError> {
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(request.payload));

        let canonical = format!(
            "{}\n{}\n{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
            request.method,
            request.uri,
            request.query,
            request.host,
            payload_hash,
            amz_date,
            SIGNED_HEADERS,
            payload_hash
        );

        let scope = format!(
            "{}/{}/{}/aws4_request",
            date_stamp, self.region, self.service
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical.as_bytes()))
        );

        let signing_key = self.signing_key(&date_stamp)?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        Ok(SignedHeaders {
            authorization: format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.access_key, scope, SIGNED_HEADERS, signature
            ),
            amz_date,
            payload_hash,
        })
    }

    fn signing_key(&self, date_stamp: &str) -> Result<Vec<u8>, AppError> {
        let secret = format!("AWS4{}", self.secret_key);
        let k_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes())?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        hmac_sha256(&k_service, b"aws4_request")
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
