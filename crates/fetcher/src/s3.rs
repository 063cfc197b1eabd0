//! S3-backed object store

use crate::{FetchError, ObjectStore};
use async_trait::async_trait;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client;
use payload::StorageLocation;
use tracing::debug;

/// Object store reading through the S3 `GetObject` API
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get_object()
            .bucket(location.bucket())
            .key(location.key())
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(err) => {
                let status = err.raw_response().map(|raw| raw.status().as_u16());
                return Err(map_get_error(err.into_service_error(), status, location));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| FetchError::Storage(format!("Body read failed: {}", e)))?;
        let bytes = body.into_bytes().to_vec();

        debug!("Downloaded {} bytes from {}", bytes.len(), location);
        Ok(bytes)
    }
}

/// Map a `GetObject` failure onto the stage taxonomy
fn map_get_error(
    err: GetObjectError,
    status: Option<u16>,
    location: &StorageLocation,
) -> FetchError {
    if err.is_no_such_key() {
        return FetchError::not_found(location);
    }
    classify(err.code(), status, location).unwrap_or_else(|| FetchError::Storage(err.to_string()))
}

fn classify(
    code: Option<&str>,
    status: Option<u16>,
    location: &StorageLocation,
) -> Option<FetchError> {
    match (code, status) {
        (Some("NoSuchKey" | "NoSuchBucket"), _) | (_, Some(404)) => {
            Some(FetchError::not_found(location))
        }
        (Some("AccessDenied" | "AllAccessDisabled"), _) | (_, Some(403)) => {
            Some(FetchError::access_denied(location))
        }
        _ => None,
    }
}
