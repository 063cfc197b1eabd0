//! Fetcher Stage
//!
//! Reads an image from object storage and returns it as a base64 payload
//! with an empty score list. Storage errors are surfaced, never retried.

mod fetcher;
mod memory;
mod s3;

pub use fetcher::{Fetcher, FetcherConfig};
pub use memory::InMemoryStore;
pub use s3::S3Store;

use async_trait::async_trait;
use payload::StorageLocation;
use thiserror::Error;

/// Errors while fetching an object
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid storage location: {0}")]
    InvalidLocation(#[from] payload::PayloadError),

    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Access denied: s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("Storage request failed: {0}")]
    Storage(String),

    #[error("Scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl FetchError {
    pub fn not_found(location: &StorageLocation) -> Self {
        FetchError::NotFound {
            bucket: location.bucket().to_string(),
            key: location.key().to_string(),
        }
    }

    pub fn access_denied(location: &StorageLocation) -> Self {
        FetchError::AccessDenied {
            bucket: location.bucket().to_string(),
            key: location.key().to_string(),
        }
    }
}

/// Read access to a content store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full contents of an object
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, FetchError>;
}
