//! Payload and storage location

use crate::PayloadError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container and object key the image was read from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocation {
    pub s3_bucket: String,
    pub s3_key: String,
}

impl StorageLocation {
    /// Create a location, rejecting empty bucket or key
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self, PayloadError> {
        let location = Self {
            s3_bucket: bucket.into(),
            s3_key: key.into(),
        };
        location.validate()?;
        Ok(location)
    }

    /// Check that neither part is empty
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.s3_bucket.is_empty() {
            return Err(PayloadError::EmptyField("s3_bucket"));
        }
        if self.s3_key.is_empty() {
            return Err(PayloadError::EmptyField("s3_key"));
        }
        Ok(())
    }

    pub fn bucket(&self) -> &str {
        &self.s3_bucket
    }

    pub fn key(&self) -> &str {
        &self.s3_key
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.s3_bucket, self.s3_key)
    }
}

/// Record threaded between Fetcher, Classifier and Gate.
///
/// Stages never mutate a payload in place: each one consumes the payload it
/// was given and returns a new one. `inferences` stays empty until the
/// Classifier has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Base64 (standard alphabet, padded) image bytes
    pub image_data: String,
    #[serde(flatten)]
    pub location: StorageLocation,
    /// Per-class scores in model output order
    #[serde(default)]
    pub inferences: Vec<f64>,
}

impl Payload {
    /// Build the payload emitted by the Fetcher
    pub fn fetched(location: StorageLocation, bytes: &[u8]) -> Self {
        Self {
            image_data: STANDARD.encode(bytes),
            location,
            inferences: Vec::new(),
        }
    }

    /// Decode `image_data` back to raw bytes
    pub fn decode_image(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.image_data.as_bytes())
    }

    /// Replace the scores, keeping image data and location
    pub fn with_inferences(self, inferences: Vec<f64>) -> Self {
        Self { inferences, ..self }
    }

    /// Re-emit the payload under another bucket, keeping the key
    pub fn relocated(self, bucket: impl Into<String>) -> Self {
        Self {
            location: StorageLocation {
                s3_bucket: bucket.into(),
                s3_key: self.location.s3_key,
            },
            ..self
        }
    }

    /// Whether the Classifier has populated scores
    pub fn is_classified(&self) -> bool {
        !self.inferences.is_empty()
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }
}
