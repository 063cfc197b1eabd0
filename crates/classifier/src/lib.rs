//! Classifier Stage
//!
//! Decodes the payload image, submits it to a pre-deployed inference
//! endpoint and attaches the returned per-class scores.

mod classifier;
mod sagemaker;
mod stub;

pub use classifier::{parse_scores, Classifier, ClassifierConfig, DEFAULT_CONTENT_TYPE};
pub use sagemaker::SageMakerEndpoint;
pub use stub::StubEndpoint;

use async_trait::async_trait;
use thiserror::Error;

/// Errors talking to the inference endpoint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Endpoint transport failed: {0}")]
    Transport(String),

    #[error("Endpoint returned an error (status {status:?}): {message}")]
    Endpoint { status: Option<u16>, message: String },

    #[error("Endpoint returned an empty body")]
    EmptyResponse,

    #[error("Malformed endpoint response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the Classifier stage
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Payload carries no image data")]
    EmptyImage,

    #[error("Image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// A hosted model accepting binary image requests
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    /// Endpoint identifier, for logging
    fn name(&self) -> &str;

    /// Submit raw image bytes and return the raw response body
    async fn predict(&self, image: &[u8], content_type: &str) -> Result<Vec<u8>, InferenceError>;
}
