//! Classifier stage implementation

use crate::{ClassifierError, InferenceEndpoint, InferenceError};
use payload::Payload;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Content type tag sent with the image bytes
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Name of the pre-deployed inference endpoint
    pub endpoint_name: String,
    /// Request content type identifying the body as image data
    pub content_type: String,
}

impl ClassifierConfig {
    pub fn new(endpoint_name: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Attaches model scores to a fetched payload
pub struct Classifier<E> {
    endpoint: E,
    config: ClassifierConfig,
}

impl<E: InferenceEndpoint> Classifier<E> {
    pub fn new(endpoint: E, config: ClassifierConfig) -> Self {
        Self { endpoint, config }
    }

    /// Decode the image, run inference and return the payload with scores
    pub async fn classify(&self, payload: Payload) -> Result<Payload, ClassifierError> {
        let start = Instant::now();
        if payload.image_data.is_empty() {
            return Err(ClassifierError::EmptyImage);
        }
        let image = payload.decode_image()?;

        info!(
            endpoint = self.endpoint.name(),
            key = payload.location().key(),
            "Classifying {} byte image",
            image.len()
        );

        let scores = match self
            .endpoint
            .predict(&image, &self.config.content_type)
            .await
            .and_then(|body| parse_scores(&body))
        {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Inference on {} failed: {}", self.endpoint.name(), e);
                return Err(e.into());
            }
        };

        let latency_ms = start.elapsed().as_millis() as f64;
        metrics::histogram!("pipeline_stage_latency_ms", "stage" => "classify").record(latency_ms);
        debug!("Scores: {:?} ({:.0}ms)", scores, latency_ms);

        Ok(payload.with_inferences(scores))
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

/// Parse an endpoint response body: a JSON array of per-class scores
pub fn parse_scores(body: &[u8]) -> Result<Vec<f64>, InferenceError> {
    if body.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }
    let scores: Vec<f64> = serde_json::from_slice(body)
        .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;
    if scores.is_empty() {
        return Err(InferenceError::MalformedResponse(
            "score array is empty".to_string(),
        ));
    }
    Ok(scores)
}
