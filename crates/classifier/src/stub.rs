//! Canned inference endpoint

use crate::{InferenceEndpoint, InferenceError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Endpoint returning a fixed response, for tests and local runs
pub struct StubEndpoint {
    name: String,
    response: Result<Vec<u8>, InferenceError>,
    requests: Mutex<Vec<(Vec<u8>, String)>>,
}

impl StubEndpoint {
    /// Respond with the given body to every request
    pub fn responding(body: impl Into<Vec<u8>>) -> Self {
        Self {
            name: "stub".to_string(),
            response: Ok(body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Respond with a JSON array of scores
    pub fn with_scores(scores: &[f64]) -> Self {
        let body = serde_json::to_vec(scores).unwrap_or_default();
        Self::responding(body)
    }

    /// Fail every request with the given error
    pub fn failing(error: InferenceError) -> Self {
        Self {
            name: "stub".to_string(),
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far as `(image bytes, content type)`
    pub fn requests(&self) -> Vec<(Vec<u8>, String)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl InferenceEndpoint for StubEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, image: &[u8], content_type: &str) -> Result<Vec<u8>, InferenceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((image.to_vec(), content_type.to_string()));
        }
        self.response.clone()
    }
}
