//! SageMaker runtime endpoint

use crate::{InferenceEndpoint, InferenceError};
use async_trait::async_trait;
use aws_sdk_sagemakerruntime::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_sagemakerruntime::primitives::Blob;
use aws_sdk_sagemakerruntime::Client;
use tracing::debug;

/// Inference endpoint invoked through `InvokeEndpoint`
#[derive(Clone)]
pub struct SageMakerEndpoint {
    client: Client,
    endpoint_name: String,
}

impl SageMakerEndpoint {
    pub fn new(client: Client, endpoint_name: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_name: endpoint_name.into(),
        }
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    fn name(&self) -> &str {
        &self.endpoint_name
    }

    async fn predict(&self, image: &[u8], content_type: &str) -> Result<Vec<u8>, InferenceError> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type(content_type)
            .accept("application/json")
            .body(Blob::new(image))
            .send()
            .await
            .map_err(|err| match err {
                SdkError::ServiceError(_) | SdkError::ResponseError(_) => InferenceError::Endpoint {
                    status: err.raw_response().map(|raw| raw.status().as_u16()),
                    message: err.message().unwrap_or("unknown error").to_string(),
                },
                other => InferenceError::Transport(other.to_string()),
            })?;

        let body = output.body.ok_or(InferenceError::EmptyResponse)?.into_inner();
        debug!(
            endpoint = %self.endpoint_name,
            "Endpoint returned {} bytes",
            body.len()
        );
        Ok(body)
    }
}
