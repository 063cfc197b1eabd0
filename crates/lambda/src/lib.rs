//! Image Confidence Pipeline - Lambda Entry Points
//!
//! Each stage runs as its own Lambda function. The workflow orchestrator
//! sequences them, forwards each response into the next trigger, and owns
//! retries. Handlers here are plain async functions so they can be driven
//! without the Lambda runtime.

mod handlers;
mod settings;

pub use handlers::{handle_classify, handle_fetch, handle_gate, FetchEvent};
pub use settings::{PipelineConfig, ENV_PREFIX};

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging; `RUST_LOG` overrides the default `info` level
pub fn init_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .finish()
        .try_init()
}
