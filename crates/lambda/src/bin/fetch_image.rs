//! Fetcher Lambda - reads the triggering image from S3

use fetcher::{Fetcher, S3Store};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pipeline_lambda::{handle_fetch, init_logging, FetchEvent, PipelineConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;
    let config = PipelineConfig::from_env()?;

    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let fetcher = Fetcher::new(
        S3Store::new(aws_sdk_s3::Client::new(&aws)),
        config.fetcher_config(),
    );
    info!("Fetcher v{} ready", env!("CARGO_PKG_VERSION"));

    let fetcher = &fetcher;
    run(service_fn(move |event: LambdaEvent<FetchEvent>| async move {
        let response = handle_fetch(fetcher, event.payload).await?;
        Ok::<_, Error>(response)
    }))
    .await
}
