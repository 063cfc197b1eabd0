//! Classifier Lambda - scores the image on the configured endpoint

use classifier::{Classifier, SageMakerEndpoint};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use payload::StageEvent;
use pipeline_lambda::{handle_classify, init_logging, PipelineConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;
    let config = PipelineConfig::from_env()?;
    let classifier_config = config.classifier_config()?;

    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let endpoint = SageMakerEndpoint::new(
        aws_sdk_sagemakerruntime::Client::new(&aws),
        classifier_config.endpoint_name.clone(),
    );
    let classifier = Classifier::new(endpoint, classifier_config);
    info!(
        endpoint = %classifier.config().endpoint_name,
        "Classifier v{} ready",
        env!("CARGO_PKG_VERSION")
    );

    let classifier = &classifier;
    let output_bucket = config.output_bucket();
    run(service_fn(move |event: LambdaEvent<StageEvent>| async move {
        let response = handle_classify(classifier, output_bucket, event.payload).await?;
        Ok::<_, Error>(response)
    }))
    .await
}
