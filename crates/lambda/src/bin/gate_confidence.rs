//! Gate Lambda - continues or stops the workflow on model confidence

use gate::ConfidenceGate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use payload::StageEvent;
use pipeline_lambda::{handle_gate, init_logging, PipelineConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;
    let config = PipelineConfig::from_env()?;
    let gate = ConfidenceGate::new(config.gate_config())?;
    info!(
        threshold = gate.threshold(),
        "Gate v{} ready",
        env!("CARGO_PKG_VERSION")
    );

    let gate = &gate;
    let output_bucket = config.output_bucket();
    run(service_fn(move |event: LambdaEvent<StageEvent>| async move {
        let response = handle_gate(gate, output_bucket, event.payload)?;
        Ok::<_, Error>(response)
    }))
    .await
}
