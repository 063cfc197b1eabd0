//! Drives the three stage handlers the way the workflow orchestrator does:
//! each stage's JSON response becomes the next stage's trigger.

use classifier::{Classifier, ClassifierConfig, ClassifierError, InferenceError, StubEndpoint};
use fetcher::{FetchError, Fetcher, FetcherConfig, InMemoryStore};
use gate::ConfidenceGate;
use payload::{ResponseBody, StageEvent, StageResponse, StorageLocation};
use pipeline_lambda::{handle_classify, handle_fetch, handle_gate, FetchEvent};
use serde_json::{json, Value};

const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

fn store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert(
        StorageLocation::new("images", "test/bicycle_s_001789.png").unwrap(),
        IMAGE.to_vec(),
    );
    store
}

fn forward<T: serde::Serialize>(response: &StageResponse<T>) -> StageEvent {
    let value: Value = serde_json::to_value(response).unwrap();
    serde_json::from_value(value).unwrap()
}

async fn run_pipeline(scores: &[f64], output_bucket: Option<&str>) -> Value {
    let fetcher = Fetcher::new(store(), FetcherConfig::default());
    let classifier = Classifier::new(
        StubEndpoint::with_scores(scores),
        ClassifierConfig::new("image-classification"),
    );
    let gate = ConfidenceGate::default();

    let trigger: FetchEvent = serde_json::from_value(json!({
        "s3_bucket": "images",
        "s3_key": "test/bicycle_s_001789.png",
    }))
    .unwrap();

    let fetched = handle_fetch(&fetcher, trigger).await.unwrap();
    let classified = handle_classify(&classifier, output_bucket, forward(&fetched))
        .await
        .unwrap();
    assert_eq!(classified.body.decode_image().unwrap(), IMAGE);

    let gated = handle_gate(&gate, output_bucket, forward(&classified)).unwrap();
    serde_json::to_value(&gated).unwrap()
}

#[tokio::test]
async fn test_confident_image_flows_through() {
    let output = run_pipeline(&[0.95, 0.10], None).await;

    assert_eq!(output["statusCode"], 200);
    assert_eq!(output["body"]["s3_bucket"], "images");
    assert_eq!(output["body"]["s3_key"], "test/bicycle_s_001789.png");
    assert_eq!(output["body"]["inferences"], json!([0.95, 0.10]));

    let body: ResponseBody = serde_json::from_value(output["body"].clone()).unwrap();
    match body {
        ResponseBody::Payload(payload) => assert_eq!(payload.decode_image().unwrap(), IMAGE),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn test_destination_bucket_applied() {
    let output = run_pipeline(&[0.01, 0.99], Some("classified-images")).await;
    assert_eq!(output["statusCode"], 200);
    assert_eq!(output["body"]["s3_bucket"], "classified-images");
}

#[tokio::test]
async fn test_uncertain_image_stops_workflow() {
    let output = run_pipeline(&[0.80, 0.70], None).await;
    assert_eq!(
        output,
        json!({"statusCode": 400, "body": {"error_message": "THRESHOLD_CONFIDENCE_NOT_MET"}})
    );
}

#[tokio::test]
async fn test_extra_model_outputs_flow_through() {
    let output = run_pipeline(&[0.01, 0.97, 0.02], None).await;
    assert_eq!(output["statusCode"], 200);
    assert_eq!(output["body"]["inferences"], json!([0.01, 0.97, 0.02]));
}

#[tokio::test]
async fn test_boundary_score_stops_workflow() {
    let output = run_pipeline(&[0.93, 0.93], None).await;
    assert_eq!(output["statusCode"], 400);
}

#[tokio::test]
async fn test_missing_object_surfaces_not_found() {
    let fetcher = Fetcher::new(store(), FetcherConfig::default());
    let trigger = StorageLocation::new("images", "test/absent.png").unwrap();

    let err = handle_fetch(&fetcher, trigger).await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn test_endpoint_timeout_surfaces_inference_error() {
    let fetcher = Fetcher::new(store(), FetcherConfig::default());
    let classifier = Classifier::new(
        StubEndpoint::failing(InferenceError::Transport("timed out".to_string())),
        ClassifierConfig::new("image-classification"),
    );

    let trigger = StorageLocation::new("images", "test/bicycle_s_001789.png").unwrap();
    let fetched = handle_fetch(&fetcher, trigger).await.unwrap();
    let err = handle_classify(&classifier, None, forward(&fetched))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClassifierError::Inference(InferenceError::Transport(_))
    ));
}
