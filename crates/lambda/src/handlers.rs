//! Stage handlers

use classifier::{Classifier, ClassifierError, InferenceEndpoint};
use fetcher::{FetchError, Fetcher, ObjectStore};
use gate::{ConfidenceGate, GateError};
use payload::{Payload, ResponseBody, StageEvent, StageResponse, StorageLocation};
use tracing::info;

/// Fetcher trigger: `{"s3_bucket": .., "s3_key": ..}`
pub type FetchEvent = StorageLocation;

/// Fetch the referenced image and emit an unclassified payload
pub async fn handle_fetch<S: ObjectStore>(
    fetcher: &Fetcher<S>,
    event: FetchEvent,
) -> Result<StageResponse<Payload>, FetchError> {
    info!(bucket = event.bucket(), key = event.key(), "Fetch event received");
    let payload = fetcher.fetch(&event).await?;
    Ok(StageResponse::ok(payload))
}

/// Attach model scores to the payload in the event body
pub async fn handle_classify<E: InferenceEndpoint>(
    classifier: &Classifier<E>,
    output_bucket: Option<&str>,
    event: StageEvent,
) -> Result<StageResponse<Payload>, ClassifierError> {
    let payload = classifier.classify(event.body).await?;
    Ok(StageResponse::ok(reemit(payload, output_bucket)))
}

/// Apply the confidence gate to the payload in the event body
pub fn handle_gate(
    gate: &ConfidenceGate,
    output_bucket: Option<&str>,
    event: StageEvent,
) -> Result<StageResponse<ResponseBody>, GateError> {
    let outcome = gate.evaluate(reemit(event.body, output_bucket))?;
    Ok(outcome.into_response())
}

fn reemit(payload: Payload, output_bucket: Option<&str>) -> Payload {
    match output_bucket {
        Some(bucket) => payload.relocated(bucket),
        None => payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classifier::{ClassifierConfig, StubEndpoint};
    use fetcher::{FetcherConfig, InMemoryStore};
    use serde_json::json;

    fn event(inferences: Vec<f64>) -> StageEvent {
        let location = StorageLocation::new("images", "test/bicycle.png").unwrap();
        StageEvent {
            body: Payload::fetched(location, b"abc").with_inferences(inferences),
        }
    }

    #[tokio::test]
    async fn test_fetch_response_shape() {
        let location = StorageLocation::new("images", "test/bicycle.png").unwrap();
        let store = InMemoryStore::new();
        store.insert(location.clone(), b"abc".to_vec());
        let fetcher = Fetcher::new(store, FetcherConfig::default());

        let event: FetchEvent = serde_json::from_value(json!({
            "s3_bucket": "images",
            "s3_key": "test/bicycle.png",
        }))
        .unwrap();
        let response = handle_fetch(&fetcher, event).await.unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "body": {
                    "image_data": "YWJj",
                    "s3_bucket": "images",
                    "s3_key": "test/bicycle.png",
                    "inferences": [],
                }
            })
        );
    }

    #[tokio::test]
    async fn test_classify_passes_source_bucket_through() {
        let classifier = Classifier::new(
            StubEndpoint::with_scores(&[0.4, 0.6]),
            ClassifierConfig::new("endpoint"),
        );
        let response = handle_classify(&classifier, None, event(vec![])).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.location().bucket(), "images");
        assert_eq!(response.body.inferences, vec![0.4, 0.6]);
    }

    #[tokio::test]
    async fn test_classify_applies_output_bucket() {
        let classifier = Classifier::new(
            StubEndpoint::with_scores(&[0.4, 0.6]),
            ClassifierConfig::new("endpoint"),
        );
        let response = handle_classify(&classifier, Some("classified"), event(vec![]))
            .await
            .unwrap();
        assert_eq!(response.body.location().bucket(), "classified");
        assert_eq!(response.body.location().key(), "test/bicycle.png");
    }

    #[test]
    fn test_gate_pass_and_reject() {
        let gate = ConfidenceGate::default();

        let passed = handle_gate(&gate, Some("classified"), event(vec![0.95, 0.10])).unwrap();
        assert_eq!(passed.status_code, 200);
        match passed.body {
            ResponseBody::Payload(payload) => {
                assert_eq!(payload.location().bucket(), "classified");
                assert_eq!(payload.inferences, vec![0.95, 0.10]);
            }
            other => panic!("unexpected body: {other:?}"),
        }

        let rejected = handle_gate(&gate, None, event(vec![0.80, 0.70])).unwrap();
        assert_eq!(
            serde_json::to_value(&rejected).unwrap(),
            json!({"statusCode": 400, "body": {"error_message": "THRESHOLD_CONFIDENCE_NOT_MET"}})
        );
    }

    #[test]
    fn test_gate_on_unclassified_payload_errors() {
        let err = handle_gate(&ConfidenceGate::default(), None, event(vec![])).unwrap_err();
        assert_eq!(err, GateError::NotClassified);
    }
}
