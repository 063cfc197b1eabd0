//! Threshold decision

use crate::{GateConfig, GateError};
use payload::{ClassScores, ErrorBody, Payload, ResponseBody, StageResponse};
use tracing::{debug, info};

/// Error marker returned when no class clears the threshold
pub const THRESHOLD_CONFIDENCE_NOT_MET: &str = "THRESHOLD_CONFIDENCE_NOT_MET";

/// Terminal result of the gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// A class cleared the threshold; the payload continues
    Passed {
        payload: Payload,
        class: String,
        score: f64,
    },
    /// No class cleared the threshold; the payload is dropped
    Rejected { class: String, score: f64 },
}

impl GateOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, GateOutcome::Passed { .. })
    }

    /// Stage output: 200 with the payload, or 400 with only the error marker
    pub fn into_response(self) -> StageResponse<ResponseBody> {
        match self {
            GateOutcome::Passed { payload, .. } => {
                StageResponse::ok(ResponseBody::Payload(payload))
            }
            GateOutcome::Rejected { .. } => StageResponse::rejected(ResponseBody::Error(ErrorBody {
                error_message: THRESHOLD_CONFIDENCE_NOT_MET.to_string(),
            })),
        }
    }
}

/// Confidence gate over named class scores
#[derive(Debug, Clone, Default)]
pub struct ConfidenceGate {
    config: GateConfig,
}

impl ConfidenceGate {
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Decide whether the payload meets the confidence threshold
    pub fn evaluate(&self, payload: Payload) -> Result<GateOutcome, GateError> {
        if !payload.is_classified() {
            return Err(GateError::NotClassified);
        }

        let scores =
            ClassScores::from_inferences(self.config.class_labels.as_slice(), &payload.inferences)?;
        let (class, score) = scores
            .top()
            .map(|(class, score)| (class.to_string(), score))
            .ok_or(GateError::NotClassified)?;

        let meets_threshold = scores.iter().any(|(_, s)| s > self.config.threshold);
        debug!(
            "Top class {} at {:.4} against threshold {}",
            class, score, self.config.threshold
        );

        if meets_threshold {
            metrics::counter!("pipeline_gate_decisions_total", "outcome" => "passed").increment(1);
            info!(
                class = %class,
                score,
                key = payload.location().key(),
                "Confidence threshold met"
            );
            Ok(GateOutcome::Passed {
                payload,
                class,
                score,
            })
        } else {
            metrics::counter!("pipeline_gate_decisions_total", "outcome" => "rejected")
                .increment(1);
            info!(
                class = %class,
                score,
                key = payload.location().key(),
                "Confidence threshold not met"
            );
            Ok(GateOutcome::Rejected { class, score })
        }
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }
}
