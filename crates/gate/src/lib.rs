//! Confidence Gate
//!
//! Decides whether a classified payload continues through the workflow.
//! Passing is a 200 response carrying the payload. A rejection is a 400
//! response carrying only `THRESHOLD_CONFIDENCE_NOT_MET`. Rejection is a
//! terminal business outcome, not an error.

mod config;
mod gate;

pub use config::{GateConfig, DEFAULT_CLASS_LABELS, DEFAULT_THRESHOLD};
pub use gate::{ConfidenceGate, GateOutcome, THRESHOLD_CONFIDENCE_NOT_MET};

use payload::ScoreError;
use thiserror::Error;

/// Errors evaluating the gate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("Payload has not been classified")]
    NotClassified,

    #[error("Scores do not match configured classes: {0}")]
    Scores(#[from] ScoreError),

    #[error("Invalid gate configuration: {0}")]
    InvalidConfig(String),
}
