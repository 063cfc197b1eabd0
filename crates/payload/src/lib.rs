//! Pipeline Payload Contract
//!
//! Types that cross stage boundaries through the orchestrator:
//! - `Payload` with base64 image data, source location and scores
//! - `StageEvent` / `StageResponse` envelopes (`body`, `statusCode`)
//! - `ClassScores` mapping class labels to model scores

mod envelope;
mod payload;
mod scores;

pub use envelope::{ErrorBody, ResponseBody, StageEvent, StageResponse, STATUS_OK, STATUS_REJECTED};
pub use payload::{Payload, StorageLocation};
pub use scores::ClassScores;

use thiserror::Error;

/// Errors while building payload values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// Required field was empty
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
}

/// Errors while mapping raw scores onto class labels
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// Score vector is shorter than the configured label count
    #[error("Score vector has {actual} entries, expected at least {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Score was NaN or infinite
    #[error("Score for class {label} is not finite")]
    NotFinite { label: String },
}
