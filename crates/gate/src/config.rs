//! Gate configuration

use crate::GateError;
use serde::{Deserialize, Serialize};

/// Confidence a class score must strictly exceed
pub const DEFAULT_THRESHOLD: f64 = 0.93;

/// Class labels in model output order
pub const DEFAULT_CLASS_LABELS: [&str; 2] = ["bicycle", "motorcycle"];

/// Gate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Confidence cutoff; a score equal to it does not pass
    pub threshold: f64,
    /// Labels for the leading model outputs, in output order
    pub class_labels: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            class_labels: DEFAULT_CLASS_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl GateConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), GateError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(GateError::InvalidConfig(format!(
                "threshold {} must be in (0, 1]",
                self.threshold
            )));
        }
        if self.class_labels.is_empty() {
            return Err(GateError::InvalidConfig(
                "at least one class label is required".to_string(),
            ));
        }
        if self.class_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(GateError::InvalidConfig(
                "class labels must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
