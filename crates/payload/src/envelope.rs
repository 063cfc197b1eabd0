//! Stage trigger and response envelopes

use crate::Payload;
use serde::{Deserialize, Serialize};

/// Status code for a stage that completed normally
pub const STATUS_OK: u16 = 200;

/// Status code for a business-rule rejection
pub const STATUS_REJECTED: u16 = 400;

/// Trigger input for the Classifier and Gate.
///
/// The orchestrator forwards the previous stage's response, so unknown
/// fields such as `statusCode` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    pub body: Payload,
}

/// `{statusCode, body}` record returned by every stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResponse<B> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: B,
}

impl<B> StageResponse<B> {
    pub fn ok(body: B) -> Self {
        Self {
            status_code: STATUS_OK,
            body,
        }
    }

    pub fn rejected(body: B) -> Self {
        Self {
            status_code: STATUS_REJECTED,
            body,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Error marker carried on a rejected response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

/// Body of a response that may carry either a payload or an error marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Payload(Payload),
    Error(ErrorBody),
}

impl From<Payload> for ResponseBody {
    fn from(payload: Payload) -> Self {
        ResponseBody::Payload(payload)
    }
}
