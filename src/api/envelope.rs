// src/api/envelope.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::JobdagError;

/// `ret` used when a success payload could not be encoded.
pub const ENCODE_FAILED: i32 = -99;

/// Uniform response shape for every control-plane operation.
///
/// Serializes as `{"ret": 0, "data": ...}` on success and
/// `{"ret": <negative>, "msg": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { ret: i32, data: Value },
    Failure { ret: i32, msg: String },
}

impl Envelope {
    pub fn success<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Envelope::Success { ret: 0, data },
            Err(err) => Envelope::failure(ENCODE_FAILED, err),
        }
    }

    pub fn failure(ret: i32, msg: impl ToString) -> Self {
        Envelope::Failure {
            ret,
            msg: msg.to_string(),
        }
    }

    /// Turn an operation result into an envelope, choosing the failure code
    /// with `code_of`.
    pub fn respond<T: Serialize>(
        result: crate::errors::Result<T>,
        code_of: impl FnOnce(&JobdagError) -> i32,
    ) -> Self {
        match result {
            Ok(data) => Envelope::success(&data),
            Err(err) => {
                let ret = code_of(&err);
                debug!(ret, error = %err, "request failed");
                Envelope::failure(ret, err)
            }
        }
    }

    pub fn ret(&self) -> i32 {
        match self {
            Envelope::Success { ret, .. } | Envelope::Failure { ret, .. } => *ret,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success { data, .. } => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn msg(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { msg, .. } => Some(msg),
        }
    }

    /// Indented JSON, as written to the transport.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|err| format!(r#"{{"ret": {ENCODE_FAILED}, "msg": "{err}"}}"#))
    }
}
