//! Envelope returned by every remote service call.

use serde::{Deserialize, Serialize};

/// Result envelope produced by backend services.
///
/// Fallback paths build a failed envelope through [`ServiceResult::failure`],
/// which substitutes the payload type's default (empty list, `None`, zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub payload: T,
}

impl<T> ServiceResult<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    pub fn ok_with_message(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            message: self.message,
            payload: f(self.payload),
        }
    }
}

impl<T: Default> ServiceResult<T> {
    /// Failed envelope carrying the default payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: T::default(),
        }
    }
}
