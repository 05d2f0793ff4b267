use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

pub const STATUS_SUCCESS: &str = "success";

/// `{ code, status, message, data }` wrapper around every backend response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case(STATUS_SUCCESS))
            .unwrap_or(true)
    }

    /// Non-success status becomes [`ApiError::Business`]; `data` may still be absent
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Business {
                message: self.message.unwrap_or_default(),
                details: self.details,
            })
        }
    }

    /// Like [`into_result`](Self::into_result) but `data` is required
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Collection responses: missing `data` is an empty list
    pub fn into_list(self) -> Result<Vec<T>, ApiError> {
        Ok(self.into_result()?.unwrap_or_default())
    }
}
