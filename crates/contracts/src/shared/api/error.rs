use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of a backend call, classified by HTTP status or transport
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400: the backend rejected the request data
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    /// 401 or no token in storage
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Envelope arrived with a status other than `success`
    #[error("{message}")]
    Business {
        message: String,
        details: Option<Value>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Error body as sent by the backend's exception handler.
/// Only the fields the console reads are declared.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ApiError {
    /// Maps a non-2xx response. A JSON body contributes its `message`
    /// (or `error`) field; anything else is used as raw text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            400 => ApiError::Validation {
                message,
                details: parsed.details,
            },
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(message),
            409 | 422 => ApiError::Business {
                message,
                details: parsed.details,
            },
            _ => ApiError::Server { status, message },
        }
    }

    /// Structured detail object attached to a validation or business error
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Validation { details, .. } | ApiError::Business { details, .. } => {
                details.as_ref()
            }
            _ => None,
        }
    }

    /// Backend-supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::Business { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Server { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Vietnamese text shown to the user
    pub fn user_message(&self) -> String {
        let fallback = |message: &str, default: &str| {
            if message.is_empty() {
                default.to_string()
            } else {
                message.to_string()
            }
        };

        match self {
            ApiError::Validation { message, .. } => fallback(message, "Dữ liệu không hợp lệ"),
            ApiError::Unauthorized => {
                "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.".to_string()
            }
            ApiError::Forbidden => "Bạn không có quyền thực hiện thao tác này.".to_string(),
            ApiError::NotFound(message) => fallback(message, "Không tìm thấy dữ liệu"),
            ApiError::Server { message, .. } => {
                fallback(message, "Lỗi máy chủ. Vui lòng thử lại sau.")
            }
            ApiError::Business { message, .. } => fallback(message, "Thao tác không thành công"),
            ApiError::Network(_) => {
                "Không thể kết nối đến máy chủ. Vui lòng kiểm tra kết nối mạng.".to_string()
            }
            ApiError::Timeout => "Máy chủ không phản hồi. Vui lòng thử lại.".to_string(),
            ApiError::Decode(_) => "Dữ liệu phản hồi không hợp lệ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let body = r#"{"code":400,"status":"error","message":"Số lượng tồn kho không đủ!","data":null}"#;
        assert_eq!(
            ApiError::from_status(400, body),
            ApiError::Validation {
                message: "Số lượng tồn kho không đủ!".into(),
                details: None
            }
        );
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "{}"), ApiError::Forbidden);
        assert_eq!(
            ApiError::from_status(404, r#"{"message":"Không tìm thấy đại lý!"}"#),
            ApiError::NotFound("Không tìm thấy đại lý!".into())
        );
        assert_eq!(
            ApiError::from_status(500, "boom"),
            ApiError::Server {
                status: 500,
                message: "boom".into()
            }
        );
    }

    #[test]
    fn test_error_field_used_when_message_missing() {
        let err = ApiError::from_status(502, r#"{"error":"Bad Gateway"}"#);
        assert_eq!(err.server_message(), Some("Bad Gateway"));
    }

    #[test]
    fn test_details_are_kept() {
        let body = r#"{"message":"x","details":{"requested":10,"available":3}}"#;
        let err = ApiError::from_status(400, body);
        let details = err.details().expect("details");
        assert_eq!(details["available"], 3);
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(
            ApiError::from_status(500, "").user_message(),
            "Lỗi máy chủ. Vui lòng thử lại sau."
        );
        assert_eq!(
            ApiError::from_status(404, r#"{"message":"Không tìm thấy mặt hàng!"}"#).user_message(),
            "Không tìm thấy mặt hàng!"
        );
        assert!(ApiError::Timeout.user_message().contains("không phản hồi"));
    }
}
