//! API Error Types
//!
//! Errors returned by the diary backend client. The `Display` output of every
//! variant is the message shown to the user in a page's error panel.

use thiserror::Error;

/// Message used when the request never produced an HTTP response
pub const NETWORK_ERROR_MESSAGE: &str = "ネットワークエラーが発生しました";

/// API client error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection refused, DNS failure, timeout, ...
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { message: String },

    /// The response body was not the JSON we expected
    #[error("{message}")]
    Decode { message: String },
}

impl ApiError {
    /// HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        ApiError::Network {
            message: error.to_string(),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Pull a human readable message out of an error response body.
///
/// Looks at `detail`, then `message`. Non-string values (FastAPI validation
/// errors are arrays) are rendered as JSON text. A body that is not JSON at
/// all is used verbatim when non-empty.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["detail", "message"]
            .iter()
            .filter_map(|key| value.get(key))
            .find_map(|field| match field {
                serde_json::Value::Null => None,
                serde_json::Value::Bool(false) => None,
                serde_json::Value::String(s) if s.is_empty() => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) if body.trim().is_empty() => fallback.to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "日記の作成に失敗しました";

    #[test]
    fn test_detail_wins() {
        let body = r#"{"detail": "ユーザーが見つかりません", "message": "ignored"}"#;
        assert_eq!(extract_error_message(body, FALLBACK), "ユーザーが見つかりません");
    }

    #[test]
    fn test_message_used_without_detail() {
        let body = r#"{"message": "quota exceeded"}"#;
        assert_eq!(extract_error_message(body, FALLBACK), "quota exceeded");
    }

    #[test]
    fn test_structured_detail_is_serialized() {
        let body = r#"{"detail": [{"loc": ["body", "content"], "msg": "field required"}]}"#;
        let message = extract_error_message(body, FALLBACK);
        assert!(message.starts_with('['));
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_json_without_known_fields_falls_back() {
        assert_eq!(extract_error_message(r#"{"error": "x"}"#, FALLBACK), FALLBACK);
        assert_eq!(extract_error_message(r#"{"detail": ""}"#, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_raw_text_body() {
        assert_eq!(
            extract_error_message("Internal Server Error", FALLBACK),
            "Internal Server Error"
        );
        assert_eq!(extract_error_message("   ", FALLBACK), FALLBACK);
    }

    #[test]
    fn test_raw_text_kept_verbatim() {
        assert_eq!(
            extract_error_message("  Bad Gateway\n", FALLBACK),
            "  Bad Gateway\n"
        );
    }

    #[test]
    fn test_display_is_user_message() {
        let err = ApiError::Status {
            status: 404,
            message: "日記の取得に失敗しました".to_string(),
        };
        assert_eq!(err.to_string(), "日記の取得に失敗しました");
        assert_eq!(err.status(), Some(404));

        let err = ApiError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
