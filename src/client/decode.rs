//! Error body decoding
//!
//! The backend answers failures with a binary-typed body holding UTF-8 JSON
//! of the shape `{"detail": "..."}`. Decoding happens in two stages (text,
//! then JSON) and each stage has its own failure.

use serde_json::Value;
use thiserror::Error;

use super::error::UNEXPECTED_ERROR;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("error body is not valid UTF-8")]
    NotUtf8,

    #[error("error body is not JSON: {0}")]
    NotJson(String),

    #[error("error body has no string `detail` field")]
    MissingDetail,
}

/// Extract the `detail` string from an error body
pub fn decode_error_body(body: &[u8]) -> Result<String, DecodeError> {
    let text = std::str::from_utf8(body).map_err(|_| DecodeError::NotUtf8)?;
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::NotJson(e.to_string()))?;

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => Ok(detail.clone()),
        _ => Err(DecodeError::MissingDetail),
    }
}

/// Message to surface for an error body
///
/// `fallback` is used when the body is JSON but carries no usable `detail`;
/// anything that is not UTF-8 JSON yields [`UNEXPECTED_ERROR`].
pub fn error_message(body: &[u8], fallback: &str) -> String {
    match decode_error_body(body) {
        Ok(detail) => detail,
        Err(DecodeError::MissingDetail) => fallback.to_string(),
        Err(_) => UNEXPECTED_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::CONVERSION_FAILED;

    #[test]
    fn test_detail_is_returned() {
        let body = br#"{"detail": "Unsupported format"}"#;
        assert_eq!(decode_error_body(body).unwrap(), "Unsupported format");
        assert_eq!(error_message(body, CONVERSION_FAILED), "Unsupported format");
    }

    #[test]
    fn test_non_utf8_body() {
        let body = [0xff, 0xfe, 0x00];
        assert_eq!(decode_error_body(&body), Err(DecodeError::NotUtf8));
        assert_eq!(error_message(&body, CONVERSION_FAILED), UNEXPECTED_ERROR);
    }

    #[test]
    fn test_non_json_body() {
        let body = b"<html>Internal Server Error</html>";
        assert!(matches!(decode_error_body(body), Err(DecodeError::NotJson(_))));
        assert_eq!(error_message(body, CONVERSION_FAILED), UNEXPECTED_ERROR);
    }

    #[test]
    fn test_json_without_string_detail_uses_fallback() {
        // FastAPI validation errors carry a list under `detail`
        let body = br#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}]}"#;
        assert_eq!(decode_error_body(body), Err(DecodeError::MissingDetail));
        assert_eq!(error_message(body, CONVERSION_FAILED), CONVERSION_FAILED);

        assert_eq!(error_message(br#"{"error": "x"}"#, "fallback"), "fallback");
        assert_eq!(error_message(br#"{"detail": ""}"#, "fallback"), "fallback");
        assert_eq!(error_message(b"[1, 2]", "fallback"), "fallback");
    }

    #[test]
    fn test_empty_body_is_unexpected() {
        assert_eq!(error_message(b"", CONVERSION_FAILED), UNEXPECTED_ERROR);
    }
}
