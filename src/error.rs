//! Unified SDK error types.

use serde::Deserialize;
use thiserror::Error;

use crate::http::headers::ResponseHeaders;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// Caller errors detected before any network action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter is absent or empty.
    #[error("Missing required parameter `{0}`")]
    MissingParameter(String),

    /// A header name or value cannot be sent.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// A parameter value is malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Parameters could not be URL-encoded.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, proxy unreachable.
    Connect,
    /// Connect or overall timeout elapsed.
    Timeout,
    /// TLS material could not be loaded or the handshake failed.
    Tls,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read.
    Body,
}

/// Network-level failure: no HTTP status was obtained.
#[derive(Error, Debug, Clone)]
#[error("API call to {url} failed: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>, kind: TransportErrorKind) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "failed for an unknown reason. This could happen if you are disconnected from the network".to_string();
        }
        Self {
            url: url.into(),
            message,
            kind,
        }
    }
}

/// Body of a failed response: decoded JSON when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(serde_json::Value),
    Raw(String),
}

impl ErrorBody {
    /// Decode `text` as JSON, falling back to the raw string.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Raw(text.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ErrorBody::Json(value) => Some(value),
            ErrorBody::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(_) => None,
            ErrorBody::Raw(text) => Some(text),
        }
    }

    /// Render for display: pretty JSON or the raw text unchanged.
    pub fn to_pretty_string(&self) -> String {
        match self {
            ErrorBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ErrorBody::Raw(text) => text.clone(),
        }
    }
}

/// Non-2xx HTTP response, with everything the server sent back.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: u16,
    pub headers: ResponseHeaders,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(url: &str, status_code: u16, headers: ResponseHeaders, body: ErrorBody) -> Self {
        Self {
            message: format!("[{}] Error connecting to the API ({})", status_code, url),
            status_code,
            headers,
            body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Decode the upstream `responseStatus` envelope, if the body carries one.
    pub fn response_status(&self) -> Option<ResponseStatus> {
        let envelope = self.body.as_json()?.get("responseStatus")?;
        serde_json::from_value(envelope.clone()).ok()
    }
}

/// Error envelope returned by the VDC APIs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResponseStatus {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

/// x-pay-token signing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The token scheme is selected but no shared secret is configured.
    #[error("x-pay-token requires a shared secret, but none is configured")]
    MissingSharedSecret,

    /// System time error (before UNIX epoch)
    #[error("System time error: {0}")]
    SystemTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parses_json() {
        let body = ErrorBody::parse(r#"{"code":"X"}"#);
        assert_eq!(body.as_json(), Some(&serde_json::json!({"code": "X"})));
        assert!(body.as_raw().is_none());
    }

    #[test]
    fn test_error_body_keeps_raw_text() {
        let body = ErrorBody::parse("<html>Bad Gateway</html>");
        assert_eq!(body.as_raw(), Some("<html>Bad Gateway</html>"));
        assert_eq!(body.to_pretty_string(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_api_error_display_and_status() {
        let err = ApiError::new(
            "https://sandbox.api.visa.com/vmorc/offers/v1/all",
            404,
            ResponseHeaders::default(),
            ErrorBody::Raw("nope".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "[404] Error connecting to the API (https://sandbox.api.visa.com/vmorc/offers/v1/all)"
        );
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_response_status_envelope() {
        let err = ApiError::new(
            "https://example.com",
            400,
            ResponseHeaders::default(),
            ErrorBody::parse(
                r#"{"responseStatus":{"status":400,"code":"9125","severity":"ERROR","message":"Expected input credential was not present","info":""}}"#,
            ),
        );
        let status = err.response_status().unwrap();
        assert_eq!(status.code.as_deref(), Some("9125"));
        assert_eq!(status.severity.as_deref(), Some("ERROR"));
    }

    #[test]
    fn test_transport_error_blank_message() {
        let err = TransportError::new("https://example.com", "  ", TransportErrorKind::Connect);
        assert!(err.message.contains("unknown reason"));
        assert!(err.to_string().starts_with("API call to https://example.com failed:"));
    }
}
