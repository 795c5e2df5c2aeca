//! Error types for the resource client
//!
//! Every operation, blocking or callback-based, reports failures through the
//! single [`Error`] type defined here, so callers write one handling path for
//! both call styles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the resource client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Local Errors (no request was issued)
    // ============================================================================
    #[error("Invalid argument '{parameter}': {message}")]
    Validation { parameter: String, message: String },

    #[error("Failed to encode request body: {message}")]
    Serialization { message: String },

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("{context} failed{}: {message}", status_suffix(.status))]
    Remote {
        status: Option<u16>,
        payload: Option<ErrorPayload>,
        context: RequestContext,
        message: String,
    },

    #[error("{context} was cancelled before completion")]
    Cancelled { context: RequestContext },

    // ============================================================================
    // Ambient Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },

    #[error("Crypto error: {message}")]
    Crypto { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with HTTP {s}")).unwrap_or_default()
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Serialization,
    Remote,
    Cancelled,
    Config,
    Runtime,
    Crypto,
}

/// Method and resource identity of the request that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// HTTP method
    pub method: String,
    /// Collection, keyed resource, or cursor the request addressed
    pub resource: String,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.resource)
    }
}

/// Error body reported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Machine-readable error code
    pub code: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Additional name/value details
    #[serde(default)]
    pub values: Vec<ErrorDetail>,
}

/// A single name/value detail inside an [`ErrorPayload`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl ErrorPayload {
    /// Parse the server error envelope.
    ///
    /// Accepts `{"error": {...}}`, `{"odata.error": {...}}` or a bare object,
    /// where `message` is either a string or `{"value": "..."}`.
    pub fn from_json(body: &serde_json::Value) -> Option<Self> {
        let inner = body
            .get("odata.error")
            .or_else(|| body.get("error"))
            .unwrap_or(body);
        let obj = inner.as_object()?;

        let code = obj.get("code").and_then(|v| v.as_str()).map(String::from);
        let message = match obj.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(v) => v.get("value").and_then(|v| v.as_str()).map(String::from),
            None => None,
        };
        if code.is_none() && message.is_none() {
            return None;
        }

        let values = obj
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| ErrorDetail {
                        key: item.get("key").and_then(|v| v.as_str()).map(String::from),
                        value: item.get("value").and_then(|v| v.as_str()).map(String::from),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            code,
            message,
            values,
        })
    }
}

impl Error {
    /// Create a validation error for a named parameter
    pub fn validation(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a blank required parameter
    pub fn blank(parameter: impl Into<String>) -> Self {
        Self::validation(parameter, "must not be empty")
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a remote error
    pub fn remote(
        context: RequestContext,
        status: Option<u16>,
        payload: Option<ErrorPayload>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            status,
            payload,
            context,
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(context: RequestContext) -> Self {
        Self::Cancelled { context }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Serialization { .. } => ErrorKind::Serialization,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Config { .. } => ErrorKind::Config,
            Error::Runtime { .. } => ErrorKind::Runtime,
            Error::Crypto { .. } => ErrorKind::Crypto,
        }
    }

    /// HTTP status of a remote error, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => *status,
            _ => None,
        }
    }

    /// Request context of a remote or cancelled operation
    pub fn context(&self) -> Option<&RequestContext> {
        match self {
            Error::Remote { context, .. } | Error::Cancelled { context } => Some(context),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Remote { status: None, .. } => true,
            Error::Remote {
                status: Some(status),
                ..
            } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Result type alias for the resource client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Turn any error into a config error with a message prefix
    fn config_context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn config_context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::config(format!("{}: {e}", message.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::blank("fingerprint");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'fingerprint': must not be empty"
        );

        let err = Error::remote(
            RequestContext::new("GET", "certificates"),
            Some(404),
            None,
            "not found",
        );
        assert_eq!(
            err.to_string(),
            "GET certificates failed with HTTP 404: not found"
        );

        let err = Error::remote(
            RequestContext::new("GET", "certificates"),
            None,
            None,
            "connection refused",
        );
        assert_eq!(err.to_string(), "GET certificates failed: connection refused");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::blank("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::serialization("x").kind(), ErrorKind::Serialization);
        assert_eq!(
            Error::Cancelled {
                context: RequestContext::new("POST", "certificates")
            }
            .kind(),
            ErrorKind::Cancelled
        );
        assert_eq!(Error::config("x").kind(), ErrorKind::Config);
    }

    #[test]
    fn test_is_retryable() {
        let ctx = RequestContext::new("GET", "certificates");
        assert!(Error::remote(ctx.clone(), Some(429), None, "").is_retryable());
        assert!(Error::remote(ctx.clone(), Some(503), None, "").is_retryable());
        assert!(Error::remote(ctx.clone(), None, None, "timeout").is_retryable());

        assert!(!Error::remote(ctx.clone(), Some(400), None, "").is_retryable());
        assert!(!Error::remote(ctx, Some(404), None, "").is_retryable());
        assert!(!Error::blank("fingerprint").is_retryable());
    }

    #[test]
    fn test_error_payload_odata_envelope() {
        let body = json!({
            "odata.error": {
                "code": "CertificateNotFound",
                "message": {"lang": "en-US", "value": "The specified certificate does not exist."},
                "values": [{"key": "RequestId", "value": "abc"}]
            }
        });
        let payload = ErrorPayload::from_json(&body).unwrap();
        assert_eq!(payload.code.as_deref(), Some("CertificateNotFound"));
        assert_eq!(
            payload.message.as_deref(),
            Some("The specified certificate does not exist.")
        );
        assert_eq!(payload.values.len(), 1);
        assert_eq!(payload.values[0].key.as_deref(), Some("RequestId"));
    }

    #[test]
    fn test_error_payload_plain_envelope() {
        let body = json!({"error": {"code": "Conflict", "message": "already exists"}});
        let payload = ErrorPayload::from_json(&body).unwrap();
        assert_eq!(payload.code.as_deref(), Some("Conflict"));
        assert_eq!(payload.message.as_deref(), Some("already exists"));
        assert!(payload.values.is_empty());
    }

    #[test]
    fn test_error_payload_unrecognized() {
        assert!(ErrorPayload::from_json(&json!({"status": "bad"})).is_none());
        assert!(ErrorPayload::from_json(&json!("oops")).is_none());
    }

    #[test]
    fn test_config_context() {
        let result: std::result::Result<(), &str> = Err("inner");
        let err = result.config_context("outer").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: outer: inner");
    }
}
