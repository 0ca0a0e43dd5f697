//! Neutron client errors

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Networking API
#[derive(Debug, Error)]
pub enum NeutronError {
    /// Connection, TLS or timeout failure below HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("Neutron API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NeutronError {
    /// Build the error for a non-success response.
    ///
    /// Neutron wraps failures as `{"NeutronError": {"type", "message", "detail"}}`;
    /// when the body has that shape its message is used, otherwise the raw body.
    pub fn from_status(status: StatusCode, what: &str, body: &[u8]) -> Self {
        let message = ServiceErrorBody::message_from(body)
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

        if status == StatusCode::NOT_FOUND {
            if message.is_empty() {
                return Self::NotFound(what.to_string());
            }
            return Self::NotFound(format!("{} - {}", what, message));
        }

        Self::Api {
            status,
            message: if message.is_empty() {
                format!("{} failed", what)
            } else {
                format!("{} failed: {}", what, message)
            },
        }
    }

    /// Transport-level failure: connection errors and non-2xx statuses
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. } | Self::NotFound(_))
    }

    /// Payload did not decode into the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NeutronError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "NeutronError")]
    neutron_error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorDetail {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: String,
}

impl ServiceErrorBody {
    fn message_from(body: &[u8]) -> Option<String> {
        let parsed: ServiceErrorBody = serde_json::from_slice(body).ok()?;
        let detail = parsed.neutron_error;
        match detail.kind {
            Some(kind) if !kind.is_empty() => Some(format!("{}: {}", kind, detail.message)),
            _ => Some(detail.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_body_message_is_used() {
        let body = br#"{"NeutronError": {"type": "PortNotFound", "message": "Port abc could not be found.", "detail": ""}}"#;
        let err = NeutronError::from_status(StatusCode::NOT_FOUND, "GET /v2.0/ports/abc", body);
        match err {
            NeutronError::NotFound(msg) => {
                assert!(msg.contains("PortNotFound: Port abc could not be found."));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_body_falls_back_to_raw_text() {
        let err = NeutronError::from_status(StatusCode::CONFLICT, "PUT /v2.0/ports/abc", b"busy\n");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.to_string(), "Neutron API error (409 Conflict): PUT /v2.0/ports/abc failed: busy");
        assert!(err.is_transport());
        assert!(!err.is_decode());
    }

    #[test]
    fn test_empty_not_found_body() {
        let err = NeutronError::from_status(StatusCode::NOT_FOUND, "GET /v2.0/ports/x/tags/red", b"");
        assert_eq!(err.to_string(), "Not found: GET /v2.0/ports/x/tags/red");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: NeutronError = json_err.into();
        assert!(err.is_decode());
        assert_eq!(err.status(), None);
    }
}
