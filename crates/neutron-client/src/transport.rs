//! Transport trait
//!
//! Abstracts the HTTP layer so that paging and extraction can be driven by the
//! reqwest-backed [`HttpClient`](crate::common::HttpClient) in production and by
//! an in-memory mock in unit tests.

use crate::error::NeutronError;
use bytes::Bytes;
use reqwest::{Method, StatusCode};

/// A single request against the Networking API
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the endpoint (`/v2.0/ports`) or an absolute URL taken
    /// from a pagination link
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn put(path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Short form used in log lines and error messages, e.g. `GET /v2.0/ports`
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Raw response as returned by the transport, before any status handling
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// URL the response was fetched from
    pub url: String,
    pub body: Bytes,
}

/// Trait for issuing requests against the Networking API
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only failures to get a response at all are `Err`.
/// Status handling is left to the result wrappers. No retries happen here.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Base URL of the Networking endpoint
    fn endpoint(&self) -> &str;

    /// Issue one request and wait for the complete response
    async fn execute(&self, request: Request) -> Result<RawResponse, NeutronError>;
}
