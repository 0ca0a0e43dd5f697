//! Result wrappers
//!
//! Every operation returns a wrapper around a [`RawResult`] instead of a
//! decoded value. The wrapper is consumed by its `extract`/`extract_err`
//! method, so each response is interpreted exactly once.

use crate::error::NeutronError;
use crate::transport::RawResponse;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Raw response plus the outcome of the request
#[derive(Debug)]
pub struct RawResult {
    status: Option<StatusCode>,
    body: Bytes,
    err: Option<NeutronError>,
}

impl RawResult {
    /// Wrap the outcome of a request
    ///
    /// `what` names the request (`GET /v2.0/ports/abc`) and ends up in error messages.
    pub fn new(what: &str, outcome: Result<RawResponse, NeutronError>) -> Self {
        match outcome {
            Ok(response) if response.status.is_success() => Self {
                status: Some(response.status),
                body: response.body,
                err: None,
            },
            Ok(response) => Self {
                status: Some(response.status),
                err: Some(NeutronError::from_status(response.status, what, &response.body)),
                body: response.body,
            },
            Err(err) => Self {
                status: None,
                body: Bytes::new(),
                err: Some(err),
            },
        }
    }

    /// Status code, `None` when no response was received at all
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }

    /// Decode the body into `T`, or return the request error
    pub fn extract_into<T: DeserializeOwned>(self) -> Result<T, NeutronError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        decode_body(&self.body)
    }

    /// Return the request error, if any, ignoring the body
    pub fn into_err(self) -> Result<(), NeutronError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Decode a JSON body, keeping a prefix of the payload in the error message
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, NeutronError> {
    serde_json::from_slice(body).map_err(|e| {
        NeutronError::Decode(format!(
            "error decoding response body: {} - Response (first 500 chars): {}",
            e,
            String::from_utf8_lossy(body).chars().take(500).collect::<String>()
        ))
    })
}

/// Result of an operation whose only payload is success or failure
/// (delete, add tag). Call [`extract_err`](Self::extract_err).
#[derive(Debug)]
pub struct ErrResult {
    raw: RawResult,
}

impl ErrResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.raw.status()
    }

    /// `Ok(())` on a 2xx response, otherwise the transport or API error
    pub fn extract_err(self) -> Result<(), NeutronError> {
        self.raw.into_err()
    }
}

/// Result of an existence check such as confirming a tag.
#[derive(Debug)]
pub struct ConfirmResult {
    inner: ErrResult,
}

impl ConfirmResult {
    pub fn new(raw: RawResult) -> Self {
        Self {
            inner: ErrResult::new(raw),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.inner.status()
    }

    /// `(true, None)` when the request succeeded, `(false, Some(err))` otherwise.
    ///
    /// An absent tag comes back as `(false, Some(NeutronError::NotFound(_)))`;
    /// the error is returned rather than swallowed so callers can tell a
    /// missing tag from a failed request.
    pub fn extract(self) -> (bool, Option<NeutronError>) {
        match self.inner.extract_err() {
            Ok(()) => (true, None),
            Err(err) => (false, Some(err)),
        }
    }
}
