//! A single fetched page of a list response

use crate::error::NeutronError;
use crate::result::decode_body;
use crate::transport::RawResponse;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination link as found in `<resource>_links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
}

/// One batch of a list response
///
/// Holds the raw body so that any extraction function can decode it, plus
/// the next-page link parsed when the page was fetched.
#[derive(Debug, Clone)]
pub struct Page {
    resource: String,
    url: String,
    status: StatusCode,
    body: Bytes,
    next: Option<String>,
    len: usize,
}

impl Page {
    /// Parse a fetched response for the given resource collection (e.g. "ports")
    pub(crate) fn from_response(resource: &str, response: RawResponse) -> Result<Self, NeutronError> {
        Self::parse(resource, response.url, response.status, response.body)
    }

    /// Build a page from a body obtained elsewhere
    pub fn from_body(resource: &str, url: impl Into<String>, body: impl Into<Bytes>) -> Result<Self, NeutronError> {
        Self::parse(resource, url.into(), StatusCode::OK, body.into())
    }

    fn parse(resource: &str, url: String, status: StatusCode, body: Bytes) -> Result<Self, NeutronError> {
        let value: Value = decode_body(&body)?;
        let Value::Object(map) = &value else {
            return Err(NeutronError::Decode(format!(
                "expected a JSON object for a page of {}, got {}",
                resource,
                type_name(&value)
            )));
        };

        let links_key = format!("{}_links", resource);
        let next = match map.get(&links_key) {
            None | Some(Value::Null) => None,
            Some(links) => {
                let links: Vec<Link> = serde_json::from_value(links.clone())
                    .map_err(|e| NeutronError::Decode(format!("invalid {}: {}", links_key, e)))?;
                links.into_iter().find(|l| l.rel == "next").map(|l| l.href)
            }
        };

        let len = match map.get(resource) {
            Some(Value::Array(items)) => items.len(),
            Some(other) => {
                return Err(NeutronError::Decode(format!(
                    "expected {} to be an array, got {}",
                    resource,
                    type_name(other)
                )));
            }
            None => {
                return Err(NeutronError::Decode(format!(
                    "missing top-level key {:?} in list response",
                    resource
                )));
            }
        };

        Ok(Self {
            resource: resource.to_string(),
            url,
            status,
            body,
            next,
            len,
        })
    }

    /// Resource collection name, which is also the wrapping key of the body
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// URL this page was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// `href` of the `rel == "next"` link, if the server sent one
    pub fn next_page_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Number of items under the resource key
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode the whole body into `T`
    pub fn extract_into<T: DeserializeOwned>(&self) -> Result<T, NeutronError> {
        decode_body(&self.body)
    }

    /// Raw items under the resource key; a missing key is a decode error
    pub fn items(&self) -> Result<Vec<Value>, NeutronError> {
        let mut value: Value = decode_body(&self.body)?;
        match value.get_mut(&self.resource).map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(NeutronError::Decode(format!(
                "expected {} to be an array, got {}",
                self.resource,
                type_name(&other)
            ))),
            None => Err(NeutronError::Decode(format!(
                "missing top-level key {:?} in list response",
                self.resource
            ))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
