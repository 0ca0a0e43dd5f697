//! Mock transport for unit testing
//!
//! This module provides an in-memory implementation of [`Transport`] that can
//! be used in unit tests without requiring a running Networking service.

use crate::error::NeutronError;
use crate::transport::{RawResponse, Request, Transport};
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: Bytes,
}

/// Mock transport for testing
///
/// Responses are registered per method and path (query string included).
/// Several responses for the same route are served in order; the last one
/// keeps being served once the others are used up. Unregistered routes answer
/// 404 with a Neutron-style error body. Every request is recorded.
#[derive(Debug, Clone)]
pub struct MockTransport {
    endpoint: String,
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<CannedResponse>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            routes: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a response (for test setup)
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or_else(|_| panic!("invalid status code {}", status));
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(CannedResponse {
                status,
                body: Bytes::from(body.into()),
            });
    }

    /// Register a JSON response (for test setup)
    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: &serde_json::Value) {
        self.respond(method, path, status, body.to_string());
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Route key for a request path; absolute URLs on this endpoint are made relative
    fn route_path<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.endpoint.as_str()).unwrap_or(path)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, request: Request) -> Result<RawResponse, NeutronError> {
        let key = (request.method.clone(), self.route_path(&request.path).to_string());
        let url = format!("{}{}", self.endpoint, key.1);
        lock(&self.requests).push(request);

        let canned = {
            let mut routes = lock(&self.routes);
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        Ok(match canned {
            Some(c) => RawResponse {
                status: c.status,
                url,
                body: c.body,
            },
            None => RawResponse {
                status: StatusCode::NOT_FOUND,
                body: Bytes::from(
                    serde_json::json!({
                        "NeutronError": {
                            "type": "HTTPNotFound",
                            "message": format!("no mock response for {} {}", key.0, key.1),
                            "detail": ""
                        }
                    })
                    .to_string(),
                ),
                url,
            },
        })
    }
}
