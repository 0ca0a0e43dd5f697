//! Common utilities for the Networking API client
//!
//! Provides the reqwest-backed transport shared by every resource module.

pub mod query;

use crate::config::ClientConfig;
use crate::error::NeutronError;
use crate::transport::{RawResponse, Request, Transport};
use reqwest::Client;
use std::fmt;
use tracing::{debug, warn};

/// HTTP client wrapper with token authentication
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    token: String,
}

// The token stays out of debug output
impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, endpoint: String, token: String) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a reqwest client from configuration and wrap it
    pub fn from_config(config: &ClientConfig) -> Result<Self, NeutronError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(NeutronError::Http)?;

        Ok(Self::new(client, config.endpoint.clone(), config.token.clone()))
    }

    /// Build a full URL from a path; absolute URLs are returned as-is
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.endpoint, path)
        } else {
            format!("{}/{}", self.endpoint, path)
        }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl Transport for HttpClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, request: Request) -> Result<RawResponse, NeutronError> {
        let url = self.build_url(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header("X-Auth-Token", &self.token)
            .header("Accept", "application/json");

        if let Some(body) = &request.body {
            builder = builder.header("Content-Type", "application/json").json(body);
        }

        let response = builder.send().await.map_err(NeutronError::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(NeutronError::Http)?;

        if !status.is_success() {
            warn!("{} {} returned {}", request.method, url, status);
        }

        Ok(RawResponse { status, url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpClient::new(Client::new(), "http://neutron:9696/".to_string(), "tok".to_string())
    }

    #[test]
    fn test_build_url_relative_and_absolute() {
        let http = client();
        assert_eq!(http.build_url("/v2.0/ports"), "http://neutron:9696/v2.0/ports");
        assert_eq!(http.build_url("v2.0/ports"), "http://neutron:9696/v2.0/ports");
        assert_eq!(
            http.build_url("http://other:9696/v2.0/ports?marker=x"),
            "http://other:9696/v2.0/ports?marker=x"
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_endpoint() {
        let config = ClientConfig::new("neutron:9696", "tok");
        assert!(matches!(HttpClient::from_config(&config), Err(NeutronError::InvalidConfig(_))));
    }
}
