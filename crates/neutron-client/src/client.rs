//! Networking API client
//!
//! Implements the OpenStack Networking v2 client for ports, subnets and
//! resource tags. Based on the Neutron API structure: /v2.0/ports/,
//! /v2.0/subnets/ and /v2.0/{resource_type}/{id}/tags.
//!
//! Single-resource operations return result wrappers that are interpreted
//! by calling `extract`/`extract_err`; list operations return a [`Pager`].

use crate::common::HttpClient;
use crate::config::ClientConfig;
use crate::error::NeutronError;
use crate::networking::{ports, subnets, tags, API_VERSION_PREFIX};
use crate::pagination::Pager;
use crate::result::{ConfirmResult, ErrResult, RawResult};
use crate::transport::{Request, Transport};
use reqwest::StatusCode;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Networking API client
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct NetworkClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClient")
            .field("endpoint", &self.transport.endpoint())
            .finish_non_exhaustive()
    }
}

impl NetworkClient {
    /// Create a new client backed by reqwest
    ///
    /// # Arguments
    /// * `config` - endpoint, token and timeout settings
    pub fn new(config: &ClientConfig) -> Result<Self, NeutronError> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Create a client from `OS_*` environment variables
    pub fn from_env() -> Result<Self, NeutronError> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Create a client over any transport (e.g. a mock in tests)
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    async fn send(&self, request: Request) -> RawResult {
        let what = request.describe();
        debug!("{}", what);
        RawResult::new(&what, self.transport.execute(request).await)
    }

    /// Validate the token by making a lightweight authenticated request.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and the endpoint is reachable
    /// * `Err(NeutronError)` - Token is invalid or the endpoint is unreachable
    pub async fn validate_token(&self) -> Result<(), NeutronError> {
        debug!("Validating token and connectivity");
        let raw = self
            .send(Request::get(format!("{}/extensions", API_VERSION_PREFIX)))
            .await;

        if let Some(status) = raw
            .status()
            .filter(|s| *s == StatusCode::UNAUTHORIZED || *s == StatusCode::FORBIDDEN)
        {
            return Err(NeutronError::InvalidConfig(format!("Invalid token: {}", status)));
        }

        raw.into_err()?;
        debug!("Token validated successfully");
        Ok(())
    }

    // Ports

    /// List ports matching `opts`, one page at a time
    pub fn list_ports(&self, opts: &ports::ListOpts) -> Pager {
        let path = opts.to_query().apply_to(&ports::list_path());
        Pager::new(Arc::clone(&self.transport), ports::RESOURCE, Request::get(path))
    }

    /// Get a port by ID
    pub async fn get_port(&self, id: &str) -> ports::GetResult {
        ports::GetResult::new(self.send(Request::get(ports::resource_path(id))).await)
    }

    /// Create a port; `opts.network_id` is required
    pub async fn create_port(&self, opts: &ports::CreateOpts) -> ports::CreateResult {
        let raw = match opts.to_body() {
            Ok(body) => self.send(Request::post(ports::list_path(), body)).await,
            Err(e) => RawResult::new("POST /v2.0/ports", Err(e)),
        };
        ports::CreateResult::new(raw)
    }

    /// Update the set fields of a port
    pub async fn update_port(&self, id: &str, opts: &ports::UpdateOpts) -> ports::UpdateResult {
        let request = Request::put(ports::resource_path(id), Some(opts.to_body()));
        ports::UpdateResult::new(self.send(request).await)
    }

    /// Delete a port
    pub async fn delete_port(&self, id: &str) -> ports::DeleteResult {
        ErrResult::new(self.send(Request::delete(ports::resource_path(id))).await)
    }

    // Subnets

    /// List subnets matching `opts`, one page at a time
    pub fn list_subnets(&self, opts: &subnets::ListOpts) -> Pager {
        let path = opts.to_query().apply_to(&subnets::list_path());
        Pager::new(Arc::clone(&self.transport), subnets::RESOURCE, Request::get(path))
    }

    /// Get a subnet by ID
    pub async fn get_subnet(&self, id: &str) -> subnets::GetResult {
        subnets::GetResult::new(self.send(Request::get(subnets::resource_path(id))).await)
    }

    // Tags

    /// Replace every tag of a resource with `new_tags`
    ///
    /// # Arguments
    /// * `resource_type` - plural collection name, e.g. "networks" or "ports"
    /// * `resource_id` - ID of the tagged resource
    pub async fn replace_all_tags(
        &self,
        resource_type: &str,
        resource_id: &str,
        new_tags: &[String],
    ) -> tags::ReplaceAllResult {
        let request = Request::put(
            tags::tags_path(resource_type, resource_id),
            Some(tags::replace_all_body(new_tags)),
        );
        tags::TagsResult::new(self.send(request).await)
    }

    /// List the tags of a resource
    pub async fn list_tags(&self, resource_type: &str, resource_id: &str) -> tags::ListResult {
        tags::TagsResult::new(
            self.send(Request::get(tags::tags_path(resource_type, resource_id)))
                .await,
        )
    }

    /// Remove every tag from a resource
    pub async fn delete_all_tags(&self, resource_type: &str, resource_id: &str) -> tags::DeleteResult {
        ErrResult::new(
            self.send(Request::delete(tags::tags_path(resource_type, resource_id)))
                .await,
        )
    }

    /// Add a single tag to a resource
    pub async fn add_tag(&self, resource_type: &str, resource_id: &str, tag: &str) -> tags::AddResult {
        ErrResult::new(
            self.send(Request::put(tags::tag_path(resource_type, resource_id, tag), None))
                .await,
        )
    }

    /// Remove a single tag from a resource
    pub async fn delete_tag(&self, resource_type: &str, resource_id: &str, tag: &str) -> tags::DeleteResult {
        ErrResult::new(
            self.send(Request::delete(tags::tag_path(resource_type, resource_id, tag)))
                .await,
        )
    }

    /// Check whether a resource carries a tag (204 if present, 404 if absent)
    pub async fn confirm_tag(&self, resource_type: &str, resource_id: &str, tag: &str) -> ConfirmResult {
        ConfirmResult::new(
            self.send(Request::get(tags::tag_path(resource_type, resource_id, tag)))
                .await,
        )
    }
}
