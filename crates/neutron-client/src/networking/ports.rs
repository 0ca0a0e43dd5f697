//! Ports
//!
//! A port is a connection point for attaching a device (a server NIC, a
//! router interface, a DHCP agent) to a network.

use super::{lenient_timestamp, null_as_default, SortDir, API_VERSION_PREFIX};
use crate::common::query::{encode_segment, QueryParams};
use crate::error::NeutronError;
use crate::pagination::Page;
use crate::result::{ErrResult, RawResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection name; also the wrapping key of list responses
pub const RESOURCE: &str = "ports";

/// Fixed IP binding of a port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedIp {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
}

/// Extra address allowed to send traffic through the port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPair {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub mac_address: String,
}

/// DHCP option handed out for the port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDhcpOpt {
    #[serde(default, deserialize_with = "null_as_default")]
    pub opt_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opt_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<u8>,
}

/// Port model matching the Neutron port resource
///
/// Absent or `null` fields decode to empty values; unknown fields are ignored.
/// The `binding:*` attributes come from the port-binding extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// e.g. ACTIVE, DOWN, BUILD
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_state_up: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tenant_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fixed_ips: Vec<FixedIp>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_id: String,
    /// e.g. network:router_gateway, compute:nova
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub security_groups: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_address_pairs: Vec<AddressPair>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_dhcp_opts: Vec<ExtraDhcpOpt>,
    #[serde(rename = "binding:host_id", default, deserialize_with = "null_as_default")]
    pub binding_host_id: String,
    #[serde(rename = "binding:vif_type", default, deserialize_with = "null_as_default")]
    pub binding_vif_type: String,
    #[serde(rename = "binding:vif_details", default, deserialize_with = "null_as_default")]
    pub binding_vif_details: Map<String, Value>,
    #[serde(rename = "binding:vnic_type", default, deserialize_with = "null_as_default")]
    pub binding_vnic_type: String,
    #[serde(rename = "binding:profile", default, deserialize_with = "null_as_default")]
    pub binding_profile: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revision_number: u64,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct PortEnvelope {
    port: Port,
}

#[derive(Deserialize)]
struct PortsEnvelope {
    ports: Vec<Port>,
}

/// Decode the ports of one list page, in server order
///
/// A body without the top-level `"ports"` key is a decode error.
pub fn extract_ports(page: &Page) -> Result<Vec<Port>, NeutronError> {
    Ok(page.extract_into::<PortsEnvelope>()?.ports)
}

fn extract_port(raw: RawResult) -> Result<Port, NeutronError> {
    Ok(raw.extract_into::<PortEnvelope>()?.port)
}

/// Result of a get operation. Call [`extract`](Self::extract) for the port.
#[derive(Debug)]
pub struct GetResult {
    raw: RawResult,
}

impl GetResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    pub fn extract(self) -> Result<Port, NeutronError> {
        extract_port(self.raw)
    }
}

/// Result of a create operation. Call [`extract`](Self::extract) for the new port.
#[derive(Debug)]
pub struct CreateResult {
    raw: RawResult,
}

impl CreateResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    pub fn extract(self) -> Result<Port, NeutronError> {
        extract_port(self.raw)
    }
}

/// Result of an update operation. Call [`extract`](Self::extract) for the updated port.
#[derive(Debug)]
pub struct UpdateResult {
    raw: RawResult,
}

impl UpdateResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    pub fn extract(self) -> Result<Port, NeutronError> {
        extract_port(self.raw)
    }
}

/// Result of a delete operation. Call `extract_err` to check for failure.
pub type DeleteResult = ErrResult;

/// Filters for listing ports; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub admin_state_up: Option<bool>,
    pub network_id: Option<String>,
    pub tenant_id: Option<String>,
    pub project_id: Option<String>,
    pub device_owner: Option<String>,
    pub device_id: Option<String>,
    pub mac_address: Option<String>,
    /// Page size requested from the server
    pub limit: Option<u32>,
    /// ID of the last port of the previous page
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<SortDir>,
}

impl ListOpts {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.push_opt("id", self.id.as_ref());
        q.push_opt("name", self.name.as_ref());
        q.push_opt("status", self.status.as_ref());
        q.push_opt("admin_state_up", self.admin_state_up.as_ref());
        q.push_opt("network_id", self.network_id.as_ref());
        q.push_opt("tenant_id", self.tenant_id.as_ref());
        q.push_opt("project_id", self.project_id.as_ref());
        q.push_opt("device_owner", self.device_owner.as_ref());
        q.push_opt("device_id", self.device_id.as_ref());
        q.push_opt("mac_address", self.mac_address.as_ref());
        q.push_opt("limit", self.limit.as_ref());
        q.push_opt("marker", self.marker.as_ref());
        q.push_opt("sort_key", self.sort_key.as_ref());
        q.push_opt("sort_dir", self.sort_dir.as_ref());
        q
    }
}

/// Request body for creating a port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateOpts {
    /// Network the port is attached to (required)
    pub network_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ips: Option<Vec<FixedIp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_address_pairs: Option<Vec<AddressPair>>,
}

impl CreateOpts {
    /// `{"port": {...}}` body; fails when `network_id` is empty
    pub fn to_body(&self) -> Result<Value, NeutronError> {
        if self.network_id.is_empty() {
            return Err(NeutronError::InvalidRequest(
                "network_id is required to create a port".to_string(),
            ));
        }
        Ok(serde_json::json!({ "port": self }))
    }
}

/// Request body for updating a port; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ips: Option<Vec<FixedIp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_owner: Option<String>,
    /// `Some(vec![])` clears the security groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
    /// `Some(vec![])` clears the allowed address pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_address_pairs: Option<Vec<AddressPair>>,
}

impl UpdateOpts {
    pub fn to_body(&self) -> Value {
        serde_json::json!({ "port": self })
    }
}

pub fn list_path() -> String {
    format!("{}/{}", API_VERSION_PREFIX, RESOURCE)
}

pub fn resource_path(id: &str) -> String {
    format!("{}/{}/{}", API_VERSION_PREFIX, RESOURCE, encode_segment(id))
}
