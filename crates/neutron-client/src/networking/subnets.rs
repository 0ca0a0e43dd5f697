//! Subnets
//!
//! An IPv4 or IPv6 address block on a network, with the DHCP settings
//! Neutron uses when it allocates addresses from it.

use super::{null_as_default, SortDir, API_VERSION_PREFIX};
use crate::common::query::{encode_segment, QueryParams};
use crate::error::NeutronError;
use crate::pagination::Page;
use crate::result::RawResult;
use serde::{Deserialize, Serialize};

/// Collection name; also the wrapping key of list responses
pub const RESOURCE: &str = "subnets";

/// Range of addresses Neutron may hand out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPool {
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
}

/// Static route pushed to instances through DHCP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRoute {
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nexthop: String,
}

/// Subnet model matching the Neutron subnet resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tenant_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: String,
    /// 4 or 6
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_version: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cidr: String,
    /// `None` when the subnet has no gateway
    #[serde(default)]
    pub gateway_ip: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dns_nameservers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allocation_pools: Vec<AllocationPool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_routes: Vec<HostRoute>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_dhcp: bool,
    #[serde(default)]
    pub ipv6_address_mode: Option<String>,
    #[serde(default)]
    pub ipv6_ra_mode: Option<String>,
    #[serde(default)]
    pub subnetpool_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
struct SubnetEnvelope {
    subnet: Subnet,
}

#[derive(Deserialize)]
struct SubnetsEnvelope {
    subnets: Vec<Subnet>,
}

/// Decode the subnets of one list page, in server order
pub fn extract_subnets(page: &Page) -> Result<Vec<Subnet>, NeutronError> {
    Ok(page.extract_into::<SubnetsEnvelope>()?.subnets)
}

/// Result of a get operation. Call [`extract`](Self::extract) for the subnet.
#[derive(Debug)]
pub struct GetResult {
    raw: RawResult,
}

impl GetResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    pub fn extract(self) -> Result<Subnet, NeutronError> {
        Ok(self.raw.extract_into::<SubnetEnvelope>()?.subnet)
    }
}

/// Filters for listing subnets; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub id: Option<String>,
    pub name: Option<String>,
    pub network_id: Option<String>,
    pub tenant_id: Option<String>,
    pub project_id: Option<String>,
    pub ip_version: Option<u8>,
    pub cidr: Option<String>,
    pub gateway_ip: Option<String>,
    pub enable_dhcp: Option<bool>,
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<SortDir>,
}

impl ListOpts {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.push_opt("id", self.id.as_ref());
        q.push_opt("name", self.name.as_ref());
        q.push_opt("network_id", self.network_id.as_ref());
        q.push_opt("tenant_id", self.tenant_id.as_ref());
        q.push_opt("project_id", self.project_id.as_ref());
        q.push_opt("ip_version", self.ip_version.as_ref());
        q.push_opt("cidr", self.cidr.as_ref());
        q.push_opt("gateway_ip", self.gateway_ip.as_ref());
        q.push_opt("enable_dhcp", self.enable_dhcp.as_ref());
        q.push_opt("limit", self.limit.as_ref());
        q.push_opt("marker", self.marker.as_ref());
        q.push_opt("sort_key", self.sort_key.as_ref());
        q.push_opt("sort_dir", self.sort_dir.as_ref());
        q
    }
}

pub fn list_path() -> String {
    format!("{}/{}", API_VERSION_PREFIX, RESOURCE)
}

pub fn resource_path(id: &str) -> String {
    format!("{}/{}/{}", API_VERSION_PREFIX, RESOURCE, encode_segment(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LIST_RESPONSE: &str = r#"
{
    "subnets": [
        {
            "name": "private-subnet",
            "enable_dhcp": true,
            "network_id": "db193ab3-96e3-4cb3-8fc5-05f4296d0324",
            "tenant_id": "26a7980765d0414dbc1fc1f88cdb7e6e",
            "dns_nameservers": [],
            "allocation_pools": [
                {
                    "start": "10.0.0.2",
                    "end": "10.0.0.254"
                }
            ],
            "host_routes": [],
            "ip_version": 4,
            "gateway_ip": "10.0.0.1",
            "cidr": "10.0.0.0/24",
            "id": "08eae331-0402-425a-923c-34f7cfe39c1b"
        },
        {
            "name": "my_subnet",
            "enable_dhcp": true,
            "network_id": "d32019d3-bc6e-4319-9c1d-6722fc136a22",
            "tenant_id": "4fd44f30292945e481c7b8a0c8908869",
            "dns_nameservers": [],
            "allocation_pools": [
                {
                    "start": "192.0.0.2",
                    "end": "192.255.255.254"
                }
            ],
            "host_routes": [],
            "ip_version": 4,
            "gateway_ip": null,
            "cidr": "192.0.0.0/8",
            "id": "54d6f61d-db07-451c-9ab3-b9609b6b6f0b"
        }
    ]
}
"#;

    #[test]
    fn test_extract_subnets_matches_fixture() {
        let page = Page::from_body(RESOURCE, "http://neutron:9696/v2.0/subnets", LIST_RESPONSE).unwrap();
        let subnets = extract_subnets(&page).unwrap();

        assert_eq!(subnets.len(), 2);
        assert_eq!(
            subnets[0],
            Subnet {
                name: "private-subnet".to_string(),
                enable_dhcp: true,
                network_id: "db193ab3-96e3-4cb3-8fc5-05f4296d0324".to_string(),
                tenant_id: "26a7980765d0414dbc1fc1f88cdb7e6e".to_string(),
                allocation_pools: vec![AllocationPool {
                    start: "10.0.0.2".to_string(),
                    end: "10.0.0.254".to_string(),
                }],
                ip_version: 4,
                gateway_ip: Some("10.0.0.1".to_string()),
                cidr: "10.0.0.0/24".to_string(),
                id: "08eae331-0402-425a-923c-34f7cfe39c1b".to_string(),
                ..Subnet::default()
            }
        );
        assert_eq!(subnets[1].gateway_ip, None);
        assert_eq!(subnets[1].cidr, "192.0.0.0/8");
    }

    #[test]
    fn test_missing_wrapper_key_is_decode_error() {
        let page = Page::from_body("ports", "u", r#"{"ports": []}"#).unwrap();
        assert!(extract_subnets(&page).unwrap_err().is_decode());
    }

    #[test]
    fn test_list_opts_query() {
        let opts = ListOpts {
            ip_version: Some(6),
            cidr: Some("fd00::/64".to_string()),
            ..ListOpts::default()
        };
        assert_eq!(
            opts.to_query().apply_to(&list_path()),
            "/v2.0/subnets?ip_version=6&cidr=fd00%3A%3A%2F64"
        );
    }
}
