//! OpenStack Networking REST API Client
//!
//! A Rust client library for the OpenStack Networking (Neutron) v2 API.
//! Provides typed models for ports and subnets, resource tag operations, and
//! lazy traversal of paginated list responses.
//!
//! # Example
//!
//! ```no_run
//! use neutron_client::{ClientConfig, NetworkClient, NeutronError};
//! use neutron_client::networking::ports::{self, extract_ports};
//!
//! # async fn example() -> Result<(), NeutronError> {
//! let client = NetworkClient::new(&ClientConfig::new(
//!     "http://controller:9696",
//!     "gAAAAAB...",
//! ))?;
//!
//! // Walk every page of ports on a network
//! let opts = ports::ListOpts {
//!     network_id: Some("70c1db1f-b701-45bd-96e0-a313ee3430b3".to_string()),
//!     ..Default::default()
//! };
//! client
//!     .list_ports(&opts)
//!     .each_page(|page| {
//!         for port in extract_ports(page)? {
//!             println!("{} {}", port.id, port.status);
//!         }
//!         Ok::<_, NeutronError>(true)
//!     })
//!     .await?;
//!
//! // Fetch a single port
//! let port = client.get_port("46d4bfb9-b26e-41f3-bd2e-e6dcc1ccedb2").await.extract()?;
//!
//! // Check a tag
//! let (tagged, _err) = client.confirm_tag("ports", &port.id, "production").await.extract();
//! # let _ = tagged;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Pagination**: follows `<resource>_links` next links one page at a time,
//!   as a callback traversal, a pull cursor, or a `Stream`
//! - **Ports**: list, get, create, update, delete
//! - **Subnets**: list, get
//! - **Tags**: replace, list, add, delete, confirm on any taggable resource
//! - **test-util**: an in-memory [`MockTransport`] for unit tests

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod networking;
pub mod pagination;
pub mod result;
pub mod transport;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::NetworkClient;
pub use common::HttpClient;
pub use config::ClientConfig;
pub use error::NeutronError;
pub use pagination::{Link, Page, Pager};
pub use result::{ConfirmResult, ErrResult, RawResult};
pub use transport::{RawResponse, Request, Transport};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
