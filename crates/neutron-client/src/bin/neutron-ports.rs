//! neutron-ports
//!
//! Lists every port visible to the configured token, one JSON object per
//! line. Configuration comes from the environment:
//! - `OS_NETWORK_ENDPOINT`, `OS_AUTH_TOKEN`, `OS_NETWORK_TIMEOUT_SECS`
//! - `PORT_NETWORK_ID` / `PORT_DEVICE_ID`: optional filters
//! - `PORT_PAGE_SIZE`: optional page size requested from the server

use neutron_client::networking::ports::{self, extract_ports};
use neutron_client::{ClientConfig, NetworkClient, NeutronError};
use std::env;
use std::io::Write;
use std::num::NonZeroU32;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), NeutronError> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    info!("Configuration:");
    info!("  Endpoint: {}", config.endpoint);
    info!("  Timeout: {:?}", config.timeout);

    let page_size = match env::var("PORT_PAGE_SIZE") {
        Ok(raw) => Some(parse_page_size(&raw)?),
        Err(_) => None,
    };
    let opts = ports::ListOpts {
        network_id: env::var("PORT_NETWORK_ID").ok(),
        device_id: env::var("PORT_DEVICE_ID").ok(),
        limit: page_size,
        ..ports::ListOpts::default()
    };

    let client = NetworkClient::new(&config)?;
    client.validate_token().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut total = 0usize;

    client
        .list_ports(&opts)
        .each_page(|page| {
            for port in extract_ports(page)? {
                let line = serde_json::to_string(&port)?;
                // A closed stdout (e.g. piped into `head`) ends the listing
                if writeln!(out, "{}", line).is_err() {
                    return Ok(false);
                }
                total += 1;
            }
            Ok::<_, NeutronError>(true)
        })
        .await?;

    info!("Listed {} ports", total);
    Ok(())
}

/// Neutron reads `limit=0` as "no limit", so zero is rejected
fn parse_page_size(raw: &str) -> Result<u32, NeutronError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map(NonZeroU32::get)
        .map_err(|_| NeutronError::InvalidConfig(format!("PORT_PAGE_SIZE must be a positive integer, got {:?}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_must_be_positive() {
        assert_eq!(parse_page_size("50").unwrap(), 50);
        assert!(matches!(parse_page_size("0"), Err(NeutronError::InvalidConfig(_))));
        assert!(matches!(parse_page_size("-1"), Err(NeutronError::InvalidConfig(_))));
        assert!(matches!(parse_page_size("many"), Err(NeutronError::InvalidConfig(_))));
    }
}
