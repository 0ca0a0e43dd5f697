//! Client configuration
//!
//! Configuration can be built in code or loaded from the same `OS_*`
//! environment variables the OpenStack command line tools use.

use crate::error::NeutronError;
use std::env;
use std::time::Duration;

/// Environment variable holding the Networking endpoint URL
pub const ENV_ENDPOINT: &str = "OS_NETWORK_ENDPOINT";
/// Environment variable holding a pre-issued auth token
pub const ENV_TOKEN: &str = "OS_AUTH_TOKEN";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "OS_NETWORK_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "http://localhost:9696";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`NetworkClient`](crate::NetworkClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Networking endpoint, without the `/v2.0` suffix (e.g. "http://controller:9696")
    pub endpoint: String,
    /// Token sent as `X-Auth-Token`
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with default timeout and user agent
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("neutron-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// `OS_AUTH_TOKEN` is required. `OS_NETWORK_ENDPOINT` defaults to
    /// `http://localhost:9696` and `OS_NETWORK_TIMEOUT_SECS` to 30.
    pub fn from_env() -> Result<Self, NeutronError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NeutronError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let token = lookup(ENV_TOKEN)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                NeutronError::InvalidConfig(format!("{} environment variable is required", ENV_TOKEN))
            })?;

        let mut config = Self::new(endpoint, token);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                NeutronError::InvalidConfig(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint looks like an HTTP(S) URL and the token is set
    pub fn validate(&self) -> Result<(), NeutronError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(NeutronError::InvalidConfig(format!(
                "endpoint must start with http:// or https://, got {:?}",
                self.endpoint
            )));
        }
        if self.token.is_empty() {
            return Err(NeutronError::InvalidConfig("token must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_only_token_set() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENV_TOKEN, "abc")])).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9696");
        assert_eq!(config.token, "abc");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_ENDPOINT, "http://neutron:9696")])).unwrap_err();
        assert!(matches!(err, NeutronError::InvalidConfig(_)));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed_and_timeout_parsed() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_ENDPOINT, "https://neutron.example.com:9696/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "https://neutron.example.com:9696");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_and_scheme() {
        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_TOKEN, "abc"), (ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, NeutronError::InvalidConfig(_)));

        let err = ClientConfig::new("neutron:9696", "abc").validate().unwrap_err();
        assert!(matches!(err, NeutronError::InvalidConfig(_)));
    }
}
