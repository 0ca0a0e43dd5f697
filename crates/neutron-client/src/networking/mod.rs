//! Networking v2 resources
//!
//! Models and extraction functions for the resources this client covers.
//! Wire names follow the Neutron API reference.

pub mod ports;
pub mod subnets;
pub mod tags;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Path prefix of every Networking v2 resource
pub const API_VERSION_PREFIX: &str = "/v2.0";

/// Sort direction for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Treat an explicit `null` like an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept RFC 3339 timestamps as well as the zone-less form older
/// Neutron releases emit (`2016-03-08T20:19:41`), which is UTC.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "lenient_timestamp")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "null_as_default")]
        names: Vec<String>,
    }

    #[test]
    fn test_timestamps_with_and_without_zone() {
        let expected = Utc.with_ymd_and_hms(2016, 3, 8, 20, 19, 41).unwrap();
        let a: Stamped = serde_json::from_str(r#"{"at": "2016-03-08T20:19:41Z"}"#).unwrap();
        let b: Stamped = serde_json::from_str(r#"{"at": "2016-03-08T20:19:41"}"#).unwrap();
        assert_eq!(a.at, Some(expected));
        assert_eq!(b.at, Some(expected));
    }

    #[test]
    fn test_null_and_absent_decode_to_defaults() {
        let s: Stamped = serde_json::from_str(r#"{"at": null, "names": null}"#).unwrap();
        assert_eq!(s.at, None);
        assert!(s.names.is_empty());

        let s: Stamped = serde_json::from_str("{}").unwrap();
        assert!(s.names.is_empty());
    }

    #[test]
    fn test_garbage_timestamp_is_an_error() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at": "yesterday"}"#).is_err());
    }

    #[test]
    fn test_sort_dir_display() {
        assert_eq!(SortDir::Asc.to_string(), "asc");
        assert_eq!(SortDir::Desc.to_string(), "desc");
    }
}
