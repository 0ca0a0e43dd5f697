//! Query utilities for the Networking API
//!
//! Builds filter query strings and encodes path segments.

/// Ordered list of query parameters; unset filters are simply never pushed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Push only when the value is set
    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<&T>) {
        if let Some(v) = value {
            self.push(key, v.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as `k=v&k2=v2`, percent-encoding keys and values
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append the query string to a path, if there is anything to append
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

/// Percent-encode a single path segment (resource IDs, tag names)
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
