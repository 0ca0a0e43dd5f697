//! Resource tags
//!
//! Free-form string labels attached to a resource through its `tags`
//! sub-resource, e.g. `/v2.0/networks/<id>/tags`. Works for any resource
//! type that supports the standard-attr tag extension.

use super::API_VERSION_PREFIX;
use crate::common::query::encode_segment;
use crate::error::NeutronError;
use crate::result::{ErrResult, RawResult};

pub use crate::result::ConfirmResult;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct TagsBody {
    tags: Vec<String>,
}

/// Result carrying a tag list. Call [`extract`](Self::extract) for the tags.
#[derive(Debug)]
pub struct TagsResult {
    raw: RawResult,
}

impl TagsResult {
    pub fn new(raw: RawResult) -> Self {
        Self { raw }
    }

    /// Tags in server order
    pub fn extract(self) -> Result<Vec<String>, NeutronError> {
        Ok(self.raw.extract_into::<TagsBody>()?.tags)
    }
}

/// Result of replacing all tags; carries the new tag list
pub type ReplaceAllResult = TagsResult;

/// Result of listing tags
pub type ListResult = TagsResult;

/// Result of adding a single tag. Call `extract_err` to check for failure.
pub type AddResult = ErrResult;

/// Result of deleting one or all tags. Call `extract_err` to check for failure.
pub type DeleteResult = ErrResult;

/// `/v2.0/<resource_type>/<resource_id>/tags`
pub fn tags_path(resource_type: &str, resource_id: &str) -> String {
    format!(
        "{}/{}/{}/tags",
        API_VERSION_PREFIX,
        encode_segment(resource_type),
        encode_segment(resource_id)
    )
}

/// `/v2.0/<resource_type>/<resource_id>/tags/<tag>`
pub fn tag_path(resource_type: &str, resource_id: &str, tag: &str) -> String {
    format!("{}/{}", tags_path(resource_type, resource_id), encode_segment(tag))
}

/// `{"tags": [...]}` body for a replace-all request
pub fn replace_all_body(tags: &[String]) -> Value {
    serde_json::json!({ "tags": tags })
}
