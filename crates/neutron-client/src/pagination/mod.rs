//! Paginated list traversal
//!
//! List endpoints answer with one batch of items plus an optional
//! `<resource>_links` array. [`Pager`] follows the `rel == "next"` links one
//! page at a time; resource modules decode each [`Page`] into typed records.

mod page;
mod pager;

pub use page::{Link, Page};
pub use pager::Pager;
