//! Forward-only page cursor

use super::page::Page;
use crate::error::NeutronError;
use crate::transport::{Request, Transport};
use bytes::Bytes;
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lazy cursor over the pages of a list request
///
/// Pages are fetched one at a time, only when asked for, following the
/// server's `rel == "next"` links in order. Once the cursor has returned
/// `Ok(None)` or an error it is exhausted and fetches nothing more.
pub struct Pager {
    transport: Arc<dyn Transport>,
    resource: String,
    next_request: Option<Request>,
    pages_fetched: usize,
}

impl fmt::Debug for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("resource", &self.resource)
            .field("next_request", &self.next_request)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

impl Pager {
    /// Create a cursor whose first page is fetched with `initial`
    pub fn new(transport: Arc<dyn Transport>, resource: impl Into<String>, initial: Request) -> Self {
        Self {
            transport,
            resource: resource.into(),
            next_request: Some(initial),
            pages_fetched: 0,
        }
    }

    /// Resource collection being listed (e.g. "ports")
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether another fetch would happen on the next call to [`next_page`](Self::next_page)
    pub fn is_exhausted(&self) -> bool {
        self.next_request.is_none()
    }

    /// Fetch the next page, or `Ok(None)` after the last one
    pub async fn next_page(&mut self) -> Result<Option<Page>, NeutronError> {
        let Some(request) = self.next_request.take() else {
            return Ok(None);
        };

        let what = request.describe();
        debug!(resource = %self.resource, page = self.pages_fetched + 1, "Fetching page: {}", what);

        let response = self.transport.execute(request).await?;
        if !response.status.is_success() {
            return Err(NeutronError::from_status(response.status, &what, &response.body));
        }

        let page = Page::from_response(&self.resource, response)?;
        self.pages_fetched += 1;

        match page.next_page_url() {
            // An empty page ends the listing even if it links onward
            Some(href) if !page.is_empty() => {
                self.next_request = Some(Request::get(href));
            }
            Some(_) => debug!(resource = %self.resource, "Empty page with a next link, stopping"),
            None => {}
        }

        Ok(Some(page))
    }

    /// Hand every page to `on_page`, in order, until it returns `Ok(false)`,
    /// returns an error, or the pages run out.
    ///
    /// The next page is requested only after `on_page` returned `Ok(true)`
    /// for the current one. Fetch and decode failures abort the traversal and
    /// are returned here; they are never passed to `on_page`. A body without
    /// a `<resource>` array is a decode failure.
    ///
    /// A page with zero items is still handed to `on_page`, but its next
    /// link is not followed: the traversal ends after it.
    pub async fn each_page<F, E>(mut self, mut on_page: F) -> Result<(), E>
    where
        F: FnMut(&Page) -> Result<bool, E>,
        E: From<NeutronError>,
    {
        while let Some(page) = self.next_page().await? {
            if !on_page(&page)? {
                debug!(resource = %self.resource, pages = self.pages_fetched, "Traversal stopped by consumer");
                return Ok(());
            }
        }
        Ok(())
    }

    /// Fetch every remaining page and merge their items into one page
    ///
    /// The merged page has the same `{"<resource>": [...]}` shape as a
    /// single page, so the usual extraction functions apply to it.
    pub async fn all_pages(mut self) -> Result<Page, NeutronError> {
        let mut items = Vec::new();
        let mut first_url = None;

        while let Some(page) = self.next_page().await? {
            if first_url.is_none() {
                first_url = Some(page.url().to_string());
            }
            items.extend(page.items()?);
        }

        debug!(resource = %self.resource, pages = self.pages_fetched, items = items.len(), "Fetched all pages");

        let mut merged = serde_json::Map::new();
        merged.insert(self.resource.clone(), serde_json::Value::Array(items));
        let body = serde_json::to_vec(&merged)?;
        Page::from_body(&self.resource, first_url.unwrap_or_default(), Bytes::from(body))
    }

    /// Expose the cursor as a stream of pages
    ///
    /// The stream ends after the last page, or right after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page, NeutronError>> + Send {
        futures::stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, NeutronError>(page.map(|page| (page, pager)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use futures::TryStreamExt;
    use reqwest::Method;

    const BASE: &str = "http://neutron:9696";

    fn page_body(ids: &[&str], next: Option<&str>) -> String {
        let ports: Vec<_> = ids.iter().map(|id| serde_json::json!({"id": id})).collect();
        let mut body = serde_json::json!({ "ports": ports });
        if let Some(next) = next {
            body["ports_links"] = serde_json::json!([{"href": next, "rel": "next"}]);
        }
        body.to_string()
    }

    /// Three pages: relative link, then absolute link, then no link
    fn three_pages() -> MockTransport {
        let mock = MockTransport::new(BASE);
        mock.respond(Method::GET, "/v2.0/ports", 200, page_body(&["a", "b"], Some("/v2.0/ports?marker=b")));
        mock.respond(
            Method::GET,
            "/v2.0/ports?marker=b",
            200,
            page_body(&["c"], Some("http://neutron:9696/v2.0/ports?marker=c")),
        );
        mock.respond(Method::GET, "/v2.0/ports?marker=c", 200, page_body(&["d"], None));
        mock
    }

    fn pager(mock: &MockTransport) -> Pager {
        Pager::new(Arc::new(mock.clone()), "ports", Request::get("/v2.0/ports"))
    }

    fn ids(page: &Page) -> Vec<String> {
        page.items()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_each_page_visits_every_page_in_order() {
        let mock = three_pages();
        let mut seen = Vec::new();

        pager(&mock)
            .each_page(|page| {
                seen.push(ids(page));
                Ok::<_, NeutronError>(true)
            })
            .await
            .unwrap();

        assert_eq!(seen, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_consumer_stop_prevents_further_fetches() {
        let mock = three_pages();
        let mut calls = 0;

        pager(&mock)
            .each_page(|_| {
                calls += 1;
                Ok::<_, NeutronError>(calls < 2)
            })
            .await
            .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_consumer_error_is_propagated_verbatim() {
        #[derive(Debug)]
        enum AppError {
            Neutron(NeutronError),
            Rejected(usize),
        }
        impl From<NeutronError> for AppError {
            fn from(e: NeutronError) -> Self {
                Self::Neutron(e)
            }
        }

        let mock = three_pages();
        let result = pager(&mock)
            .each_page(|page| Err(AppError::Rejected(page.len())))
            .await;

        assert!(matches!(result, Err(AppError::Rejected(2))));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_aborts_without_calling_consumer() {
        let mock = MockTransport::new(BASE);
        mock.respond(Method::GET, "/v2.0/ports", 200, page_body(&["a"], Some("/v2.0/ports?marker=a")));
        mock.respond(Method::GET, "/v2.0/ports?marker=a", 500, "oops");

        let mut calls = 0;
        let err = pager(&mock)
            .each_page(|_| {
                calls += 1;
                Ok::<_, NeutronError>(true)
            })
            .await
            .unwrap_err();

        assert_eq!(calls, 1);
        assert!(err.is_transport());
        assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    }

    #[tokio::test]
    async fn test_undecodable_page_is_decode_error() {
        let mock = MockTransport::new(BASE);
        mock.respond(Method::GET, "/v2.0/ports", 200, "{\"ports\": [");

        let err = pager(&mock)
            .each_page(|_| Ok::<_, NeutronError>(true))
            .await
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_wrong_resource_key_aborts_before_consumer() {
        let mock = MockTransport::new(BASE);
        mock.respond_json(
            Method::GET,
            "/v2.0/ports",
            200,
            &serde_json::json!({
                "networks": [{"id": "a"}],
                "ports_links": [{"href": "/v2.0/ports?marker=a", "rel": "next"}]
            }),
        );

        let mut calls = 0;
        let err = pager(&mock)
            .each_page(|_| {
                calls += 1;
                Ok::<_, NeutronError>(true)
            })
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(calls, 0);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_next_page_stays_exhausted_after_error() {
        let mock = MockTransport::new(BASE);
        mock.respond(Method::GET, "/v2.0/ports", 503, "");

        let mut pager = pager(&mock);
        assert!(pager.next_page().await.is_err());
        assert!(pager.is_exhausted());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_with_next_link_ends_listing() {
        let mock = MockTransport::new(BASE);
        mock.respond(Method::GET, "/v2.0/ports", 200, page_body(&[], Some("/v2.0/ports")));

        let mut count = 0;
        pager(&mock)
            .each_page(|_| {
                count += 1;
                Ok::<_, NeutronError>(true)
            })
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_all_pages_merges_items() {
        let mock = three_pages();
        let merged = pager(&mock).all_pages().await.unwrap();

        assert_eq!(merged.resource(), "ports");
        assert_eq!(merged.next_page_url(), None);
        assert_eq!(ids(&merged), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_stream_yields_pages_lazily() {
        let mock = three_pages();
        let stream = pager(&mock).into_stream();
        futures::pin_mut!(stream);

        let first = stream.try_next().await.unwrap().unwrap();
        assert_eq!(ids(&first), vec!["a", "b"]);
        assert_eq!(mock.request_count(), 1);

        let rest: Vec<Page> = stream.try_collect().await.unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(mock.request_count(), 3);
    }
}
