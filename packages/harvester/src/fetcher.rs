//! HTTP fetching for search result pages.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{HarvestError, Result};
use crate::types::FetchedPage;

/// HTTP client wrapper for fetching result pages.
///
/// One fetcher is shared across all page tasks; `reqwest::Client` clones
/// cheaply around an internal connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher with browser-like request headers.
    pub fn new() -> Result<Self> {
        // Use a browser-like User-Agent to avoid bot detection
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .expect("static header value"),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5".parse().expect("static header value"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Fetch one page. A transport error or non-success status is fatal.
    pub async fn fetch(&self, url: Url) -> Result<FetchedPage> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        debug!(url = %url, content_length = html.len(), "Page fetched");

        Ok(FetchedPage::new(url, html))
    }
}
