//! Picsum listing source.
//!
//! Pages through `https://picsum.photos/v2/list?page=N&limit=M`, which
//! answers with a JSON array of image records and an empty array once the
//! listing runs out.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use super::{ImageSource, Item};
use crate::error::FetchError;

/// Default listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://picsum.photos/v2/list";

/// A Picsum-compatible listing endpoint.
pub struct PicsumSource {
    /// Listing URL without the paging query.
    pub endpoint: String,
    client: Client,
}

impl PicsumSource {
    /// Create a source for `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` — listing URL, e.g. [`DEFAULT_ENDPOINT`].
    /// * `timeout` — per-request timeout; a stalled request surfaces as a
    ///   network error once it elapses.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Build the URL for one page.
    pub fn page_url(&self, page: u32, limit: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| FetchError::Network(format!("invalid endpoint {}: {e}", self.endpoint)))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Decode an already-fetched response body.
    ///
    /// Pure (no I/O) so tests can exercise decoding without the network.
    pub fn parse_page(body: &[u8]) -> Result<Vec<Item>, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl ImageSource for PicsumSource {
    fn name(&self) -> &str {
        "picsum"
    }

    fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Item>, FetchError> {
        let url = self.page_url(page, limit)?;
        tracing::debug!(%url, "requesting page");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.bytes()?;
        Self::parse_page(&body)
    }
}
