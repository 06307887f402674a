//! Package search source over a NuGet V3 style search endpoint.
//!
//! Each fetch is one `GET {base_url}?q=..&skip=..&take=..&prerelease=..` and
//! the response carries the total hit count, which decides whether more pages
//! exist.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::source::{Entry, FetchError, Page, PageSource};

// ============================================================================
// Search API Types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    total_hits: usize,
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    id: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
}

impl SearchHit {
    fn into_entry(self) -> Entry {
        let entry = Entry::new(format!("{} {}", self.id, self.version));
        // Descriptions can be multi-paragraph; the list shows one line.
        match self
            .description
            .as_deref()
            .and_then(|d| d.lines().map(str::trim).find(|l| !l.is_empty()))
        {
            Some(line) => entry.with_summary(line),
            None => entry,
        }
    }
}

// ============================================================================
// Source Implementation
// ============================================================================

pub struct SearchSource {
    base_url: String,
    query: String,
    page_size: usize,
    include_prerelease: bool,
    label: String,
    client: reqwest::Client,
}

impl SearchSource {
    pub fn new(base_url: String, query: String, page_size: usize) -> Self {
        let label = format!("Searching for '{query}'...");
        Self {
            base_url,
            query,
            page_size: page_size.max(1),
            include_prerelease: false,
            label,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    async fn request(&self, start_index: usize) -> Result<Page<Entry>, FetchError> {
        let skip = start_index.to_string();
        let take = self.page_size.to_string();
        let prerelease = self.include_prerelease.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", self.query.as_str()),
                ("skip", skip.as_str()),
                ("take", take.as_str()),
                ("prerelease", prerelease.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Search response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Search API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        let received = parsed.data.len();
        let next_start = start_index + received;
        let has_more = received > 0 && next_start < parsed.total_hits;

        info!(
            "Search '{}' skip={} returned {} of {} hits",
            self.query, start_index, received, parsed.total_hits
        );

        Ok(Page::new(
            parsed.data.into_iter().map(SearchHit::into_entry).collect(),
            has_more,
            next_start,
        ))
    }
}

#[async_trait]
impl PageSource<Entry> for SearchSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch(
        &self,
        start_index: usize,
        cancel: &CancellationToken,
    ) -> Result<Page<Entry>, FetchError> {
        if self.base_url.is_empty() {
            return Err(FetchError::Config("search base_url is empty".to_string()));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Search '{}' skip={} cancelled", self.query, start_index);
                Err(FetchError::Cancelled)
            }
            result = self.request(start_index) => result,
        }
    }
}
