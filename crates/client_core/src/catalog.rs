use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Record, error::ServiceErrorBody, protocol::ArtworkListResponse};
use tracing::{debug, warn};
use url::Url;

use crate::{error::FetchError, pagination::PageRequest};

/// One page of the remote catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub records: Vec<Record>,
    pub total_count: u64,
}

/// Anything that can produce a page of records for a request.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, FetchError>;
}

/// HTTP client for an artworks-style listing endpoint.
///
/// Holds no state between calls and never retries.
pub struct CatalogClient {
    http: Client,
    endpoint: Url,
}

impl CatalogClient {
    pub fn new(catalog_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build catalog HTTP client")?;
        Self::with_http(http, catalog_url)
    }

    pub fn with_http(http: Client, catalog_url: &str) -> Result<Self> {
        let endpoint = Url::parse(catalog_url)
            .with_context(|| format!("invalid catalog url '{catalog_url}'"))?;
        Ok(Self { http, endpoint })
    }

    fn page_url(&self, request: PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.page_size.to_string())
            .append_pair("fields", &shared::protocol::RECORD_FIELDS.join(","));
        url
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage, FetchError> {
        let page = request.page;
        if page < 1 {
            return Err(FetchError::InvalidPage { page });
        }

        let url = self.page_url(request);
        debug!(page, page_size = request.page_size, %url, "catalog: requesting page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = ServiceErrorBody::parse(&body)
                .and_then(|body| body.message().map(str::to_string));
            warn!(page, status = status.as_u16(), ?detail, "catalog: request rejected");
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;
        let decoded = ArtworkListResponse::decode(&body)
            .map_err(|source| FetchError::Decode { page, source })?;

        debug!(
            page,
            records = decoded.data.len(),
            total = decoded.pagination.total,
            "catalog: page decoded"
        );
        Ok(CatalogPage {
            records: decoded.data,
            total_count: decoded.pagination.total,
        })
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
