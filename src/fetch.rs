//! Remote page fetching.
//!
//! The pipeline only needs load-by-URL; everything structural happens on the
//! returned body. Keeping the capability behind a trait lets tests inject
//! canned pages and failures without a network.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Load-by-URL capability the pipeline depends on.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw document body at `url`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher used in production.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(concat!("kegg-resolver/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {status} fetching {url}"));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {url}"))
    }
}
