//! Fake page fetcher shared by the integration tests: canned pages, failure
//! injection, and in-flight accounting so concurrency bounds are observable.

#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use kegg_resolver::PageFetcher;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Register an entry page for `code` whose plain text carries `ec` as an
    /// `[EC:...]` tag, or no tag at all.
    pub fn with_entry(self, code: &str, ec: Option<&str>) -> Self {
        let tag = ec.map(|ec| format!("[EC:{ec}]")).unwrap_or_default();
        let body = format!("<html><body><b>{code}</b> entry page {tag}</body></html>");
        self.with_page(format!("https://www.kegg.jp/entry/{code}"), body)
    }

    pub fn with_failing_entry(mut self, code: &str) -> Self {
        self.failing.insert(format!("https://www.kegg.jp/entry/{code}"));
        self
    }

    /// Total fetches issued, cache hits excluded by construction.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // suspend so sibling fetches overlap and the ceiling is observable
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(url) {
            bail!("injected failure for {url}");
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no page registered for {url}"))
    }
}
