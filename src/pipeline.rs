//! Driving interface behind the CLI: the single-link flow and the full
//! catalog flow.

use crate::batch::{resolve_batch, ResultMap};
use crate::cache::CacheStore;
use crate::catalog::{list_catalog, rank_sources};
use crate::config::PipelineConfig;
use crate::error::ResolverError;
use crate::events::{EventSender, ProgressEvent};
use crate::fetch::PageFetcher;
use crate::link::link_to_identifiers;
use crate::report::assemble_report;
use crate::resolver::ItemResolver;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// The resolution pipeline, wired over a fetcher and a cache directory.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn PageFetcher>,
    resolver: ItemResolver,
    link_prefix: Regex,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self, ResolverError> {
        let link_prefix = Regex::new(&config.link_prefix_pattern).map_err(|err| {
            ResolverError::Config(format!(
                "bad link prefix pattern `{}`: {err}",
                config.link_prefix_pattern
            ))
        })?;
        let cache = CacheStore::open(&config.cache_dir)?;
        let resolver = ItemResolver::new(
            Arc::clone(&fetcher),
            cache,
            config.entry_url_base.clone(),
        )?;

        Ok(Self {
            config,
            fetcher,
            resolver,
            link_prefix,
        })
    }

    /// Resolve every identifier embedded in a single pathway link.
    ///
    /// `(identifier, value)` pairs stream on `events` as resolutions
    /// complete; the returned map is the final result set, with failed
    /// identifiers absent.
    pub async fn resolve_one(
        &self,
        link: &str,
        events: &EventSender,
    ) -> Result<ResultMap, ResolverError> {
        let codes = link_to_identifiers(link, &self.link_prefix)?;
        let _ = events.send(ProgressEvent::ResolutionStarted {
            unique: codes.len(),
        });

        Ok(resolve_batch(&self.resolver, &codes, self.config.max_concurrent, events).await)
    }

    /// Full catalog flow: list the catalog, rank its pathways, resolve the
    /// deduplicated identifier union, and assemble the per-pathway report.
    ///
    /// Only a structural failure of the catalog page aborts the call; a
    /// failed individual resolution surfaces as an event and a
    /// verify-manually line in the report.
    pub async fn resolve_catalog(
        &self,
        url: &str,
        events: &EventSender,
    ) -> Result<String, ResolverError> {
        let entries =
            list_catalog(self.fetcher.as_ref(), url, &self.config.catalog_selector).await?;
        let listed = entries.len();
        let ranked = rank_sources(entries, self.config.sentinel_id, self.config.top_sources);
        let _ = events.send(ProgressEvent::CatalogRanked {
            listed,
            ranked: ranked.len(),
        });

        let mut codes = Vec::new();
        for source in &ranked {
            codes.extend(link_to_identifiers(&source.url, &self.link_prefix)?);
        }
        let total = codes.len();
        let mut seen = HashSet::new();
        codes.retain(|code| seen.insert(code.clone()));
        info!(total, unique = codes.len(), "identifier extraction complete");
        let _ = events.send(ProgressEvent::IdentifiersExtracted {
            total,
            unique: codes.len(),
        });

        let _ = events.send(ProgressEvent::ResolutionStarted {
            unique: codes.len(),
        });
        let results =
            resolve_batch(&self.resolver, &codes, self.config.max_concurrent, events).await;

        assemble_report(
            &ranked,
            &results,
            &self.link_prefix,
            &self.config.entry_url_base,
        )
    }
}
