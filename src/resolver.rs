//! Single-identifier resolution.

use crate::cache::CacheStore;
use crate::error::ResolverError;
use crate::fetch::PageFetcher;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;
use tracing::debug;

/// Bracketed EC tag with exactly four dot-separated numeric groups.
const EC_TAG_PATTERN: &str = r"\[EC:((?:\d+\.){3}\d+)\]";

/// Resolves one identifier to its EC number, cache first, network second.
pub struct ItemResolver {
    fetcher: Arc<dyn PageFetcher>,
    cache: CacheStore,
    entry_url_base: String,
    ec_tag: Regex,
}

impl ItemResolver {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        cache: CacheStore,
        entry_url_base: impl Into<String>,
    ) -> Result<Self, ResolverError> {
        let ec_tag = Regex::new(EC_TAG_PATTERN)
            .map_err(|err| ResolverError::Config(format!("EC tag pattern: {err}")))?;

        Ok(Self {
            fetcher,
            cache,
            entry_url_base: entry_url_base.into(),
            ec_tag,
        })
    }

    /// Entry-page URL for `code`, also used as the manual-verification link.
    pub fn entry_url(&self, code: &str) -> String {
        format!("{}/{}", self.entry_url_base, code)
    }

    /// Resolve `code` to its EC number.
    ///
    /// An empty return means the entry page carried no `[EC:...]` tag, which
    /// is a successful resolution and is cached like any other; an error
    /// means the page could not be fetched or the value could not be
    /// persisted, and fails this identifier only.
    pub async fn resolve(&self, code: &str) -> Result<String, ResolverError> {
        if let Some(value) = self.cache.get(code)? {
            return Ok(value);
        }

        let url = self.entry_url(code);
        let body = self
            .fetcher
            .fetch_text(&url)
            .await
            .map_err(|source| ResolverError::Fetch { url, source })?;

        let text = page_text(&body);
        let value = self
            .ec_tag
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        debug!(code = %code, value = %value, "resolved from network");

        self.cache.put(code, &value)?;
        Ok(value)
    }
}

// Plain-text view of a document; the non-Send DOM is built and dropped here,
// never across an await point.
fn page_text(body: &str) -> String {
    Html::parse_document(body).root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> String {
        let ec_tag = Regex::new(EC_TAG_PATTERN).unwrap();
        ec_tag
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn captures_the_dotted_number() {
        assert_eq!(extract("foo [EC:1.22.3.44] bar"), "1.22.3.44");
    }

    #[test]
    fn no_tag_means_empty_value() {
        assert_eq!(extract("no classification on this page"), "");
    }

    #[test]
    fn three_groups_do_not_match() {
        assert_eq!(extract("[EC:1.2.3]"), "");
    }

    #[test]
    fn page_text_strips_markup() {
        let body = "<html><body><b>foo</b> [EC:2.7.1.1] <i>bar</i></body></html>";
        assert_eq!(extract(&page_text(body)), "2.7.1.1");
    }

    #[test]
    fn tag_split_by_markup_does_not_match_raw_html() {
        // the tag only appears once tags are stripped to plain text
        let body = "<html><body>[EC:<a href=\"/x\">2.7.1.1</a>]</body></html>";
        assert_eq!(extract(body), "");
        assert_eq!(extract(&page_text(body)), "2.7.1.1");
    }
}
