//! Catalog listing and ranking.

use crate::error::ResolverError;
use crate::fetch::PageFetcher;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// One catalog row, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Numeric pathway id from the anchor text.
    pub id: u32,
    /// Absolute link to the pathway page carrying the identifier list.
    pub url: String,
    /// Declared item count from the parenthesized text after the anchor.
    pub count: u32,
}

/// Fetch the catalog page and extract its pathway rows in page order.
///
/// Any anchor whose text is not an integer, or whose trailing text carries
/// no parenthesized count, fails the whole call: the page shape is a
/// structural precondition and downstream ranking needs every count.
pub async fn list_catalog(
    fetcher: &dyn PageFetcher,
    url: &str,
    selector: &str,
) -> Result<Vec<SourceEntry>, ResolverError> {
    let body = fetcher
        .fetch_text(url)
        .await
        .map_err(|source| ResolverError::Fetch {
            url: url.to_string(),
            source,
        })?;
    let entries = parse_catalog(&body, url, selector)?;
    debug!(url = %url, entries = entries.len(), "catalog listed");
    Ok(entries)
}

// Synchronous page-shape handling, kept off the async path so the non-Send
// DOM never lives across an await point.
fn parse_catalog(
    body: &str,
    base_url: &str,
    selector: &str,
) -> Result<Vec<SourceEntry>, ResolverError> {
    let anchors = Selector::parse(selector)
        .map_err(|err| ResolverError::Config(format!("bad catalog selector `{selector}`: {err}")))?;
    let count_re = Regex::new(r"\((\d+)\)")
        .map_err(|err| ResolverError::Config(format!("count pattern: {err}")))?;
    let base = Url::parse(base_url).map_err(|err| {
        ResolverError::CatalogStructure(format!("catalog url `{base_url}` is not absolute: {err}"))
    })?;

    let document = Html::parse_document(body);
    let mut entries = Vec::new();

    for anchor in document.select(&anchors) {
        let text: String = anchor.text().collect();
        let text = text.trim();
        let id: u32 = text.parse().map_err(|_| {
            ResolverError::CatalogStructure(format!("anchor text `{text}` is not a pathway id"))
        })?;

        let href = anchor.value().attr("href").ok_or_else(|| {
            ResolverError::CatalogStructure(format!("anchor for pathway {id:05} has no href"))
        })?;
        let url = base
            .join(href)
            .map_err(|err| {
                ResolverError::CatalogStructure(format!(
                    "href `{href}` of pathway {id:05} does not resolve: {err}"
                ))
            })?
            .to_string();

        let trailing = anchor
            .next_sibling()
            .and_then(|node| node.value().as_text().map(|t| t.to_string()))
            .unwrap_or_default();
        let count = count_re
            .captures(&trailing)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| {
                ResolverError::CatalogStructure(format!(
                    "no entry count after pathway {id:05} (text: `{}`)",
                    trailing.trim()
                ))
            })?;

        entries.push(SourceEntry { id, url, count });
    }

    if entries.is_empty() {
        return Err(ResolverError::CatalogStructure(format!(
            "no pathway anchors matched `{selector}`"
        )));
    }
    Ok(entries)
}

/// Apply the catalog boundary and keep the busiest pathways.
///
/// Entries at or after the first occurrence of `sentinel_id` are excluded;
/// the sentinel marks where catalog rows stop being real categories. When
/// the sentinel never occurs the whole list is eligible. Survivors are
/// ranked by declared count, descending; the sort is stable so ties keep
/// page order.
pub fn rank_sources(entries: Vec<SourceEntry>, sentinel_id: u32, top_n: usize) -> Vec<SourceEntry> {
    let boundary = entries
        .iter()
        .position(|entry| entry.id == sentinel_id)
        .unwrap_or(entries.len());

    let mut eligible: Vec<SourceEntry> = entries.into_iter().take(boundary).collect();
    eligible.sort_by(|a, b| b.count.cmp(&a.count));
    eligible.truncate(top_n);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CATALOG_SELECTOR;

    const CATALOG_URL: &str = "https://www.kegg.jp/kegg-bin/get_htext?ko01100.keg";

    fn entry(id: u32, count: u32) -> SourceEntry {
        SourceEntry {
            id,
            url: format!("https://www.kegg.jp/kegg-bin/show_pathway?map{id:05}/K00001"),
            count,
        }
    }

    #[test]
    fn parses_anchors_in_page_order() {
        let body = r#"<html><body><div id="main"><p>
            <a href="/kegg-bin/show_pathway?map00010/K00844/K12407">10</a> Glycolysis (65)<br>
            <a href="/kegg-bin/show_pathway?map00020/K01647">20</a> Citrate cycle (30)<br>
        </p></div></body></html>"#;

        let entries = parse_catalog(body, CATALOG_URL, DEFAULT_CATALOG_SELECTOR).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 10);
        assert_eq!(entries[0].count, 65);
        assert_eq!(
            entries[0].url,
            "https://www.kegg.jp/kegg-bin/show_pathway?map00010/K00844/K12407"
        );
        assert_eq!(entries[1].id, 20);
        assert_eq!(entries[1].count, 30);
    }

    #[test]
    fn non_numeric_anchor_text_fails_the_whole_call() {
        let body = r#"<div id="main"><p>
            <a href="/kegg-bin/show_pathway?map00010/K00844">10</a> Glycolysis (65)<br>
            <a href="/kegg-bin/show_pathway?map00020/K01647">overview</a> Citrate cycle (30)<br>
        </p></div>"#;

        let err = parse_catalog(body, CATALOG_URL, DEFAULT_CATALOG_SELECTOR).unwrap_err();
        assert!(matches!(err, ResolverError::CatalogStructure(_)));
    }

    #[test]
    fn missing_count_fails_the_whole_call() {
        let body = r#"<div id="main"><p>
            <a href="/kegg-bin/show_pathway?map00010/K00844">10</a> Glycolysis<br>
        </p></div>"#;

        let err = parse_catalog(body, CATALOG_URL, DEFAULT_CATALOG_SELECTOR).unwrap_err();
        assert!(matches!(err, ResolverError::CatalogStructure(_)));
    }

    #[test]
    fn empty_anchor_set_is_structural() {
        let body = "<div id=\"other\"><p><a href=\"x\">10</a> (5)</p></div>";
        let err = parse_catalog(body, CATALOG_URL, DEFAULT_CATALOG_SELECTOR).unwrap_err();
        assert!(matches!(err, ResolverError::CatalogStructure(_)));
    }

    #[test]
    fn sentinel_and_everything_after_are_excluded() {
        let entries = vec![entry(1, 5), entry(2, 50), entry(5200, 999), entry(3, 1)];
        let ranked = rank_sources(entries, 5200, 2);
        assert_eq!(
            ranked.iter().map(|e| (e.id, e.count)).collect::<Vec<_>>(),
            vec![(2, 50), (1, 5)]
        );
    }

    #[test]
    fn absent_sentinel_leaves_whole_list_eligible() {
        let entries = vec![entry(1, 5), entry(2, 50)];
        let ranked = rank_sources(entries, 5200, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, 2);
    }

    #[test]
    fn ties_keep_page_order() {
        let entries = vec![entry(7, 10), entry(8, 10), entry(9, 10)];
        let ranked = rank_sources(entries, 5200, 3);
        assert_eq!(ranked.iter().map(|e| e.id).collect::<Vec<_>>(), vec![7, 8, 9]);
    }
}
