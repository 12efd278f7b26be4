//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base of the per-identifier entry pages, also used for the
/// manual-verification links in the report.
pub const DEFAULT_ENTRY_URL_BASE: &str = "https://www.kegg.jp/entry";

/// Anchored prefix a pathway link must carry before its `/`-separated
/// identifier list. The map token between `?` and the first `/` varies per
/// pathway, so it is matched structurally rather than at a fixed offset.
pub const DEFAULT_LINK_PREFIX_PATTERN: &str =
    r"^https?://www\.kegg\.jp/kegg-bin/show_pathway\?[^/]+/";

/// Structural path of the catalog's pathway anchors.
pub const DEFAULT_CATALOG_SELECTOR: &str = "#main p a";

/// Tunables for one pipeline run.
///
/// The sentinel id marks a catalog boundary: entries at or after its first
/// occurrence are not real pathway categories. That meaning is operator
/// knowledge about how the catalog is laid out, not something derivable from
/// the data, so it is configuration rather than a literal at the use site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Entry-page URL base; the identifier is appended as a path segment.
    pub entry_url_base: String,
    /// CSS path selecting the catalog's pathway anchors.
    pub catalog_selector: String,
    /// Anchored regex stripped from a pathway link before identifier
    /// extraction.
    pub link_prefix_pattern: String,
    /// Catalog id at which ranked eligibility ends.
    pub sentinel_id: u32,
    /// How many top-ranked pathways the report covers.
    pub top_sources: usize,
    /// Ceiling on simultaneous entry-page fetches.
    pub max_concurrent: usize,
    /// Directory holding the per-identifier `<id>.data` cache files.
    pub cache_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry_url_base: DEFAULT_ENTRY_URL_BASE.to_string(),
            catalog_selector: DEFAULT_CATALOG_SELECTOR.to_string(),
            link_prefix_pattern: DEFAULT_LINK_PREFIX_PATTERN.to_string(),
            sentinel_id: 5200,
            top_sources: 10,
            max_concurrent: 10,
            cache_dir: PathBuf::from("data"),
        }
    }
}

impl PipelineConfig {
    /// Entry-page URL for one identifier.
    pub fn entry_url(&self, code: &str) -> String {
        format!("{}/{}", self.entry_url_base, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_url_appends_code() {
        let config = PipelineConfig::default();
        assert_eq!(config.entry_url("K00844"), "https://www.kegg.jp/entry/K00844");
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"sentinel_id": 4100, "top_sources": 3}"#).unwrap();
        assert_eq!(config.sentinel_id, 4100);
        assert_eq!(config.top_sources, 3);
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.entry_url_base, DEFAULT_ENTRY_URL_BASE);
    }
}
