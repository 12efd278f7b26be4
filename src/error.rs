//! Error types for the resolution pipeline.
//!
//! Failure kinds the pipeline owns are modeled with thiserror here; the HTTP
//! edge in `fetch` reports through `anyhow` with context and is wrapped into
//! [`ResolverError::Fetch`] at the call sites that know which URL was asked
//! for.

use thiserror::Error;

/// Everything that can go wrong between a catalog URL and a finished report.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The pathway link does not start with the expected prefix pattern, so
    /// no identifier list can be extracted from it.
    #[error("malformed pathway link `{link}` (expected prefix matching `{expected}`)")]
    MalformedLink { link: String, expected: String },

    /// The catalog page does not have the expected shape. Fatal to the
    /// enclosing listing call; the batch does not proceed.
    #[error("catalog page structure unexpected: {0}")]
    CatalogStructure(String),

    /// A page fetch failed. Fatal when the page is the catalog itself,
    /// otherwise a per-identifier failure absorbed by the batch.
    #[error("fetch failed for {url}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Writing a per-identifier cache file failed. Treated as a resolution
    /// failure for that identifier.
    #[error("cache write failed for {key}")]
    CacheWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a per-identifier cache file failed.
    #[error("cache read failed for {key}")]
    CacheRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured pattern or selector did not compile.
    #[error("invalid configuration: {0}")]
    Config(String),
}
