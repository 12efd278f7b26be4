//! KEGG orthology → EC number resolution pipeline.
//!
//! Extracts orthology identifiers (e.g. `K00844`) from KEGG pathway links,
//! resolves each one to its EC classification number via the per-identifier
//! entry page, and assembles a report grouped by pathway. Resolution runs
//! concurrently under a global ceiling, consults a flat per-identifier file
//! cache before any network access, and tolerates individual failures
//! without aborting the batch.
//!
//! ## Flow
//!
//! Catalog page → ranked pathway subset → deduplicated identifier union →
//! bounded concurrent resolution (cache first) → per-pathway report that
//! keeps resolved, resolved-but-empty, and failed identifiers distinct.
//!
//! Progress streams incrementally as [`events::ProgressEvent`]s so a caller
//! can render lines as items complete rather than waiting for the batch.

pub mod batch;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod link;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use batch::ResultMap;
pub use cache::CacheStore;
pub use catalog::SourceEntry;
pub use config::PipelineConfig;
pub use error::ResolverError;
pub use events::{EventReceiver, EventSender, ProgressEvent};
pub use fetch::{HttpFetcher, PageFetcher};
pub use pipeline::Pipeline;
pub use resolver::ItemResolver;
