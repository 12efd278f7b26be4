//! Bounded concurrent batch resolution.

use crate::events::{EventSender, ProgressEvent};
use crate::resolver::ItemResolver;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Identifier → resolved value, accumulated over one batch run.
pub type ResultMap = HashMap<String, String>;

/// Resolve every identifier in `codes` with at most `max_concurrent`
/// entry-page fetches in flight at once.
///
/// `codes` must already be deduplicated. All resolutions are issued as
/// futures gated by one semaphore and polled together, so results land in
/// the map in completion order. A failed resolution is logged, reported on
/// `events`, and left out of the map; in-flight and remaining work
/// continues. Should a key somehow complete twice, the first value wins.
pub async fn resolve_batch(
    resolver: &ItemResolver,
    codes: &[String],
    max_concurrent: usize,
    events: &EventSender,
) -> ResultMap {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    let mut in_flight: FuturesUnordered<_> = codes
        .iter()
        .map(|code| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // never closed, so acquire cannot fail
                let _permit = semaphore.acquire().await;
                let outcome = resolver.resolve(code).await;
                (code.clone(), outcome)
            }
        })
        .collect();

    let mut results = ResultMap::with_capacity(codes.len());
    while let Some((code, outcome)) = in_flight.next().await {
        match outcome {
            Ok(value) => insert_once(&mut results, code, value, events),
            Err(err) => {
                warn!(code = %code, error = %err, "resolution failed; continuing batch");
                let _ = events.send(ProgressEvent::ResolutionFailed {
                    code,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        resolved = results.len(),
        requested = codes.len(),
        "batch complete"
    );
    results
}

// Insert-once discipline: duplicates are an anomaly to surface, not an
// error, and the value already present is kept.
fn insert_once(results: &mut ResultMap, code: String, value: String, events: &EventSender) {
    if results.contains_key(&code) {
        warn!(code = %code, "duplicate resolution result; keeping first value");
        let _ = events.send(ProgressEvent::DuplicateResult { code });
        return;
    }
    let _ = events.send(ProgressEvent::Resolved {
        code: code.clone(),
        value: value.clone(),
    });
    results.insert(code, value);
}
