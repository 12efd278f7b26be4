//! Identifier extraction from pathway links.

use crate::error::ResolverError;
use regex::Regex;
use std::collections::HashSet;

/// Split a pathway link into its embedded identifiers.
///
/// A link carries a known prefix (scheme, host, `show_pathway?` and the map
/// token) followed by a `/`-separated identifier list. The prefix is matched
/// explicitly and a non-matching link is an error, never a silent truncation
/// at some fixed offset. Duplicates are removed keeping first-seen order so
/// the report walks each pathway's list deterministically.
pub fn link_to_identifiers(link: &str, prefix: &Regex) -> Result<Vec<String>, ResolverError> {
    let malformed = || ResolverError::MalformedLink {
        link: link.to_string(),
        expected: prefix.as_str().to_string(),
    };

    let matched = prefix.find(link).ok_or_else(malformed)?;
    if matched.start() != 0 {
        // configured patterns are anchored; reject a mid-string match outright
        return Err(malformed());
    }

    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for token in link[matched.end()..].split('/') {
        if token.is_empty() || !seen.insert(token) {
            continue;
        }
        codes.push(token.to_string());
    }
    Ok(codes)
}
