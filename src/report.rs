//! Report assembly.

use crate::batch::ResultMap;
use crate::catalog::SourceEntry;
use crate::error::ResolverError;
use crate::link::link_to_identifiers;
use regex::Regex;

/// Render the final report in pathway rank order.
///
/// Identifier lists are re-derived from each pathway link because the batch
/// union discarded the per-pathway association. Three outcomes per
/// identifier stay distinct — resolved, resolved-but-empty, and missing —
/// because collapsing the latter two would hide why an entry needs manual
/// verification.
pub fn assemble_report(
    ranked: &[SourceEntry],
    results: &ResultMap,
    link_prefix: &Regex,
    entry_url_base: &str,
) -> Result<String, ResolverError> {
    let mut out = String::new();

    for source in ranked {
        out.push_str(&format!("pathway {:05} ({})\n", source.id, source.url));
        out.push_str(&format!("{} entries declared\n", source.count));

        for code in link_to_identifiers(&source.url, link_prefix)? {
            let verify_url = format!("{entry_url_base}/{code}");
            match results.get(&code) {
                Some(value) if !value.trim().is_empty() => {
                    out.push_str(&format!("{code},{value}\n"));
                }
                Some(_) => {
                    out.push_str(&format!(
                        "result for {code} was empty, verify manually at {verify_url}\n"
                    ));
                }
                None => {
                    out.push_str(&format!(
                        "resolution for {code} did not succeed, verify manually at {verify_url}\n"
                    ));
                }
            }
        }
    }

    Ok(out)
}
