//! External link extraction.
//!
//! Derives the preprint and DOI links shown next to a rendered citation.

use crate::record::{BibRecord, ExternalLinks};

const ARXIV_ABS: &str = "http://arxiv.org/abs";

/// Computes the external links for `record`.
///
/// An `ARXIV` link is produced for `eprinttype = arxiv` entries that carry an
/// `eprint`. A `DOI` entry is produced only when the DOI does not already
/// appear in `rendered_entry`, so styles that print the DOI inline do not show
/// it twice.
pub fn extract_links(record: &BibRecord, rendered_entry: &str) -> ExternalLinks {
    let mut external = ExternalLinks::new();

    if let (Some("arxiv"), Some(eprint)) = (record.get("eprinttype"), record.get("eprint")) {
        let url = match record.get("eprintclass") {
            Some(class) => format!("{ARXIV_ABS}/{class}/{eprint}"),
            None => format!("{ARXIV_ABS}/{eprint}"),
        };
        external.insert("ARXIV".to_string(), url);
    }

    if let Some(doi) = record.get("doi") {
        if !rendered_entry.contains(doi) {
            external.insert("DOI".to_string(), doi.to_string());
        }
    }

    external
}
