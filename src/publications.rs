//! Publication list assembly.
//!
//! Sorts the records, renders them through the citation engine and pairs
//! each rendered entry with its external links. Every failure on this path
//! degrades to "no publications" plus a log record; nothing is raised to the
//! caller.

use crate::engine::CitationEngine;
use crate::links::extract_links;
use crate::output::GenerationContext;
use crate::processor::render_bibliography;
use crate::record::{BibRecord, PublicationRecord};
use crate::refs::load_refs;
use crate::settings::Settings;
use crate::sort::{sort_records, SortCriterion};
use tracing::{debug, error, info};

/// Builds the ordered publication list.
///
/// Returns `None` when the run is skipped: the records could not be sorted,
/// or the engine rendered nothing. Records the engine could not resolve are
/// left out; the rest keep their sorted order.
pub fn assemble(
    engine: &mut dyn CitationEngine,
    records: &[BibRecord],
    criterion: SortCriterion,
    style_id: &str,
    suppress_known_field_warnings: bool,
) -> Option<Vec<PublicationRecord>> {
    let entries = match sort_records(records, criterion) {
        Ok(entries) => entries,
        Err(e) => {
            error!("{}", e);
            return None;
        }
    };

    let bibitems = render_bibliography(engine, &entries, style_id, suppress_known_field_warnings);
    if bibitems.is_empty() {
        debug!(style = style_id, "No bibliography entries rendered");
        return None;
    }

    let publications = entries
        .into_iter()
        .filter_map(|record| {
            let key = record.key();
            let entry = bibitems.get(&key)?.clone();
            let external = extract_links(&record, &entry);
            Some(PublicationRecord {
                key,
                entry,
                record,
                external,
            })
        })
        .collect();

    Some(publications)
}

/// Populates `context` with the publication list described by `settings`.
///
/// Does nothing when the source file or the style is not configured. Sort
/// criterion errors, unreadable sources and rendering failures are logged and
/// leave the context untouched.
pub fn add_publications(
    settings: &Settings,
    context: &mut GenerationContext,
    engine: &mut dyn CitationEngine,
) {
    let Some((src, style_id)) = settings.required() else {
        return;
    };

    let criterion: SortCriterion = match settings.sort.parse() {
        Ok(criterion) => criterion,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let records = match load_refs(src) {
        Ok(records) => records,
        Err(e) => {
            error!(path = %src.display(), "{}", e);
            return;
        }
    };

    if let Some(publications) = assemble(
        engine,
        &records,
        criterion,
        style_id,
        settings.suppress_bibtex_warning,
    ) {
        info!(
            count = publications.len(),
            "Added {} publication(s) from {}",
            publications.len(),
            src.display()
        );
        context.set_publications(&publications);
    }
}
