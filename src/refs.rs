//! BibTeX reference loading.
//!
//! Reads a `.bib` file once and converts every entry into a [`BibRecord`]
//! with plain string fields. Parsing itself is delegated to `biblatex`.

use crate::record::BibRecord;
use biblatex::{Bibliography, Chunk, Entry, Spanned};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading references.
#[derive(Error, Debug)]
pub enum RefsError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid BibTeX: {0}")]
    ParseError(String),
}

/// Loads references from a BibTeX file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid BibTeX.
pub fn load_refs(path: &Path) -> Result<Vec<BibRecord>, RefsError> {
    let content = fs::read_to_string(path)?;
    parse_refs(&content)
}

/// Parses BibTeX source into records, in file order.
pub fn parse_refs(content: &str) -> Result<Vec<BibRecord>, RefsError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let bibliography =
        Bibliography::parse(content).map_err(|e| RefsError::ParseError(e.to_string()))?;

    Ok(bibliography.iter().map(record_from_entry).collect())
}

fn record_from_entry(entry: &Entry) -> BibRecord {
    let mut record = BibRecord::new(entry.key.clone());
    record.entry_type = entry.entry_type.to_string().to_lowercase();

    for (name, chunks) in &entry.fields {
        let value = chunks_to_string(chunks);

        if name.eq_ignore_ascii_case("month") {
            record.set(name, normalize_month(&value));
        } else {
            record.set(name, value);
        }
    }

    record
}

/// Flattens field chunks; math keeps its `$…$` delimiters.
fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => s.clone(),
            Chunk::Math(s) => format!("${s}$"),
        })
        .collect()
}

/// Numeric months (`month = 3`) become their three-letter code so the date
/// sort sees a uniform representation. Anything else is kept verbatim.
fn normalize_month(value: &str) -> String {
    const CODES: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    match value.trim().parse::<usize>() {
        Ok(n @ 1..=12) => CODES[n - 1].to_string(),
        _ => value.to_string(),
    }
}
