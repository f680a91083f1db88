//! Record ordering for publication lists.
//!
//! Three orderings are supported: by identifier, by date (newest first) and
//! by the raw author string. Every sort is stable.

use crate::record::BibRecord;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Errors that abort a sort. No partial output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Invalid sort option: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown month '{0}'")]
    UnknownMonth(String),

    #[error("Invalid year '{year}' in entry '{id}'")]
    InvalidYear { id: String, year: String },
}

/// The key a publication list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriterion {
    Key,
    #[default]
    Date,
    Name,
}

impl FromStr for SortCriterion {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key" => Ok(SortCriterion::Key),
            "date" => Ok(SortCriterion::Date),
            "name" => Ok(SortCriterion::Name),
            other => Err(SortError::InvalidConfiguration(other.to_string())),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortCriterion::Key => "key",
            SortCriterion::Date => "date",
            SortCriterion::Name => "name",
        };
        f.write_str(name)
    }
}

/// Maps a month field ("Jan", "january", "DEC", ...) to `0..=11`.
///
/// Only the first three characters are considered, case-insensitively.
pub fn month_ordinal(month: &str) -> Result<u32, SortError> {
    let normalized: String = month.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == normalized)
        .map(|i| i as u32)
        .ok_or_else(|| SortError::UnknownMonth(month.to_string()))
}

/// Returns the records ordered by `criterion`.
///
/// # Errors
///
/// A date sort fails if any record carries an unrecognised month or a
/// non-numeric year.
pub fn sort_records(
    records: &[BibRecord],
    criterion: SortCriterion,
) -> Result<Vec<BibRecord>, SortError> {
    match criterion {
        SortCriterion::Key => {
            let mut sorted = records.to_vec();
            sorted.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(sorted)
        }
        SortCriterion::Name => {
            let mut sorted = records.to_vec();
            sorted.sort_by(|a, b| {
                a.get("author")
                    .unwrap_or("")
                    .cmp(b.get("author").unwrap_or(""))
            });
            Ok(sorted)
        }
        SortCriterion::Date => {
            // Keys are computed up front so a bad month fails before anything moves.
            let mut keyed = records
                .iter()
                .map(|r| date_key(r).map(|k| (k, r.clone())))
                .collect::<Result<Vec<_>, _>>()?;
            keyed.sort_by_key(|(k, _)| Reverse(*k));
            Ok(keyed.into_iter().map(|(_, r)| r).collect())
        }
    }
}

fn date_key(record: &BibRecord) -> Result<(i64, u32), SortError> {
    let year = match record.get("year") {
        Some(y) => y.trim().parse::<i64>().map_err(|_| SortError::InvalidYear {
            id: record.id.clone(),
            year: y.to_string(),
        })?,
        None => 0,
    };
    let month = month_ordinal(record.get("month").unwrap_or("jan"))?;
    Ok((year, month))
}
