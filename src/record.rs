//! Bibliographic records and the publication tuples built from them.

use serde::Serialize;
use std::collections::BTreeMap;

/// One bibliographic entry: an identifier, its entry type and its raw fields.
///
/// Field names are stored lower-cased. Values are kept as the plain strings
/// read from the source file, without any name or date parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibRecord {
    pub id: String,
    pub entry_type: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl BibRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entry_type: "misc".to_string(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly handy in tests and fixtures.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The identifier used for engine lookups; identifiers compare case-insensitively.
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }
}

/// Auxiliary links derived for a record, keyed by label (`ARXIV`, `DOI`).
pub type ExternalLinks = BTreeMap<String, String>;

/// The exported unit consumed by page templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    /// Lower-cased record identifier.
    pub key: String,
    /// Rendered citation (HTML).
    pub entry: String,
    pub record: BibRecord,
    pub external: ExternalLinks,
}
