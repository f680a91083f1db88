//! Output generation for the page-generation context.
//!
//! The context is a set of named JSON values handed to page templates.
//! Publication lists are stored under [`PUBLICATIONS`].

use crate::record::PublicationRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// Context name under which the publication list is stored.
pub const PUBLICATIONS: &str = "publications";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationContext {
    values: BTreeMap<String, Value>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set_publications(&mut self, publications: &[PublicationRecord]) {
        let value = Value::Array(publications.iter().map(publication_value).collect());
        self.insert(PUBLICATIONS, value);
    }
}

fn publication_value(publication: &PublicationRecord) -> Value {
    serde_json::json!({
        "key": publication.key,
        "entry": publication.entry,
        "record": publication.record,
        "external": publication.external,
    })
}

/// Generates the final output document: the context as pretty-printed JSON.
pub fn generate_output(context: &GenerationContext) -> String {
    let object: serde_json::Map<String, Value> = context
        .values
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let mut output = serde_json::to_string_pretty(&Value::Object(object))
        .unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}
