//! Citation engine boundary.
//!
//! A [`CitationEngine`] turns records plus a style into formatted entries
//! using a register-then-render protocol: every citation is registered
//! before any entry is rendered, so numbering can see the whole batch.
//!
//! [`BasicEngine`] is the built-in implementation, driven by a
//! [`StyleDefinition`].

use crate::record::BibRecord;
use crate::style::{self, LayoutPart, StyleDefinition, StyleError};
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot load style '{id}': {source}")]
    Style {
        id: String,
        #[source]
        source: StyleError,
    },

    #[error("No style loaded")]
    NoStyle,
}

/// A warning emitted by the engine while loading data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineWarning {
    pub message: String,
}

/// Collects warnings raised inside a [`capture_warnings`] region.
#[derive(Debug, Default)]
pub struct WarningCapture {
    warnings: Vec<EngineWarning>,
}

impl WarningCapture {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(EngineWarning {
            message: message.into(),
        });
    }
}

/// Runs `f` with a fresh capture and hands back everything it recorded.
///
/// Warnings never leak past the region: the capture is owned by this call
/// and consumed when it returns.
pub fn capture_warnings<T>(f: impl FnOnce(&mut WarningCapture) -> T) -> (T, Vec<EngineWarning>) {
    let mut capture = WarningCapture::default();
    let value = f(&mut capture);
    (value, capture.warnings)
}

/// A formatted bibliography entry, keyed by lower-cased identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub key: String,
    pub html: String,
}

pub trait CitationEngine {
    /// Loads the style identified by `style_id` and returns its definition.
    fn load_style(&mut self, style_id: &str) -> Result<StyleDefinition, EngineError>;

    /// Makes `records` available for citation, reporting field-level
    /// compatibility problems to `warnings`.
    fn load_source(&mut self, records: &[BibRecord], warnings: &mut WarningCapture);

    /// Registers one citation. Registration order is the numbering order.
    fn register(&mut self, key: &str);

    /// Renders every registered citation. Keys with no matching record are
    /// reported through `on_unresolved` and produce no entry.
    fn render(
        &mut self,
        on_unresolved: &mut dyn FnMut(&str),
    ) -> Result<Vec<RenderedEntry>, EngineError>;
}

/// Fields the built-in engine knows about. Anything else is reported as
/// unsupported when loading.
const SUPPORTED_FIELDS: &[&str] = &[
    "address",
    "author",
    "booktitle",
    "doi",
    "edition",
    "editor",
    "eprint",
    "eprintclass",
    "eprinttype",
    "institution",
    "journal",
    "journaltitle",
    "month",
    "note",
    "number",
    "pages",
    "publisher",
    "school",
    "series",
    "title",
    "type",
    "url",
    "volume",
    "year",
];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Built-in HTML renderer.
#[derive(Debug, Default)]
pub struct BasicEngine {
    style: Option<StyleDefinition>,
    records: HashMap<String, BibRecord>,
    registered: Vec<String>,
    seen: HashSet<String>,
}

impl BasicEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `number` is `None` for unnumbered layouts; `citation-number` parts are
    /// then left out.
    fn render_record(
        &self,
        parts: &[LayoutPart],
        record: &BibRecord,
        number: Option<usize>,
    ) -> String {
        let mut html = String::new();
        for part in parts {
            let value = match part.variable.as_str() {
                "citation-number" => number.map(|n| n.to_string()),
                "container-title" => record
                    .get("journal")
                    .or_else(|| record.get("journaltitle"))
                    .or_else(|| record.get("booktitle"))
                    .map(str::to_string),
                "author" => record.get("author").map(format_authors),
                other => record.get(other).map(str::to_string),
            };
            let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let text = escape_html(&WHITESPACE.replace_all(value.trim(), " "));
            html.push_str(&escape_html(&part.prefix));
            if part.italic {
                html.push_str(&format!("<i>{text}</i>"));
            } else {
                html.push_str(&text);
            }
            html.push_str(&escape_html(&part.suffix));
        }
        // A separator after the last rendered part has nothing to separate.
        html.trim_end()
            .trim_end_matches([',', ';', ':'])
            .trim_end()
            .to_string()
    }
}

impl CitationEngine for BasicEngine {
    fn load_style(&mut self, style_id: &str) -> Result<StyleDefinition, EngineError> {
        let definition = style::resolve_style(style_id).map_err(|source| EngineError::Style {
            id: style_id.to_string(),
            source,
        })?;
        self.style = Some(definition.clone());
        Ok(definition)
    }

    fn load_source(&mut self, records: &[BibRecord], warnings: &mut WarningCapture) {
        self.records.clear();
        self.registered.clear();
        self.seen.clear();

        let mut unsupported = BTreeSet::new();
        for record in records {
            for name in record.fields.keys() {
                if !SUPPORTED_FIELDS.contains(&name.as_str()) {
                    unsupported.insert(name.clone());
                }
            }
            self.records.insert(record.key(), record.clone());
        }
        for name in unsupported {
            warnings.warn(format!("Unsupported BibTeX field '{name}'"));
        }
    }

    fn register(&mut self, key: &str) {
        let key = key.to_lowercase();
        if self.seen.insert(key.clone()) {
            self.registered.push(key);
        }
    }

    fn render(
        &mut self,
        on_unresolved: &mut dyn FnMut(&str),
    ) -> Result<Vec<RenderedEntry>, EngineError> {
        let style = self.style.as_ref().ok_or(EngineError::NoStyle)?;
        let Some(layout) = &style.bibliography else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for key in &self.registered {
            match self.records.get(key) {
                Some(record) => {
                    let number = layout.numbered.then_some(entries.len() + 1);
                    let html = self.render_record(&layout.parts, record, number);
                    entries.push(RenderedEntry {
                        key: key.clone(),
                        html,
                    });
                }
                None => on_unresolved(key),
            }
        }
        Ok(entries)
    }
}

/// Turns a BibTeX author list ("Doe, John and Smith, Jane") into display form.
fn format_authors(raw: &str) -> String {
    let names: Vec<String> = raw
        .split(" and ")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|name| match name.split_once(',') {
            Some((family, given)) => format!("{} {}", given.trim(), family.trim()),
            None => name.to_string(),
        })
        .collect();

    match names.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
