//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use publist::engine::{CitationEngine, EngineError, RenderedEntry, WarningCapture};
use publist::style::{self, StyleDefinition};
use publist::BibRecord;
use tempfile::NamedTempFile;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// A tracing layer that records every event's level and message.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub fn records(&self) -> Vec<(Level, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Runs `f` with a subscriber that captures logs, returning both.
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(logs.clone());
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs)
}

/// An engine that renders "<key>" for every known record, except for keys
/// listed in `unresolvable`, and logs the order of protocol calls.
#[derive(Default)]
pub struct StubEngine {
    pub unresolvable: Vec<String>,
    pub load_warnings: Vec<String>,
    pub calls: Vec<String>,
    known: Vec<String>,
    registered: Vec<String>,
    style: Option<StyleDefinition>,
}

impl StubEngine {
    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            unresolvable: keys.iter().map(|k| k.to_lowercase()).collect(),
            ..Self::default()
        }
    }

    /// An engine that reports `messages` while loading the source.
    pub fn with_load_warnings(messages: &[&str]) -> Self {
        Self {
            load_warnings: messages.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl CitationEngine for StubEngine {
    fn load_style(&mut self, style_id: &str) -> Result<StyleDefinition, EngineError> {
        self.calls.push("load_style".to_string());
        let definition = style::resolve_style(style_id).map_err(|source| EngineError::Style {
            id: style_id.to_string(),
            source,
        })?;
        self.style = Some(definition.clone());
        Ok(definition)
    }

    fn load_source(&mut self, records: &[BibRecord], warnings: &mut WarningCapture) {
        self.calls.push("load_source".to_string());
        for message in &self.load_warnings {
            warnings.warn(message.clone());
        }
        self.known = records
            .iter()
            .map(BibRecord::key)
            .filter(|k| !self.unresolvable.contains(k))
            .collect();
    }

    fn register(&mut self, key: &str) {
        self.calls.push(format!("register:{key}"));
        self.registered.push(key.to_string());
    }

    fn render(
        &mut self,
        on_unresolved: &mut dyn FnMut(&str),
    ) -> Result<Vec<RenderedEntry>, EngineError> {
        self.calls.push("render".to_string());
        let mut entries = Vec::new();
        for key in &self.registered {
            if self.known.contains(key) {
                entries.push(RenderedEntry {
                    key: key.clone(),
                    html: format!("<span>{key}</span>"),
                });
            } else {
                on_unresolved(key);
            }
        }
        Ok(entries)
    }
}

/// Helper to create a temporary file with content
pub fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Three articles with mixed-case keys, one with a DOI and one on arXiv.
pub const SAMPLE_BIB: &str = r#"
@article{Alpha2019,
  author = {Alpha, Ann},
  title = {First Results},
  journal = {Journal of Examples},
  year = {2019},
  month = {June},
  doi = {10.1000/alpha}
}

@article{beta2021,
  author = {Beta, Bob and Gamma, Gil},
  title = {Second Results},
  journal = {Letters},
  year = {2021},
  month = {Feb},
  eprinttype = {arxiv},
  eprint = {2102.01234},
  eprintclass = {cs.DL}
}

@misc{gamma2021,
  author = {Gamma, Gil},
  title = {Third Results},
  year = {2021},
  month = {November},
  keywords = {misc}
}
"#;
