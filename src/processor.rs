//! Bibliography rendering through a citation engine.
//!
//! This module drives a [`CitationEngine`]: it loads the records and the
//! style, reclassifies the engine's field warnings, registers every
//! citation and then collects one rendered entry per resolvable record.

use crate::engine::{capture_warnings, CitationEngine, EngineWarning};
use crate::record::BibRecord;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Marker for field-compatibility warnings that are safe to downgrade.
///
/// This matches the engine's wording verbatim; a reworded message will
/// surface as a regular warning again.
pub const UNSUPPORTED_FIELD_WARNING: &str = "Unsupported BibTeX field";

/// Renders `records` with the style `style_id`.
///
/// # Returns
///
/// A map from lower-cased identifier to rendered HTML. Records the engine
/// could not resolve are absent. The map is empty when the style cannot be
/// loaded or has no bibliography section; both cases are logged.
pub fn render_bibliography(
    engine: &mut dyn CitationEngine,
    records: &[BibRecord],
    style_id: &str,
    suppress_known_field_warnings: bool,
) -> HashMap<String, String> {
    // Source warnings are reported even when the style turns out to be unusable.
    let ((), warnings) = capture_warnings(|capture| engine.load_source(records, capture));
    log_engine_warnings(&warnings, suppress_known_field_warnings);

    let style = match engine.load_style(style_id) {
        Ok(style) => style,
        Err(e) => {
            error!("{}", e);
            return HashMap::new();
        }
    };

    if !style.has_bibliography() {
        warn!(style = style_id, "Style '{}' does not include a bibliography", style_id);
        return HashMap::new();
    }

    // All citations are registered before anything is rendered.
    for record in records {
        engine.register(&record.key());
    }

    let rendered = engine.render(&mut |key: &str| {
        warn!(key, "Reference with key '{}' not found in the bibliography", key);
    });

    match rendered {
        Ok(entries) => entries.into_iter().map(|e| (e.key, e.html)).collect(),
        Err(e) => {
            error!("{}", e);
            HashMap::new()
        }
    }
}

fn log_engine_warnings(warnings: &[EngineWarning], suppress_known_field_warnings: bool) {
    for warning in warnings {
        if suppress_known_field_warnings && warning.message.contains(UNSUPPORTED_FIELD_WARNING) {
            info!("Warning in citation engine '{}'", warning.message);
        } else {
            warn!("Warning in citation engine '{}'", warning.message);
        }
    }
}
