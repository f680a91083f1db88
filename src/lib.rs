//! publist: build publication lists from BibTeX files.
//!
//! This library provides functionality to:
//! - Load BibTeX records and order them by key, date or author
//! - Render a bibliography entry per record through a citation engine
//! - Derive arXiv and DOI links without repeating what the style printed
//! - Place the resulting list into a page-generation context

pub mod engine;
pub mod links;
pub mod output;
pub mod processor;
pub mod publications;
pub mod record;
pub mod refs;
pub mod settings;
pub mod sort;
pub mod style;
pub mod telemetry;

pub use engine::{BasicEngine, CitationEngine};
pub use links::extract_links;
pub use output::{generate_output, GenerationContext, PUBLICATIONS};
pub use processor::render_bibliography;
pub use publications::{add_publications, assemble};
pub use record::{BibRecord, ExternalLinks, PublicationRecord};
pub use refs::load_refs;
pub use settings::Settings;
pub use sort::{month_ordinal, sort_records, SortCriterion, SortError};
pub use style::{builtin_style, builtin_style_names};
