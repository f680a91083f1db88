//! Citation style loading.
//!
//! Handles loading style definitions from TOML files and provides access to
//! built-in styles.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading styles.
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid style definition: {0}")]
    InvalidStyle(#[from] toml::de::Error),

    #[error("Unknown style variable '{0}'")]
    UnknownVariable(String),
}

/// Variables a layout part may reference.
pub const VARIABLES: &[&str] = &[
    "citation-number",
    "author",
    "title",
    "container-title",
    "publisher",
    "year",
    "doi",
    "url",
];

/// A parsed style definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleDefinition {
    pub id: String,
    pub title: String,
    /// Styles without this section can only produce in-text citations.
    #[serde(default)]
    pub bibliography: Option<BibliographyLayout>,
}

impl StyleDefinition {
    pub fn has_bibliography(&self) -> bool {
        self.bibliography.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BibliographyLayout {
    #[serde(default)]
    pub numbered: bool,
    pub parts: Vec<LayoutPart>,
}

/// One variable in a bibliography entry, with its surrounding punctuation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutPart {
    pub variable: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub italic: bool,
}

/// Loads a style definition file.
///
/// # Returns
///
/// The TOML content as a string.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_style(path: &Path) -> Result<String, StyleError> {
    let content = fs::read_to_string(path)?;
    Ok(content)
}

/// Parses and validates a style definition.
pub fn parse_style(content: &str) -> Result<StyleDefinition, StyleError> {
    let style: StyleDefinition = toml::from_str(content)?;
    if let Some(layout) = &style.bibliography {
        if let Some(part) = layout
            .parts
            .iter()
            .find(|p| !VARIABLES.contains(&p.variable.as_str()))
        {
            return Err(StyleError::UnknownVariable(part.variable.clone()));
        }
    }
    Ok(style)
}

/// Resolves a style identifier: a built-in name first, then a file path.
pub fn resolve_style(style_id: &str) -> Result<StyleDefinition, StyleError> {
    match builtin_style(style_id) {
        Some(content) => parse_style(content),
        None => parse_style(&load_style(Path::new(style_id))?),
    }
}

/// Single source of truth for builtin styles: (name, TOML content).
const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("minimal", MINIMAL_STYLE),
    ("numeric", NUMERIC_STYLE),
    ("author-date", AUTHOR_DATE_STYLE),
    ("citation-only", CITATION_ONLY_STYLE),
];

/// Returns a built-in style by name.
pub fn builtin_style(name: &str) -> Option<&'static str> {
    BUILTIN_STYLES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, content)| *content)
}

/// Returns the list of available builtin style names.
pub fn builtin_style_names() -> Vec<&'static str> {
    BUILTIN_STYLES.iter().map(|(n, _)| *n).collect()
}

const MINIMAL_STYLE: &str = r#"
id = "minimal"
title = "Minimal"

[bibliography]
parts = [
  { variable = "author", suffix = ". " },
  { variable = "title", italic = true, suffix = ". " },
  { variable = "year", suffix = "." },
]
"#;

const NUMERIC_STYLE: &str = r#"
id = "numeric"
title = "Numeric"

[bibliography]
numbered = true
parts = [
  { variable = "citation-number", prefix = "[", suffix = "] " },
  { variable = "author", suffix = ", " },
  { variable = "title", prefix = "“", suffix = "”, " },
  { variable = "container-title", italic = true, suffix = ", " },
  { variable = "year", suffix = "." },
]
"#;

const AUTHOR_DATE_STYLE: &str = r#"
id = "author-date"
title = "Author-Date with DOI"

[bibliography]
parts = [
  { variable = "author", suffix = " " },
  { variable = "year", prefix = "(", suffix = "). " },
  { variable = "title", suffix = ". " },
  { variable = "container-title", italic = true, suffix = ". " },
  { variable = "publisher", suffix = ". " },
  { variable = "doi", prefix = "https://doi.org/" },
]
"#;

const CITATION_ONLY_STYLE: &str = r#"
id = "citation-only"
title = "In-text Citations Only"
"#;
