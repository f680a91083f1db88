//! Publication list settings.
//!
//! Settings come from a TOML file and can be overridden from the command
//! line. `src` and `style` are both required for the feature to run; when
//! either is missing the publication list is simply not generated.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

fn default_sort() -> String {
    "date".to_string()
}

fn default_suppress() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// BibTeX file to read.
    #[serde(default)]
    pub src: Option<PathBuf>,
    /// Built-in style name or path to a style definition.
    #[serde(default)]
    pub style: Option<String>,
    /// Kept as the raw string; it is validated when the list is assembled.
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_suppress")]
    pub suppress_bibtex_warning: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            src: None,
            style: None,
            sort: default_sort(),
            suppress_bibtex_warning: default_suppress(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Source path and style, if both are configured.
    pub fn required(&self) -> Option<(&Path, &str)> {
        Some((self.src.as_deref()?, self.style.as_deref()?))
    }
}
