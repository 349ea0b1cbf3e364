//! The user's configuration document.
//!
//! The document is the only persisted state: a version string, project
//! settings, and one `name -> bool` map per [`Section`]. Names that the
//! catalog no longer lists are kept untouched so a re-added file picks its
//! old flag back up. Keys Curio does not interpret, at the top level or
//! under `project`, are carried through as opaque values.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::value_objects::Section;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = ".curio";

/// `project:` mapping of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub output_directory: String,
    /// Every other key (e.g. `name`), preserved with its original type.
    pub extra: BTreeMap<String, Value>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl ProjectSettings {
    /// Destination root. Relative directories are taken from the directory
    /// holding the configuration document.
    pub fn output_root(&self, config_path: &Path) -> PathBuf {
        let output = Path::new(&self.output_directory);
        if output.is_absolute() {
            return output.to_path_buf();
        }
        config_path
            .parent()
            .map(|dir| dir.join(output))
            .unwrap_or_else(|| output.to_path_buf())
    }
}

/// Sanitized configuration document.
///
/// Invariant: a map exists for every section in [`Section::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub version: String,
    pub project: ProjectSettings,
    sections: BTreeMap<Section, BTreeMap<String, bool>>,
    /// Unrecognized top-level keys.
    pub extra: BTreeMap<String, Value>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            project: ProjectSettings::default(),
            sections: Section::ALL
                .into_iter()
                .map(|s| (s, BTreeMap::new()))
                .collect(),
            extra: BTreeMap::new(),
        }
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags of one section, sorted by name.
    pub fn section(&self, section: Section) -> &BTreeMap<String, bool> {
        static EMPTY: BTreeMap<String, bool> = BTreeMap::new();
        self.sections.get(&section).unwrap_or(&EMPTY)
    }

    /// Replace a whole section map.
    pub fn set_section(&mut self, section: Section, flags: BTreeMap<String, bool>) {
        self.sections.insert(section, flags);
    }

    /// Explicit flag for `name`, if the document sets one.
    pub fn flag(&self, section: Section, name: &str) -> Option<bool> {
        self.section(section).get(name).copied()
    }

    pub fn set_flag(&mut self, section: Section, name: impl Into<String>, value: bool) {
        self.sections
            .entry(section)
            .or_default()
            .insert(name.into(), value);
    }

    /// Set every name in `names` to `value`.
    pub fn set_all<I, S>(&mut self, section: Section, names: I, value: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flags = self.sections.entry(section).or_default();
        for name in names {
            flags.insert(name.into(), value);
        }
    }

    pub fn is_collection_enabled(&self, name: &str) -> bool {
        self.flag(Section::Collections, name).unwrap_or(false)
    }

    pub fn enabled_collections(&self) -> impl Iterator<Item = &str> {
        self.section(Section::Collections)
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }

    /// Names set in `section` that `known` does not contain.
    pub fn stray_names<'a>(&'a self, section: Section, known: &BTreeSet<String>) -> Vec<&'a str> {
        self.section(section)
            .keys()
            .filter(|name| !known.contains(*name))
            .map(String::as_str)
            .collect()
    }
}

/// A document together with the free-text header that preceded it on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    pub document: ConfigDocument,
    /// `None` when the file had no header; a standard one is written on save.
    pub header: Option<String>,
}

impl LoadedConfig {
    pub fn new(document: ConfigDocument, header: Option<String>) -> Self {
        Self { document, header }
    }
}
