use std::collections::{BTreeMap, BTreeSet};

use crate::domain::value_objects::{ArtifactKey, Section};

/// Names available per section at one point in time.
///
/// Built fresh for every resolution; never cached across steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    sections: BTreeMap<Section, BTreeSet<String>>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section<I, S>(mut self, section: Section, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(section, names.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert(&mut self, section: Section, names: BTreeSet<String>) {
        self.sections.insert(section, names);
    }

    pub fn names(&self, section: Section) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.sections.get(&section).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.names(key.section).contains(&key.name)
    }
}
