//! Directory-backed artifact catalog.
//!
//! # Directory layout expected
//!
//! ```text
//! <root>/
//! ├── prompts/       *.prompt.md
//! ├── instructions/  *.instructions.md
//! ├── chatmodes/     *.chatmode.md
//! └── collections/   *.collection.yml
//! ```
//!
//! Names are the file names with the section suffix stripped. Files with
//! any other suffix are ignored.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use curio_core::{
    application::ports::{Catalog, Filesystem},
    domain::{ArtifactKey, Section},
    error::{CurioError, CurioResult},
};
use tracing::trace;

/// Catalog reading a fixed directory convention through a [`Filesystem`].
#[derive(Debug, Clone)]
pub struct FsCatalog<F> {
    root: PathBuf,
    filesystem: F,
}

impl<F: Filesystem> FsCatalog<F> {
    pub fn new(root: impl Into<PathBuf>, filesystem: F) -> Self {
        Self {
            root: root.into(),
            filesystem,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl<F: Filesystem> Catalog for FsCatalog<F> {
    fn list(&self, section: Section) -> CurioResult<BTreeSet<String>> {
        if !self.filesystem.exists(&self.root) {
            return Err(CurioError::configuration(format!(
                "Catalog directory {} does not exist",
                self.root.display()
            )));
        }
        let dir = self.root.join(section.dir());
        let names: BTreeSet<String> = self
            .filesystem
            .list_files(&dir)?
            .iter()
            .filter_map(|file| section.entry_name(file))
            .map(str::to_string)
            .collect();
        trace!(section = %section, count = names.len(), "Catalog listed");
        Ok(names)
    }

    fn source_path(&self, key: &ArtifactKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    fn read(&self, key: &ArtifactKey) -> CurioResult<Vec<u8>> {
        self.filesystem.read(&self.source_path(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    fn catalog() -> FsCatalog<MemoryFilesystem> {
        let fs = MemoryFilesystem::new()
            .with_file("/lib/prompts/b.prompt.md", "B")
            .with_file("/lib/prompts/a.prompt.md", "A")
            .with_file("/lib/prompts/README.md", "ignored")
            .with_file("/lib/prompts/.prompt.md", "no name")
            .with_file("/lib/instructions/rust.instructions.md", "R")
            .with_file("/lib/collections/web.collection.yml", "items: []");
        FsCatalog::new("/lib", fs)
    }

    #[test]
    fn lists_suffix_matching_files_sorted() {
        let names = catalog().list(Section::Prompts).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn missing_section_directory_is_empty() {
        assert!(catalog().list(Section::ChatModes).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_a_configuration_error() {
        let err = FsCatalog::new("/nowhere", MemoryFilesystem::new())
            .list(Section::Prompts)
            .unwrap_err();
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn snapshot_covers_every_section() {
        let snapshot = catalog().snapshot().unwrap();
        assert!(snapshot.contains(&ArtifactKey::new(Section::Instructions, "rust")));
        assert!(snapshot.names(Section::Collections).contains("web"));
    }

    #[test]
    fn reads_source_content() {
        let content = catalog()
            .read(&ArtifactKey::new(Section::Prompts, "a"))
            .unwrap();
        assert_eq!(content, b"A");
    }
}
