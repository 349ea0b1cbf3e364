//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `curio-adapters` crate provides implementations.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{ArtifactKey, CatalogSnapshot, Collection, LoadedConfig, Section};
use crate::error::CurioResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `curio_adapters::filesystem::LocalFilesystem` (production)
/// - `curio_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CurioResult<()>;

    /// Raw content of a file.
    fn read(&self, path: &Path) -> CurioResult<Vec<u8>>;

    /// Content of a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> CurioResult<String> {
        String::from_utf8(self.read(path)?)
            .map_err(|e| ApplicationError::filesystem(path, format!("Not valid UTF-8: {e}")).into())
    }

    /// Replace the content of a file. Implementations must not leave a
    /// partially written file behind.
    fn write_file(&self, path: &Path, content: &[u8]) -> CurioResult<()>;

    /// Remove a file. Returns `false` if it was already gone.
    fn remove_file(&self, path: &Path) -> CurioResult<bool>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the regular files directly inside `dir`, sorted.
    /// A missing directory yields an empty list.
    fn list_files(&self, dir: &Path) -> CurioResult<Vec<String>>;
}

/// Port for the artifact library.
///
/// Implemented by `curio_adapters::catalog::FsCatalog`.
pub trait Catalog: Send + Sync {
    /// Names available in `section`, de-duplicated and sorted.
    fn list(&self, section: Section) -> CurioResult<BTreeSet<String>>;

    /// Where the source file of `key` lives.
    fn source_path(&self, key: &ArtifactKey) -> PathBuf;

    /// Raw content of the source file of `key`. Artifacts are copied byte
    /// for byte and need not be UTF-8.
    fn read(&self, key: &ArtifactKey) -> CurioResult<Vec<u8>>;

    /// Every section listed at once.
    fn snapshot(&self) -> CurioResult<CatalogSnapshot> {
        let mut snapshot = CatalogSnapshot::new();
        for section in Section::ALL {
            snapshot.insert(section, self.list(section)?);
        }
        Ok(snapshot)
    }
}

/// Port for collection manifests.
///
/// Implemented by `curio_adapters::collections::YamlCollectionSource`.
pub trait CollectionSource: Send + Sync {
    fn load(&self, name: &str) -> CurioResult<Collection>;
}

/// Port for the configuration document.
///
/// Implemented by `curio_adapters::config_store::YamlConfigStore`.
pub trait ConfigStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Load and sanitize the document at `path`.
    fn load(&self, path: &Path) -> CurioResult<LoadedConfig>;

    /// Write the whole document, keeping its header.
    fn save(&self, path: &Path, config: &LoadedConfig) -> CurioResult<()>;
}
