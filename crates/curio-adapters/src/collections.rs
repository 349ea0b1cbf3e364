//! YAML collection manifests.
//!
//! # `<name>.collection.yml` format
//!
//! ```yaml
//! id: testing
//! name: Testing & QA
//! description: Prompts and instructions for writing tests.
//! items:
//!   - path: prompts/write-tests.prompt.md
//!     kind: prompt
//!   - path: instructions/testing.instructions.md
//!     kind: instruction
//! ```
//!
//! Only `items[].path` matters: the section is inferred from the path and
//! unrecognized paths are dropped. Every other key is ignored.

use std::path::PathBuf;

use curio_core::{
    application::{
        ApplicationError,
        ports::{CollectionSource, Filesystem},
    },
    domain::{Collection, Section},
    error::CurioResult,
};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CollectionManifest {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    items: Vec<ManifestItem>,
}

#[derive(Debug, Deserialize)]
struct ManifestItem {
    path: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Loads `<root>/collections/<name>.collection.yml`.
#[derive(Debug, Clone)]
pub struct YamlCollectionSource<F> {
    root: PathBuf,
    filesystem: F,
}

impl<F: Filesystem> YamlCollectionSource<F> {
    pub fn new(root: impl Into<PathBuf>, filesystem: F) -> Self {
        Self {
            root: root.into(),
            filesystem,
        }
    }

    fn manifest_path(&self, name: &str) -> PathBuf {
        self.root
            .join(Section::Collections.dir())
            .join(Section::Collections.file_name(name))
    }
}

impl<F: Filesystem> CollectionSource for YamlCollectionSource<F> {
    #[instrument(skip(self))]
    fn load(&self, name: &str) -> CurioResult<Collection> {
        let unavailable = |reason: String| ApplicationError::CollectionUnavailable {
            name: name.to_string(),
            reason,
        };

        let path = self.manifest_path(name);
        if !self.filesystem.exists(&path) {
            return Err(unavailable(format!("{} not found", path.display())).into());
        }
        let content = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| unavailable(e.to_string()))?;

        let manifest = if content.trim().is_empty() {
            CollectionManifest::default()
        } else {
            serde_yaml::from_str::<CollectionManifest>(&content)
                .map_err(|e| unavailable(e.to_string()))?
        };

        debug!(
            id = ?manifest.id,
            title = ?manifest.name,
            described = manifest.description.is_some(),
            items = manifest.items.len(),
            "Collection manifest parsed"
        );

        let collection = Collection::from_item_paths(name, manifest.items.iter().map(|i| &i.path));
        if collection.items.len() < manifest.items.len() {
            let skipped: Vec<_> = manifest
                .items
                .iter()
                .filter(|i| Section::from_item_path(&i.path).is_none())
                .map(|i| (i.path.as_str(), i.kind.as_deref().unwrap_or("?")))
                .collect();
            debug!(?skipped, "Unrecognized collection items ignored");
        }
        Ok(collection)
    }
}
