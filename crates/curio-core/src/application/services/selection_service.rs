//! Selection Service - everything that reads or edits the document.
//!
//! Loads the document, resolves it against a fresh catalog snapshot, and
//! implements `init`, `list` and `toggle`. Every mutation is a full
//! load-modify-save cycle.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Catalog, CollectionSource, ConfigStore},
    },
    domain::{
        ArtifactKey, BudgetWarning, CatalogSnapshot, ConfigDocument, DeltaSummary, Diagnostic,
        DomainError, DomainValidator as validator, LoadedConfig, Reason, Resolution, Section,
        budget, delta, resolve,
    },
    error::CurioResult,
};

/// One row of `curio list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOverview {
    pub name: String,
    pub enabled: bool,
    pub reason: Reason,
}

/// One section of `curio list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOverview {
    pub section: Section,
    pub label: &'static str,
    pub enabled: usize,
    pub total: usize,
    /// Total characters of enabled artifacts; `None` for collections.
    pub chars: Option<usize>,
    pub budget: Option<BudgetWarning>,
    pub items: Vec<ItemOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub sections: Vec<SectionOverview>,
    pub diagnostics: Vec<Diagnostic>,
}

/// What a toggle applies to.
///
/// Only the exact word `all` selects every item; `All` or `ALL` name an
/// artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleTarget {
    All,
    One(String),
}

impl From<&str> for ToggleTarget {
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::One(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub section: Section,
    pub target: ToggleTarget,
    /// `None` flips the current effective state (single items only).
    pub state: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub section: Section,
    /// `true` when the request targeted `all`.
    pub bulk: bool,
    /// Names whose flag was written, sorted.
    pub names: Vec<String>,
    pub enabled: bool,
    /// Effective enabled count of the section after the change.
    pub enabled_count: usize,
    pub total: usize,
    /// Side effects of toggling a single collection.
    pub delta: Option<DeltaSummary>,
    pub budget: Vec<BudgetWarning>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Service for document selection use cases.
pub struct SelectionService {
    catalog: Box<dyn Catalog>,
    collections: Box<dyn CollectionSource>,
    store: Box<dyn ConfigStore>,
}

impl SelectionService {
    pub fn new(
        catalog: Box<dyn Catalog>,
        collections: Box<dyn CollectionSource>,
        store: Box<dyn ConfigStore>,
    ) -> Self {
        Self {
            catalog,
            collections,
            store,
        }
    }

    /// Load the document at `path`.
    pub fn load(&self, path: &Path) -> CurioResult<LoadedConfig> {
        if !self.store.exists(path) {
            return Err(ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.store.load(path)
    }

    /// Resolve `document` against the current catalog.
    pub fn resolve(&self, document: &ConfigDocument) -> CurioResult<Resolution> {
        let snapshot = self.catalog.snapshot()?;
        Ok(self.resolve_with(document, &snapshot))
    }

    /// Write a fresh document listing every catalog collection as disabled.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn initialize(&self, path: &Path, force: bool) -> CurioResult<LoadedConfig> {
        if self.store.exists(path) && !force {
            return Err(ApplicationError::ConfigExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mut document = ConfigDocument::default();
        document.set_all(Section::Collections, self.catalog.list(Section::Collections)?, false);

        let config = LoadedConfig::new(document, None);
        self.store.save(path, &config)?;
        info!(
            collections = config.document.section(Section::Collections).len(),
            "Configuration initialized"
        );
        Ok(config)
    }

    /// Resolved state of every section, or of `filter` only.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn overview(&self, path: &Path, filter: Option<Section>) -> CurioResult<Overview> {
        let config = self.load(path)?;
        let snapshot = self.catalog.snapshot()?;
        let resolution = self.resolve_with(&config.document, &snapshot);

        let sections = match filter {
            Some(section) => vec![section],
            None => Section::ALL.to_vec(),
        };

        let sections = sections
            .into_iter()
            .map(|section| {
                self.section_overview(section, &config.document, &snapshot, &resolution)
            })
            .collect::<CurioResult<Vec<_>>>()?;

        Ok(Overview {
            sections,
            diagnostics: resolution.diagnostics().to_vec(),
        })
    }

    /// Set or flip flags and save the document.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn toggle(&self, path: &Path, request: ToggleRequest) -> CurioResult<ToggleOutcome> {
        let ToggleRequest {
            section,
            target,
            state,
        } = request;

        let mut config = self.load(path)?;
        let snapshot = self.catalog.snapshot()?;
        let available = snapshot.names(section);
        if available.is_empty() {
            return Err(DomainError::NothingToToggle { section }.into());
        }

        let before = self.resolve_with(&config.document, &snapshot);
        let bulk = target == ToggleTarget::All;

        let (names, enabled) = match target {
            ToggleTarget::All => {
                let value = state.ok_or(DomainError::StateRequiredForAll { section })?;
                config
                    .document
                    .set_all(section, available.iter().cloned(), value);
                (available.iter().cloned().collect::<Vec<_>>(), value)
            }
            ToggleTarget::One(name) => {
                validator::require_artifact(section, &name, available)?;
                let current = match section {
                    Section::Collections => config.document.is_collection_enabled(&name),
                    _ => before.is_enabled(section, &name),
                };
                let value = state.unwrap_or(!current);
                config.document.set_flag(section, name.clone(), value);
                (vec![name], value)
            }
        };

        let after = self.resolve_with(&config.document, &snapshot);

        let delta = match (section, names.as_slice()) {
            (Section::Collections, [collection]) => {
                delta(Some(&before), Some(&after), collection, enabled)
            }
            _ => None,
        };

        let budget_sections = if section.is_artifact() {
            vec![section]
        } else {
            Section::ARTIFACTS.to_vec()
        };
        let mut warnings = Vec::new();
        for s in budget_sections {
            if let Some(warning) = budget::assess(s, self.footprint(&after, s)) {
                warnings.push(warning);
            }
        }

        let (enabled_count, total) = match section {
            Section::Collections => (
                available
                    .iter()
                    .filter(|n| config.document.is_collection_enabled(n))
                    .count(),
                available.len(),
            ),
            _ => (after.enabled_count(section), available.len()),
        };

        self.store.save(path, &config)?;
        info!(section = %section, count = names.len(), enabled, "Flags updated");

        Ok(ToggleOutcome {
            section,
            bulk,
            names,
            enabled,
            enabled_count,
            total,
            delta,
            budget: warnings,
            diagnostics: after.diagnostics().to_vec(),
        })
    }

    /// Characters of every enabled artifact of `section`.
    ///
    /// Invalid UTF-8 counts one character per replaced sequence; unreadable
    /// artifacts are skipped.
    pub fn footprint(&self, resolution: &Resolution, section: Section) -> usize {
        resolution
            .enabled(section)
            .into_iter()
            .filter_map(|name| {
                let key = ArtifactKey::new(section, name);
                match self.catalog.read(&key) {
                    Ok(bytes) => Some(String::from_utf8_lossy(&bytes).chars().count()),
                    Err(e) => {
                        debug!(artifact = %key, error = %e, "Skipping unreadable artifact");
                        None
                    }
                }
            })
            .sum()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_with(&self, document: &ConfigDocument, snapshot: &CatalogSnapshot) -> Resolution {
        let resolution = resolve(document, snapshot, |name| self.collections.load(name));

        for diagnostic in resolution.diagnostics() {
            warn!(collection = %diagnostic.collection, "{}", diagnostic.message);
        }
        for section in Section::ALL {
            let strays = document.stray_names(section, snapshot.names(section));
            if !strays.is_empty() {
                debug!(section = %section, names = ?strays, "Names not in catalog");
            }
        }

        resolution
    }

    fn section_overview(
        &self,
        section: Section,
        document: &ConfigDocument,
        snapshot: &CatalogSnapshot,
        resolution: &Resolution,
    ) -> CurioResult<SectionOverview> {
        let items: Vec<ItemOverview> = match section {
            Section::Collections => snapshot
                .names(section)
                .iter()
                .map(|name| {
                    let flag = document.flag(section, name);
                    ItemOverview {
                        name: name.clone(),
                        enabled: flag.unwrap_or(false),
                        reason: flag.map_or(Reason::Default, |value| Reason::Explicit { value }),
                    }
                })
                .collect(),
            _ => resolution
                .section(section)
                .map(|(name, state)| ItemOverview {
                    name: name.to_string(),
                    enabled: state.enabled,
                    reason: state.reason.clone(),
                })
                .collect(),
        };

        let chars = if section.is_artifact() {
            Some(self.footprint(resolution, section))
        } else {
            None
        };

        Ok(SectionOverview {
            section,
            label: section.label(),
            enabled: items.iter().filter(|i| i.enabled).count(),
            total: items.len(),
            budget: chars.and_then(|c| budget::assess(section, c)),
            chars,
            items,
        })
    }
}
