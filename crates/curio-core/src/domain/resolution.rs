//! Effective-state resolution.
//!
//! Decides, for every artifact the catalog lists, whether it is enabled and
//! why. Precedence is fixed and order-independent:
//!
//! 1. An explicit flag in the document wins, in both directions.
//! 2. Otherwise the artifact is enabled if *any* enabled collection lists it.
//! 3. Otherwise it is disabled.
//!
//! Collection membership is supplied by the caller as a closure so this
//! module never touches the filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::domain::entities::{CatalogSnapshot, Collection, ConfigDocument};
use crate::domain::value_objects::{ArtifactKey, Section};

/// Why an artifact has its effective state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Reason {
    /// The document sets the flag directly.
    Explicit { value: bool },
    /// Granted by these enabled collections, sorted by name.
    Collections { via: Vec<String> },
    /// No flag and no enabling collection.
    Default,
}

impl Reason {
    /// `true` for `Collections { via }` when `via` names `collection`.
    pub fn granted_by(&self, collection: &str) -> bool {
        matches!(self, Self::Collections { via } if via.iter().any(|c| c == collection))
    }

    pub fn is_explicit_off(&self) -> bool {
        matches!(self, Self::Explicit { value: false })
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { value } => write!(f, "explicit:{value}"),
            Self::Collections { via } => write!(f, "via: {}", via.join(", ")),
            Self::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveState {
    pub enabled: bool,
    pub reason: Reason,
}

/// A collection that was enabled but contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub collection: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load collection '{}': {}",
            self.collection, self.message
        )
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    states: BTreeMap<Section, BTreeMap<String, EffectiveState>>,
    memberships: BTreeMap<String, Vec<ArtifactKey>>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn state(&self, section: Section, name: &str) -> Option<&EffectiveState> {
        self.states.get(&section)?.get(name)
    }

    pub fn is_enabled(&self, section: Section, name: &str) -> bool {
        self.state(section, name).is_some_and(|s| s.enabled)
    }

    /// Every resolved artifact of `section`, sorted by name.
    pub fn section(&self, section: Section) -> impl Iterator<Item = (&str, &EffectiveState)> {
        self.states
            .get(&section)
            .into_iter()
            .flat_map(|states| states.iter().map(|(name, state)| (name.as_str(), state)))
    }

    /// Names enabled in `section`.
    pub fn enabled(&self, section: Section) -> BTreeSet<&str> {
        self.section(section)
            .filter(|(_, state)| state.enabled)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn enabled_count(&self, section: Section) -> usize {
        self.section(section).filter(|(_, s)| s.enabled).count()
    }

    /// Every enabled artifact across all artifact sections.
    pub fn enabled_keys(&self) -> BTreeSet<ArtifactKey> {
        Section::ARTIFACTS
            .into_iter()
            .flat_map(|section| {
                self.enabled(section)
                    .into_iter()
                    .map(move |name| ArtifactKey::new(section, name))
            })
            .collect()
    }

    /// Items of an enabled collection that loaded successfully.
    pub fn members_of(&self, collection: &str) -> Option<&[ArtifactKey]> {
        self.memberships.get(collection).map(Vec::as_slice)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Resolve effective states for every catalog-listed artifact.
///
/// `membership` is called once per collection enabled in `document`. An
/// `Err` skips that collection and is recorded as a [`Diagnostic`].
pub fn resolve<F, E>(
    document: &ConfigDocument,
    catalog: &CatalogSnapshot,
    mut membership: F,
) -> Resolution
where
    F: FnMut(&str) -> Result<Collection, E>,
    E: fmt::Display,
{
    let mut resolution = Resolution::default();
    let mut granted: BTreeMap<ArtifactKey, BTreeSet<String>> = BTreeMap::new();

    for name in document.enabled_collections() {
        match membership(name) {
            Ok(collection) => {
                for key in &collection.items {
                    granted
                        .entry(key.clone())
                        .or_default()
                        .insert(name.to_string());
                }
                resolution
                    .memberships
                    .insert(name.to_string(), collection.items);
            }
            Err(e) => resolution.diagnostics.push(Diagnostic {
                collection: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    for section in Section::ARTIFACTS {
        let states = resolution.states.entry(section).or_default();

        for name in catalog.names(section) {
            let key = ArtifactKey::new(section, name.clone());

            let state = match document.flag(section, name) {
                Some(value) => EffectiveState {
                    enabled: value,
                    reason: Reason::Explicit { value },
                },
                None => match granted.get(&key) {
                    Some(via) if !via.is_empty() => EffectiveState {
                        enabled: true,
                        reason: Reason::Collections {
                            via: via.iter().cloned().collect(),
                        },
                    },
                    _ => EffectiveState {
                        enabled: false,
                        reason: Reason::Default,
                    },
                },
            };

            states.insert(key.name, state);
        }
    }

    resolution
}
