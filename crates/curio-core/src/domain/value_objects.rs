//! Value objects: sections and artifact keys.
//!
//! A [`Section`] fixes the on-disk convention for one kind of artifact
//! (directory + file suffix). An [`ArtifactKey`] names a single artifact
//! within a section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ============================================================================
// Section
// ============================================================================

/// One of the fixed configuration sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Prompts,
    Instructions,
    ChatModes,
    Collections,
}

impl Section {
    /// Every section, in document order.
    pub const ALL: [Section; 4] = [
        Section::Prompts,
        Section::Instructions,
        Section::ChatModes,
        Section::Collections,
    ];

    /// Sections whose entries are distributed to the project.
    pub const ARTIFACTS: [Section; 3] = [Section::Prompts, Section::Instructions, Section::ChatModes];

    /// Key used in the configuration document.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Prompts => "prompts",
            Self::Instructions => "instructions",
            Self::ChatModes => "chatmodes",
            Self::Collections => "collections",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Prompts => "Prompts",
            Self::Instructions => "Instructions",
            Self::ChatModes => "Chat Modes",
            Self::Collections => "Collections",
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Self::Prompts => "prompt",
            Self::Instructions => "instruction",
            Self::ChatModes => "chat mode",
            Self::Collections => "collection",
        }
    }

    /// Directory holding this section's files, both in the catalog and in
    /// the destination.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Prompts => "prompts",
            Self::Instructions => "instructions",
            Self::ChatModes => "chatmodes",
            Self::Collections => "collections",
        }
    }

    /// File-name suffix identifying an entry of this section.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Prompts => ".prompt.md",
            Self::Instructions => ".instructions.md",
            Self::ChatModes => ".chatmode.md",
            Self::Collections => ".collection.yml",
        }
    }

    /// `false` for collections, which only feed resolution.
    pub const fn is_artifact(self) -> bool {
        !matches!(self, Self::Collections)
    }

    /// File name for an entry called `name`.
    pub fn file_name(self, name: &str) -> String {
        format!("{name}{}", self.suffix())
    }

    /// Entry name for `file_name`, or `None` if the suffix does not match
    /// (or nothing precedes it).
    pub fn entry_name(self, file_name: &str) -> Option<&str> {
        file_name
            .strip_suffix(self.suffix())
            .filter(|name| !name.is_empty())
    }

    /// Infer the artifact section of a collection item path such as
    /// `prompts/foo.prompt.md`.
    pub fn from_item_path(path: &str) -> Option<Section> {
        let path = path.replace('\\', "/");
        Self::ARTIFACTS.into_iter().find(|section| {
            path.contains(&format!("{}/", section.dir())) && path.ends_with(section.suffix())
        })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompts" => Ok(Self::Prompts),
            "instructions" => Ok(Self::Instructions),
            "chatmodes" | "chat-modes" | "chat_modes" => Ok(Self::ChatModes),
            "collections" => Ok(Self::Collections),
            _ => Err(DomainError::UnknownSection {
                input: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// ArtifactKey
// ============================================================================

/// Identifies one artifact: a name unique within its section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub section: Section,
    pub name: String,
}

impl ArtifactKey {
    pub fn new(section: Section, name: impl Into<String>) -> Self {
        Self {
            section,
            name: name.into(),
        }
    }

    /// Parse a collection item path. Unrecognized paths yield `None`.
    pub fn from_item_path(path: &str) -> Option<Self> {
        let section = Section::from_item_path(path)?;
        let normalized = path.replace('\\', "/");
        let file_name = normalized.rsplit('/').next()?;
        let name = section.entry_name(file_name)?;
        Some(Self::new(section, name))
    }

    /// Path relative to a catalog or destination root,
    /// e.g. `prompts/foo.prompt.md`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.section.dir(), self.section.file_name(&self.name))
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path())
    }
}

// ============================================================================
// ToggleState
// ============================================================================

/// Parsed `on`/`off` argument of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState(pub bool);

impl FromStr for ToggleState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "enable" | "enabled" | "true" | "yes" | "y" => Ok(Self(true)),
            "off" | "disable" | "disabled" | "false" | "no" | "n" => Ok(Self(false)),
            _ => Err(DomainError::InvalidState {
                token: s.to_string(),
            }),
        }
    }
}
