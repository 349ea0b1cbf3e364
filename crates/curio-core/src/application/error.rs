//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The configuration document does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// `init` would overwrite an existing document.
    #[error("Configuration file already exists: {}", path.display())]
    ConfigExists { path: PathBuf },

    /// The document is not valid YAML or not a mapping.
    #[error("Malformed configuration {}: {reason}", path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    /// A collection manifest is missing or unreadable.
    #[error("Collection '{name}' unavailable: {reason}")]
    CollectionUnavailable { name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state was poisoned.
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigNotFound { path } => vec![
                format!("Create one with: curio init {}", path.display()),
                "Or pass an existing file with --config".into(),
            ],
            Self::ConfigExists { path } => vec![
                format!("Edit {} directly", path.display()),
                "Use --force to overwrite it (destructive)".into(),
            ],
            Self::MalformedConfig { .. } => vec![
                "Check the YAML syntax of the configuration file".into(),
                "Top level must be a mapping with prompts/instructions/chatmodes/collections".into(),
            ],
            Self::CollectionUnavailable { name, .. } => vec![
                format!("Check collections/{name}.collection.yml in the catalog"),
                format!("Or disable it: curio toggle collections {name} off"),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } | Self::CollectionUnavailable { .. } => {
                ErrorCategory::NotFound
            }
            Self::ConfigExists { .. } => ErrorCategory::Validation,
            Self::MalformedConfig { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
