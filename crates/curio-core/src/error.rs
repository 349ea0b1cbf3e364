//! Unified error handling for Curio Core.
//!
//! Wraps domain and application errors in a single type carrying a display
//! category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Curio Core operations.
#[derive(Debug, Error, Clone)]
pub enum CurioError {
    /// Rule violations: unknown names, bad toggle arguments.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failures: missing files, unreadable YAML.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CurioError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check the catalog location (--catalog or CURIO_CATALOG_ROOT)".into(),
                "Run with -v for more detail".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Curio".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CurioResult<T> = Result<T, CurioError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> CurioResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> CurioResult<T> {
        self.map_err(|e| CurioError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::Section;

    #[test]
    fn domain_errors_display_without_prefix() {
        let err: CurioError = DomainError::UnknownSection {
            input: "agents".into(),
        }
        .into();
        assert!(err.to_string().starts_with("Unknown section 'agents'"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn categories_map_through() {
        let err: CurioError = DomainError::NothingToToggle {
            section: Section::Prompts,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err: CurioError = ApplicationError::ConfigNotFound {
            path: PathBuf::from("curio.config.yml"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_as_internal() {
        let io: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = io.context("reading catalog").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("reading catalog: boom"));
    }
}
