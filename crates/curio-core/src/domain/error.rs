// ============================================================================
// domain/error.rs - USER-FACING RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::Section;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Unknown section '{input}'. Expected one of: {}", expected_sections())]
    UnknownSection { input: String },

    #[error("Unknown {} '{name}'.{}", .section.singular(), did_you_mean(.suggestion))]
    UnknownArtifact {
        section: Section,
        name: String,
        suggestion: Option<String>,
    },

    #[error("State must be 'on' or 'off' (got '{token}')")]
    InvalidState { token: String },

    #[error("Specify 'on' or 'off' when toggling all {}", .section.label().to_lowercase())]
    StateRequiredForAll { section: Section },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No {} available to toggle", .section.label().to_lowercase())]
    NothingToToggle { section: Section },
}

fn expected_sections() -> String {
    Section::ALL
        .iter()
        .map(|s| s.key())
        .collect::<Vec<_>>()
        .join(", ")
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" Did you mean '{s}'?"))
        .unwrap_or_default()
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownSection { .. } => vec![
                format!("Valid sections: {}", expected_sections()),
                "Example: curio list prompts".into(),
            ],
            Self::UnknownArtifact {
                section,
                suggestion,
                ..
            } => {
                let mut out = Vec::new();
                if let Some(s) = suggestion {
                    out.push(format!("Did you mean '{s}'?"));
                }
                out.push(format!(
                    "Run 'curio list {}' to see available {}",
                    section.key(),
                    section.label().to_lowercase()
                ));
                out
            }
            Self::InvalidState { .. } => vec![
                "Use 'on' or 'off' (also: enable/disable, yes/no, true/false)".into(),
            ],
            Self::StateRequiredForAll { section } => vec![format!(
                "Example: curio toggle {} all off",
                section.key()
            )],
            Self::NothingToToggle { section } => vec![
                format!(
                    "Add {} files under '{}/' in the catalog",
                    section.suffix(),
                    section.dir()
                ),
                "Or point --catalog at the artifact library".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownSection { .. }
            | Self::UnknownArtifact { .. }
            | Self::InvalidState { .. }
            | Self::StateRequiredForAll { .. } => ErrorCategory::Validation,
            Self::NothingToToggle { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
