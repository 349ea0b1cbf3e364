// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Curio.
//!
//! Pure selection logic. Reading the catalog, loading collection manifests
//! and writing files all happen behind ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: resolution takes collection membership as a closure
//! - **No YAML**: documents are plain maps; parsing lives in adapters
//! - **Deterministic**: every collection is a `BTreeMap`/`BTreeSet`
//!
// Public API - what the world sees
pub mod budget;
pub mod delta;
pub mod entities;
pub mod error;
pub mod resolution;
pub mod sync_plan;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use budget::{BudgetLevel, BudgetWarning};
pub use delta::{DeltaSummary, SectionDelta, delta};
pub use entities::{CatalogSnapshot, Collection, ConfigDocument, LoadedConfig, ProjectSettings};
pub use error::{DomainError, ErrorCategory};
pub use resolution::{Diagnostic, EffectiveState, Reason, Resolution, resolve};
pub use sync_plan::SyncPlan;
pub use validation::{DomainValidator, closest_match};
pub use value_objects::{ArtifactKey, Section, ToggleState};

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn section_parses_case_insensitively() {
        assert_eq!(Section::from_str("Prompts").unwrap(), Section::Prompts);
        assert_eq!(Section::from_str("chat-modes").unwrap(), Section::ChatModes);
        assert!(matches!(
            Section::from_str("agents"),
            Err(DomainError::UnknownSection { .. })
        ));
    }

    #[test]
    fn section_file_naming() {
        assert_eq!(
            Section::Instructions.file_name("rust"),
            "rust.instructions.md"
        );
        assert_eq!(
            Section::ChatModes.entry_name("reviewer.chatmode.md"),
            Some("reviewer")
        );
        assert_eq!(Section::Prompts.entry_name("README.md"), None);
    }

    #[test]
    fn artifact_key_from_collection_item_path() {
        let key = ArtifactKey::from_item_path("prompts/write-tests.prompt.md").unwrap();
        assert_eq!(key.section, Section::Prompts);
        assert_eq!(key.name, "write-tests");
        assert_eq!(key.relative_path(), "prompts/write-tests.prompt.md");

        assert!(ArtifactKey::from_item_path("docs/readme.md").is_none());
    }

    #[test]
    fn toggle_state_tokens() {
        for on in ["on", "ENABLE", "enabled", "true", "yes", "y"] {
            assert_eq!(on.parse::<ToggleState>().unwrap(), ToggleState(true), "{on}");
        }
        for off in ["off", "disable", "Disabled", "false", "no", "n"] {
            assert_eq!(off.parse::<ToggleState>().unwrap(), ToggleState(false), "{off}");
        }
        assert!(matches!(
            "maybe".parse::<ToggleState>(),
            Err(DomainError::InvalidState { .. })
        ));
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_accepts_known_artifact() {
        let available: BTreeSet<String> = ["alpha".to_string()].into();
        assert!(DomainValidator::require_artifact(Section::Prompts, "alpha", &available).is_ok());
    }

    #[test]
    fn validator_suggests_substring_match() {
        let available: BTreeSet<String> =
            ["create-readme".to_string(), "write-tests".to_string()].into();

        let err =
            DomainValidator::require_artifact(Section::Prompts, "Readme", &available).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownArtifact {
                section: Section::Prompts,
                name: "Readme".into(),
                suggestion: Some("create-readme".into()),
            }
        );
        assert_eq!(
            err.to_string(),
            "Unknown prompt 'Readme'. Did you mean 'create-readme'?"
        );
    }

    #[test]
    fn validator_without_suggestion() {
        let available: BTreeSet<String> = ["alpha".to_string()].into();
        let err =
            DomainValidator::require_artifact(Section::ChatModes, "zzz", &available).unwrap_err();
        assert_eq!(err.to_string(), "Unknown chat mode 'zzz'.");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn validator_parses_state() {
        assert_eq!(DomainValidator::parse_state("on").unwrap(), true);
        assert_eq!(DomainValidator::parse_state("no").unwrap(), false);
        assert!(DomainValidator::parse_state("").is_err());
    }
}
