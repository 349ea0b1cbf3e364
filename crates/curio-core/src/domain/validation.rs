use std::collections::BTreeSet;

use crate::domain::{
    error::DomainError,
    value_objects::{Section, ToggleState},
};

/// Centralized validation of user input against the catalog.
pub struct DomainValidator;

impl DomainValidator {
    pub fn parse_section(input: &str) -> Result<Section, DomainError> {
        input.parse()
    }

    pub fn parse_state(token: &str) -> Result<bool, DomainError> {
        token.parse::<ToggleState>().map(|s| s.0)
    }

    /// Ensure `name` is listed in `available`, suggesting a close match
    /// otherwise.
    pub fn require_artifact(
        section: Section,
        name: &str,
        available: &BTreeSet<String>,
    ) -> Result<(), DomainError> {
        if available.contains(name) {
            return Ok(());
        }
        Err(DomainError::UnknownArtifact {
            section,
            name: name.to_string(),
            suggestion: closest_match(name, available).map(str::to_string),
        })
    }
}

/// First candidate containing `target` as a case-insensitive substring.
pub fn closest_match<'a, I>(target: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = target.to_lowercase();
    candidates
        .into_iter()
        .find(|c| c.to_lowercase().contains(&needle))
        .map(String::as_str)
}
