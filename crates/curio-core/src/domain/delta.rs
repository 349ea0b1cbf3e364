//! Side effects of toggling a single collection.
//!
//! Compares the resolutions before and after the toggle. The report is
//! advisory only: it never feeds back into state.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::resolution::Resolution;
use crate::domain::value_objects::Section;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionDelta {
    pub newly_enabled: Vec<String>,
    pub newly_disabled: Vec<String>,
    /// Listed by the collection but held off by an explicit `false`.
    pub blocked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeltaSummary {
    pub collection: String,
    pub collection_enabled: bool,
    pub sections: BTreeMap<Section, SectionDelta>,
}

impl DeltaSummary {
    pub fn newly_enabled_total(&self) -> usize {
        self.sections.values().map(|d| d.newly_enabled.len()).sum()
    }

    pub fn newly_disabled_total(&self) -> usize {
        self.sections.values().map(|d| d.newly_disabled.len()).sum()
    }

    pub fn blocked_total(&self) -> usize {
        self.sections.values().map(|d| d.blocked.len()).sum()
    }

    pub fn section(&self, section: Section) -> Option<&SectionDelta> {
        self.sections.get(&section)
    }
}

/// Report what toggling `collection` changed.
///
/// Returns `None` when either side is unavailable.
pub fn delta(
    before: Option<&Resolution>,
    after: Option<&Resolution>,
    collection: &str,
    collection_enabled: bool,
) -> Option<DeltaSummary> {
    let (before, after) = (before?, after?);
    let mut sections = BTreeMap::new();

    for section in Section::ARTIFACTS {
        let was = before.enabled(section);
        let now = after.enabled(section);

        let newly_enabled = now
            .difference(&was)
            .filter(|name| {
                after
                    .state(section, name)
                    .is_some_and(|s| s.reason.granted_by(collection))
            })
            .map(|name| name.to_string())
            .collect();

        let newly_disabled = was
            .difference(&now)
            .filter(|name| {
                before
                    .state(section, name)
                    .is_some_and(|s| s.reason.granted_by(collection))
            })
            .map(|name| name.to_string())
            .collect();

        let blocked = if collection_enabled {
            after
                .members_of(collection)
                .unwrap_or_default()
                .iter()
                .filter(|key| key.section == section)
                .filter(|key| {
                    after
                        .state(section, &key.name)
                        .is_some_and(|s| s.reason.is_explicit_off())
                })
                .map(|key| key.name.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };

        sections.insert(
            section,
            SectionDelta {
                newly_enabled,
                newly_disabled,
                blocked,
            },
        );
    }

    Some(DeltaSummary {
        collection: collection.to_string(),
        collection_enabled,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CatalogSnapshot, Collection, ConfigDocument};
    use crate::domain::resolution::resolve;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new()
            .with_section(Section::Prompts, ["x", "y", "z"])
            .with_section(Section::Instructions, ["shared"])
    }

    fn membership(name: &str) -> Result<Collection, String> {
        match name {
            "c" => Ok(Collection::from_item_paths(
                "c",
                [
                    "prompts/x.prompt.md",
                    "prompts/y.prompt.md",
                    "instructions/shared.instructions.md",
                ],
            )),
            "d" => Ok(Collection::from_item_paths(
                "d",
                ["instructions/shared.instructions.md"],
            )),
            _ => Err("missing".to_string()),
        }
    }

    #[test]
    fn enabling_reports_new_and_blocked_items() {
        let mut doc = ConfigDocument::default();
        doc.set_flag(Section::Prompts, "y", false);
        let before = resolve(&doc, &catalog(), membership);

        doc.set_flag(Section::Collections, "c", true);
        let after = resolve(&doc, &catalog(), membership);

        let summary = delta(Some(&before), Some(&after), "c", true).unwrap();
        let prompts = summary.section(Section::Prompts).unwrap();
        assert_eq!(prompts.newly_enabled, ["x"]);
        assert_eq!(prompts.blocked, ["y"]);
        assert_eq!(summary.newly_enabled_total(), 2);
        assert_eq!(summary.blocked_total(), 1);
        assert_eq!(summary.newly_disabled_total(), 0);
    }

    #[test]
    fn disabling_keeps_items_still_granted_elsewhere() {
        let mut doc = ConfigDocument::default();
        doc.set_flag(Section::Collections, "c", true);
        doc.set_flag(Section::Collections, "d", true);
        let before = resolve(&doc, &catalog(), membership);

        doc.set_flag(Section::Collections, "c", false);
        let after = resolve(&doc, &catalog(), membership);

        let summary = delta(Some(&before), Some(&after), "c", false).unwrap();
        assert_eq!(
            summary.section(Section::Prompts).unwrap().newly_disabled,
            ["x", "y"]
        );
        assert!(
            summary
                .section(Section::Instructions)
                .unwrap()
                .newly_disabled
                .is_empty()
        );
        assert_eq!(summary.blocked_total(), 0);
    }

    #[test]
    fn explicitly_enabled_items_are_not_credited_to_collection() {
        let mut doc = ConfigDocument::default();
        doc.set_flag(Section::Prompts, "x", true);
        let before = resolve(&doc, &catalog(), membership);

        doc.set_flag(Section::Collections, "c", true);
        let after = resolve(&doc, &catalog(), membership);

        let summary = delta(Some(&before), Some(&after), "c", true).unwrap();
        assert_eq!(summary.section(Section::Prompts).unwrap().newly_enabled, ["y"]);
    }

    #[test]
    fn missing_side_yields_none() {
        let res = Resolution::default();
        assert!(delta(None, Some(&res), "c", true).is_none());
        assert!(delta(Some(&res), None, "c", false).is_none());
    }
}
