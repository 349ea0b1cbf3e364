//! Reconciliation plan for the destination directory.
//!
//! Deletion is computed from the union of every enabled source, never from a
//! single collection's point of view: anything still enabled by any
//! explicit flag or collection is never scheduled for removal.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::resolution::Resolution;
use crate::domain::value_objects::ArtifactKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub to_copy: Vec<ArtifactKey>,
    pub to_delete: Vec<ArtifactKey>,
    /// Enabled and already identical at the destination.
    pub unchanged: Vec<ArtifactKey>,
}

impl SyncPlan {
    /// Build a plan from the resolved state and the managed files currently
    /// present at the destination.
    ///
    /// `is_current` reports whether the destination copy of an enabled
    /// artifact already matches its source; it is only asked about keys in
    /// `present`.
    pub fn compute<F>(resolution: &Resolution, present: &BTreeSet<ArtifactKey>, mut is_current: F) -> Self
    where
        F: FnMut(&ArtifactKey) -> bool,
    {
        let enabled = resolution.enabled_keys();
        let mut plan = SyncPlan::default();

        for key in &enabled {
            if present.contains(key) && is_current(key) {
                plan.unchanged.push(key.clone());
            } else {
                plan.to_copy.push(key.clone());
            }
        }

        plan.to_delete = present.difference(&enabled).cloned().collect();
        plan
    }

    /// `true` when applying the plan would not touch the filesystem.
    pub fn is_noop(&self) -> bool {
        self.to_copy.is_empty() && self.to_delete.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CatalogSnapshot, Collection, ConfigDocument};
    use crate::domain::resolution::resolve;
    use crate::domain::value_objects::Section;

    fn key(name: &str) -> ArtifactKey {
        ArtifactKey::new(Section::Prompts, name)
    }

    fn scenario() -> Resolution {
        let mut doc = ConfigDocument::default();
        doc.set_flag(Section::Collections, "t", true);
        doc.set_flag(Section::Prompts, "p", false);
        let catalog = CatalogSnapshot::new().with_section(Section::Prompts, ["p", "q"]);
        resolve(&doc, &catalog, |name| {
            Ok::<_, String>(Collection::from_item_paths(
                name,
                ["prompts/p.prompt.md", "prompts/q.prompt.md"],
            ))
        })
    }

    #[test]
    fn copies_enabled_and_deletes_explicitly_disabled() {
        let present: BTreeSet<_> = [key("p")].into();
        let plan = SyncPlan::compute(&scenario(), &present, |_| true);

        assert_eq!(plan.to_copy, [key("q")]);
        assert_eq!(plan.to_delete, [key("p")]);
        assert!(plan.unchanged.is_empty());
    }

    #[test]
    fn stale_copies_are_refreshed() {
        let present: BTreeSet<_> = [key("q")].into();
        let plan = SyncPlan::compute(&scenario(), &present, |_| false);
        assert_eq!(plan.to_copy, [key("q")]);
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn matching_destination_is_a_noop() {
        let present: BTreeSet<_> = [key("q")].into();
        let plan = SyncPlan::compute(&scenario(), &present, |_| true);
        assert!(plan.is_noop());
        assert_eq!(plan.unchanged, [key("q")]);
    }

    #[test]
    fn files_for_removed_catalog_entries_are_deleted() {
        let present: BTreeSet<_> = [key("q"), key("vanished")].into();
        let plan = SyncPlan::compute(&scenario(), &present, |_| true);
        assert_eq!(plan.to_delete, [key("vanished")]);
    }
}
