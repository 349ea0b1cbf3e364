use crate::domain::value_objects::ArtifactKey;

/// A named bundle of artifact references.
///
/// Item order is the order the collection file lists them in. Paths that do
/// not map onto an artifact section are dropped at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    pub items: Vec<ArtifactKey>,
}

impl Collection {
    pub fn new(name: impl Into<String>, items: Vec<ArtifactKey>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Build a collection from raw item paths such as
    /// `instructions/rust.instructions.md`.
    pub fn from_item_paths<I, S>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = paths
            .into_iter()
            .filter_map(|p| ArtifactKey::from_item_path(p.as_ref()))
            .collect();
        Self::new(name, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Section;

    #[test]
    fn unrecognized_paths_are_ignored() {
        let c = Collection::from_item_paths(
            "web",
            [
                "prompts/a.prompt.md",
                "README.md",
                "instructions/b.instructions.md",
                "prompts/wrong.chatmode.md",
                "chatmodes/c.chatmode.md",
            ],
        );

        assert_eq!(
            c.items,
            vec![
                ArtifactKey::new(Section::Prompts, "a"),
                ArtifactKey::new(Section::Instructions, "b"),
                ArtifactKey::new(Section::ChatModes, "c"),
            ]
        );
    }

    #[test]
    fn item_order_follows_the_file() {
        let c = Collection::from_item_paths(
            "web",
            ["prompts/b.prompt.md", "chatmodes/c.chatmode.md", "prompts/a.prompt.md"],
        );
        assert_eq!(
            c.items,
            vec![
                ArtifactKey::new(Section::Prompts, "b"),
                ArtifactKey::new(Section::ChatModes, "c"),
                ArtifactKey::new(Section::Prompts, "a"),
            ]
        );
    }
}
