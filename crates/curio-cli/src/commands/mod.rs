//! Command handlers.
//!
//! Each handler translates parsed arguments into core service calls and
//! renders the result.  Adapter wiring lives here so every command sees the
//! same catalog.

use std::path::{Path, PathBuf};

use curio_adapters::{FsCatalog, LocalFilesystem, YamlCollectionSource, YamlConfigStore};
use curio_core::{
    application::{SelectionService, SyncService},
    domain::{BudgetLevel, BudgetWarning},
};

use crate::{cli::GlobalArgs, config::AppConfig, output::OutputManager};

pub mod apply;
pub mod init;
pub mod list;
pub mod toggle;

/// Resolved locations for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub catalog_root: PathBuf,
    pub document: PathBuf,
}

impl Workspace {
    pub fn resolve(global: &GlobalArgs, config: &AppConfig, positional: Option<&Path>) -> Self {
        Self {
            catalog_root: config.catalog_root(global.catalog.as_deref()),
            document: config.document_path(positional, global.config.as_deref()),
        }
    }

    pub fn selection_service(&self) -> SelectionService {
        let fs = LocalFilesystem::new();
        SelectionService::new(
            Box::new(FsCatalog::new(self.catalog_root.clone(), fs)),
            Box::new(YamlCollectionSource::new(self.catalog_root.clone(), fs)),
            Box::new(YamlConfigStore::new(fs)),
        )
    }

    pub fn sync_service(&self) -> SyncService {
        let fs = LocalFilesystem::new();
        SyncService::new(Box::new(FsCatalog::new(self.catalog_root.clone(), fs)), Box::new(fs))
    }
}

/// `12345` → `12,345`.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn report_budget(output: &OutputManager, warning: &BudgetWarning) -> std::io::Result<()> {
    let label = warning.section.label().to_lowercase();
    let total = format_count(warning.total_chars);
    let limit = format_count(warning.limit);
    match warning.level {
        BudgetLevel::Exceeded => output.warning(&format!(
            "Estimated {label} size {total} characters exceeds the recommended limit of \
             {limit} characters. The assistant may truncate or fail."
        )),
        BudgetLevel::Approaching => output.warning(&format!(
            "Estimated {label} size {total} characters is approaching the recommended \
             limit ({limit} characters)."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(90_000), "90,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn positional_document_wins() {
        let global = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: Some("flag.yml".into()),
            catalog: Some("/lib".into()),
            output_format: crate::cli::OutputFormat::Plain,
        };
        let ws = Workspace::resolve(&global, &AppConfig::default(), Some(Path::new("pos.yml")));
        assert_eq!(ws.document, PathBuf::from("pos.yml"));
        assert_eq!(ws.catalog_root, PathBuf::from("/lib"));

        let ws = Workspace::resolve(&global, &AppConfig::default(), None);
        assert_eq!(ws.document, PathBuf::from("flag.yml"));
    }
}
