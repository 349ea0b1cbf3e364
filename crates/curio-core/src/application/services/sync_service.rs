//! Sync Service - materializes the resolved selection.
//!
//! 1. Inventory managed files at the destination
//! 2. Plan copies and deletions against the resolution
//! 3. Write the plan through the `Filesystem` port

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Catalog, Filesystem},
    domain::{ArtifactKey, Resolution, Section, SyncPlan},
    error::CurioResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Plan only.
    pub dry_run: bool,
    /// Rewrite enabled artifacts even when the destination already matches.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub destination: PathBuf,
    pub plan: SyncPlan,
    pub dry_run: bool,
    /// Deletions that found nothing to remove.
    pub already_absent: usize,
}

impl SyncReport {
    pub fn copied(&self) -> usize {
        self.plan.to_copy.len()
    }

    pub fn removed(&self) -> usize {
        self.plan.to_delete.len() - self.already_absent
    }

    pub fn unchanged(&self) -> usize {
        self.plan.unchanged.len()
    }

    /// Number of artifacts enabled at the destination after the run.
    pub fn enabled_total(&self) -> usize {
        self.copied() + self.unchanged()
    }
}

/// Service reconciling a destination directory with a resolution.
pub struct SyncService {
    catalog: Box<dyn Catalog>,
    filesystem: Box<dyn Filesystem>,
}

impl SyncService {
    pub fn new(catalog: Box<dyn Catalog>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            catalog,
            filesystem,
        }
    }

    /// Managed artifacts currently present under `destination`.
    pub fn inventory(&self, destination: &Path) -> CurioResult<BTreeSet<ArtifactKey>> {
        let mut present = BTreeSet::new();
        for section in Section::ARTIFACTS {
            for file_name in self.filesystem.list_files(&destination.join(section.dir()))? {
                if let Some(name) = section.entry_name(&file_name) {
                    present.insert(ArtifactKey::new(section, name));
                }
            }
        }
        Ok(present)
    }

    /// Compute the operations needed to make `destination` match.
    pub fn plan(
        &self,
        resolution: &Resolution,
        destination: &Path,
        force: bool,
    ) -> CurioResult<SyncPlan> {
        let present = self.inventory(destination)?;
        let plan = SyncPlan::compute(resolution, &present, |key| {
            !force && self.is_current(key, destination)
        });
        debug!(
            copy = plan.to_copy.len(),
            delete = plan.to_delete.len(),
            unchanged = plan.unchanged.len(),
            "Sync planned"
        );
        Ok(plan)
    }

    /// Plan and, unless `options.dry_run`, execute.
    #[instrument(skip(self, resolution), fields(destination = %destination.display()))]
    pub fn apply(
        &self,
        resolution: &Resolution,
        destination: &Path,
        options: SyncOptions,
    ) -> CurioResult<SyncReport> {
        let plan = self.plan(resolution, destination, options.force)?;
        let mut report = SyncReport {
            destination: destination.to_path_buf(),
            plan,
            dry_run: options.dry_run,
            already_absent: 0,
        };

        if options.dry_run || report.plan.is_noop() {
            return Ok(report);
        }

        for section in Section::ARTIFACTS {
            self.filesystem
                .create_dir_all(&destination.join(section.dir()))?;
        }

        for key in &report.plan.to_copy {
            let content = self.catalog.read(key)?;
            self.filesystem
                .write_file(&destination.join(key.relative_path()), &content)?;
            debug!(artifact = %key, "Copied");
        }

        for key in &report.plan.to_delete {
            if self
                .filesystem
                .remove_file(&destination.join(key.relative_path()))?
            {
                debug!(artifact = %key, "Removed");
            } else {
                report.already_absent += 1;
                debug!(artifact = %key, "Already absent");
            }
        }

        info!(
            copied = report.copied(),
            removed = report.removed(),
            unchanged = report.unchanged(),
            "Sync applied"
        );
        Ok(report)
    }

    fn is_current(&self, key: &ArtifactKey, destination: &Path) -> bool {
        let target = destination.join(key.relative_path());
        match (
            self.catalog.read(key),
            self.filesystem.read(&target),
        ) {
            (Ok(source), Ok(existing)) => source == existing,
            _ => false,
        }
    }
}
