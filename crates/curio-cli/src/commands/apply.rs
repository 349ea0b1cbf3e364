//! `curio apply`: copy the resolved selection into the project.

use tracing::{debug, instrument};

use curio_core::{
    application::{SyncOptions, SyncReport},
    domain::Section,
};

use crate::{
    cli::{ApplyArgs, GlobalArgs, OutputFormat},
    commands::Workspace,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(dry_run = args.dry_run, force = args.force))]
pub fn execute(
    args: ApplyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::resolve(&global, &config, args.config.as_deref());
    let selection = workspace.selection_service();

    let loaded = selection
        .load(&workspace.document)
        .with_cli_context(|| format!("loading {}", workspace.document.display()))?;
    let resolution = selection.resolve(&loaded.document)?;
    let destination = loaded.document.project.output_root(&workspace.document);
    debug!(destination = %destination.display(), "Destination resolved");

    let options = SyncOptions {
        dry_run: args.dry_run,
        force: args.force,
    };
    let report = workspace
        .sync_service()
        .apply(&resolution, &destination, options)
        .with_cli_context(|| format!("syncing into {}", destination.display()))?;

    if output.format() == OutputFormat::Json {
        output.json(&report)?;
        return Ok(());
    }

    output.header(&format!("Configuration: {}", workspace.document.display()))?;
    for diagnostic in resolution.diagnostics() {
        output.warning(&diagnostic.to_string())?;
    }

    if report.dry_run {
        render_plan(&report, &output)?;
    } else {
        render_summary(&report, &output)?;
    }

    Ok(())
}

fn render_plan(report: &SyncReport, output: &OutputManager) -> CliResult<()> {
    output.info(&format!(
        "Dry run: no files in {} were changed",
        report.destination.display()
    ))?;
    if report.plan.is_noop() {
        output.print("Everything is up to date.")?;
        return Ok(());
    }
    for key in &report.plan.to_copy {
        output.print(&format!("  + {key}"))?;
    }
    for key in &report.plan.to_delete {
        output.print(&format!("  - {key}"))?;
    }
    output.print(&format!(
        "Would copy {} file(s) and remove {} file(s); {} unchanged.",
        report.copied(),
        report.plan.to_delete.len(),
        report.unchanged()
    ))?;
    Ok(())
}

fn render_summary(report: &SyncReport, output: &OutputManager) -> CliResult<()> {
    if report.plan.is_noop() {
        output.success(&format!(
            "Everything is up to date ({} enabled).",
            report.enabled_total()
        ))?;
        return Ok(());
    }

    for section in Section::ARTIFACTS {
        let copied = report
            .plan
            .to_copy
            .iter()
            .filter(|k| k.section == section)
            .count();
        let removed = report
            .plan
            .to_delete
            .iter()
            .filter(|k| k.section == section)
            .count();
        if copied + removed > 0 {
            output.print(&format!(
                "  {}: {copied} copied, {removed} removed",
                section.label()
            ))?;
        }
    }

    output.success(&format!(
        "Copied {} file(s), removed {} file(s), {} unchanged → {}",
        report.copied(),
        report.removed(),
        report.unchanged(),
        report.destination.display()
    ))?;
    Ok(())
}
