//! `curio list`: effective state per section.

use curio_core::{
    application::services::{Overview, SectionOverview},
    domain::{DomainValidator, Reason, Section},
};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat, OutputFormat},
    commands::{Workspace, format_count, report_budget},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let filter = args
        .section
        .as_deref()
        .map(DomainValidator::parse_section)
        .transpose()
        .map_err(curio_core::error::CurioError::from)?;

    let workspace = Workspace::resolve(&global, &config, None);
    let overview = workspace
        .selection_service()
        .overview(&workspace.document, filter)
        .with_cli_context(|| format!("listing {}", workspace.document.display()))?;

    if args.format == ListFormat::Json || output.format() == OutputFormat::Json {
        output.json(&overview)?;
        return Ok(());
    }

    render_table(&overview, &workspace, &output)
}

fn render_table(overview: &Overview, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Configuration: {}", workspace.document.display()))?;

    for diagnostic in &overview.diagnostics {
        output.warning(&diagnostic.to_string())?;
    }

    for section in &overview.sections {
        render_section(section, output)?;
    }

    output.print("")?;
    output.print("Use 'curio toggle' to enable or disable specific items.")?;
    Ok(())
}

fn render_section(section: &SectionOverview, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.header(&heading(section))?;

    if section.items.is_empty() {
        output.print("  (no items available)")?;
        return Ok(());
    }

    for item in &section.items {
        let detail = match section.section {
            Section::Collections => None,
            _ => reason_text(&item.reason),
        };
        output.item(item.enabled, &item.name, detail.as_deref())?;
    }

    if let Some(warning) = &section.budget {
        report_budget(output, warning)?;
    }
    Ok(())
}

fn heading(section: &SectionOverview) -> String {
    let mut heading = format!(
        "{} ({}/{} enabled)",
        section.label, section.enabled, section.total
    );
    if let Some(chars) = section.chars.filter(|c| *c > 0) {
        heading.push_str(&format!(", ~{} chars", format_count(chars)));
    }
    heading
}

fn reason_text(reason: &Reason) -> Option<String> {
    match reason {
        Reason::Explicit { .. } => Some(format!("({reason})")),
        Reason::Collections { via } if !via.is_empty() => Some(format!("({reason})")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(chars: Option<usize>) -> SectionOverview {
        SectionOverview {
            section: Section::Instructions,
            label: Section::Instructions.label(),
            enabled: 2,
            total: 5,
            chars,
            budget: None,
            items: Vec::new(),
        }
    }

    #[test]
    fn heading_includes_footprint_when_known() {
        assert_eq!(heading(&section(Some(12_345))), "Instructions (2/5 enabled), ~12,345 chars");
        assert_eq!(heading(&section(Some(0))), "Instructions (2/5 enabled)");
        assert_eq!(heading(&section(None)), "Instructions (2/5 enabled)");
    }

    #[test]
    fn reasons_render_like_the_document() {
        assert_eq!(
            reason_text(&Reason::Explicit { value: false }).as_deref(),
            Some("(explicit:false)")
        );
        assert_eq!(
            reason_text(&Reason::Collections {
                via: vec!["a".into(), "b".into()]
            })
            .as_deref(),
            Some("(via: a, b)")
        );
        assert_eq!(reason_text(&Reason::Default), None);
    }
}
