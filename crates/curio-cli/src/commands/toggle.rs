//! `curio toggle`: set or flip flags in the document.

use tracing::instrument;

use curio_core::{
    application::{ToggleOutcome, ToggleRequest, ToggleTarget},
    domain::{DeltaSummary, DomainValidator, Section},
    error::CurioError,
};

use crate::{
    cli::{GlobalArgs, OutputFormat, ToggleArgs},
    commands::{Workspace, report_budget},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(section = %args.section, name = %args.name))]
pub fn execute(
    args: ToggleArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let section = DomainValidator::parse_section(&args.section).map_err(CurioError::from)?;
    let state = args
        .state
        .as_deref()
        .map(DomainValidator::parse_state)
        .transpose()
        .map_err(CurioError::from)?;
    let target = ToggleTarget::from(args.name.as_str());

    let workspace = Workspace::resolve(&global, &config, None);
    let outcome = workspace
        .selection_service()
        .toggle(
            &workspace.document,
            ToggleRequest {
                section,
                target,
                state,
            },
        )
        .with_cli_context(|| format!("toggling in {}", workspace.document.display()))?;

    if output.format() == OutputFormat::Json {
        output.json(&outcome)?;
        return Ok(());
    }

    render(&outcome, &output)
}

fn render(outcome: &ToggleOutcome, output: &OutputManager) -> CliResult<()> {
    output.success(&headline(outcome))?;

    if outcome.bulk && outcome.enabled && outcome.section == Section::Instructions {
        output.warning(
            "Enabling every instruction can exceed the assistant's context window. \
             Consider enabling only what you need.",
        )?;
    }

    output.print(&format!(
        "{}: {}/{} enabled.",
        outcome.section.label(),
        outcome.enabled_count,
        outcome.total
    ))?;

    for warning in &outcome.budget {
        report_budget(output, warning)?;
    }

    if let Some(delta) = &outcome.delta {
        for line in delta_lines(delta) {
            output.info(&line)?;
        }
    }

    for diagnostic in &outcome.diagnostics {
        output.warning(&diagnostic.to_string())?;
    }

    output.print("Run 'curio apply' to copy updated selections into your project.")?;
    Ok(())
}

fn headline(outcome: &ToggleOutcome) -> String {
    let verb = if outcome.enabled { "Enabled" } else { "Disabled" };
    match outcome.names.as_slice() {
        [name] if !outcome.bulk => format!("{verb} {} '{name}'.", outcome.section.singular()),
        _ => format!("{verb} all {}.", outcome.section.label().to_lowercase()),
    }
}

/// Concise effect of toggling one collection.
fn delta_lines(delta: &DeltaSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if delta.collection_enabled {
        let enabled = delta.newly_enabled_total();
        if enabled > 0 {
            lines.push(format!(
                "+{enabled} item(s) effectively enabled by this collection"
            ));
        }
        let blocked = delta.blocked_total();
        if blocked > 0 {
            lines.push(format!(
                "{blocked} item(s) remain disabled due to explicit overrides"
            ));
        }
    } else {
        let disabled = delta.newly_disabled_total();
        if disabled > 0 {
            lines.push(format!(
                "-{disabled} item(s) effectively disabled by disabling this collection"
            ));
        }
    }
    lines
}
