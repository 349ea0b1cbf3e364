//! `curio init`: create a configuration document.

use tracing::instrument;

use curio_core::domain::Section;

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::Workspace,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Write a fresh document listing every catalog collection as disabled.
#[instrument(skip_all, fields(force = args.force))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::resolve(&global, &config, args.config.as_deref());
    let service = workspace.selection_service();

    let created = service
        .initialize(&workspace.document, args.force)
        .with_cli_context(|| format!("initializing {}", workspace.document.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        workspace.document.display()
    ))?;

    let collections = created.document.section(Section::Collections).len();
    if collections > 0 {
        output.info(&format!(
            "{collections} collection(s) listed, all disabled"
        ))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print("  curio list                             # review what is available")?;
    output.print("  curio toggle collections <name> on     # enable a collection")?;
    output.print("  curio apply                            # copy files into the project")?;

    Ok(())
}
