//! Flags shared by `init`, `apply`, `list` and `toggle`.
//!
//! Two groups show up in `--help`: where Curio reads from (the document and
//! the artifact library) and how it reports back (verbosity, colour, format).

use std::path::PathBuf;

use clap::Args;

const LOCATIONS: &str = "Locations";
const REPORTING: &str = "Reporting";

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Selection document to read and update.
    ///
    /// A positional `CONFIG` on `init` or `apply` takes precedence.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help_heading = LOCATIONS,
        help = "Selection document [default: curio.config.yml]"
    )]
    pub config: Option<PathBuf>,

    /// Directory holding `prompts/`, `instructions/`, `chatmodes/` and
    /// `collections/`.
    #[arg(
        long = "catalog",
        global = true,
        value_name = "DIR",
        env = "CURIO_CATALOG_ROOT",
        help_heading = LOCATIONS,
        help = "Artifact library to curate from [default: .]"
    )]
    pub catalog: Option<PathBuf>,

    /// Counted; four or more behave like three.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help_heading = REPORTING,
        help = "Log resolution and copy steps (-v, -vv, -vvv)",
        long_help = "Log what Curio does on stderr. Without this flag only \
                     warnings are shown, such as a collection file that \
                     failed to load. -v reports saved documents and copied \
                     files, -vv adds per-entry decisions, -vvv adds timings."
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help_heading = REPORTING,
        help = "Only log errors"
    )]
    pub quiet: bool,

    /// Also set by a `NO_COLOR` environment variable.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help_heading = REPORTING,
        help = "Plain text even on a terminal"
    )]
    pub no_color: bool,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help_heading = REPORTING,
        help = "How command results are printed on stdout"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Coloured on a terminal, plain when piped.
    #[default]
    Auto,
    /// Always coloured checklists and summaries.
    Human,
    /// Same layout, never coloured.
    Plain,
    /// One JSON value per command.
    Json,
}
