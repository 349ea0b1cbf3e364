//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "curio",
    bin_name = "curio",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Curate prompts, instructions and chat modes into your project",
    long_about = "Curio keeps a YAML document of enabled prompts, instructions, \
                  chat modes and collections, and copies the resulting selection \
                  from an artifact library into your project.",
    after_help = "EXAMPLES:\n\
        \x20 curio init                                   # Create default config file\n\
        \x20 curio init my-config.yml                     # Create named config file\n\
        \x20 curio apply                                  # Apply default config\n\
        \x20 curio list instructions                      # See which instructions are enabled\n\
        \x20 curio toggle prompts create-readme on        # Enable a specific prompt\n\
        \x20 curio toggle instructions all off -c team.yml  # Disable all instructions\n\
        \n\
        WORKFLOW:\n\
        \x20 1. Run 'curio init' to create a configuration file\n\
        \x20 2. Use 'curio list' and 'curio toggle' to manage enabled items\n\
        \x20 3. Run 'curio apply' to copy files to your project",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a configuration document.
    #[command(
        about = "Initialize a configuration document",
        after_help = "EXAMPLES:\n\
            \x20 curio init                  # curio.config.yml\n\
            \x20 curio init my-config.yml\n\
            \x20 curio init --force          # overwrite an existing document"
    )]
    Init(InitArgs),

    /// Copy the resolved selection into the project.
    #[command(
        about = "Apply configuration and copy files to the project",
        after_help = "EXAMPLES:\n\
            \x20 curio apply\n\
            \x20 curio apply team.yml --dry-run\n\
            \x20 curio apply --force     # rewrite files that are already current"
    )]
    Apply(ApplyArgs),

    /// Show effective state per section.
    #[command(
        visible_alias = "ls",
        about = "List items with their enabled status",
        after_help = "EXAMPLES:\n\
            \x20 curio list\n\
            \x20 curio list instructions\n\
            \x20 curio list --format json"
    )]
    List(ListArgs),

    /// Enable or disable entries.
    #[command(
        about = "Enable or disable prompts, instructions, chat modes, or collections",
        after_help = "EXAMPLES:\n\
            \x20 curio toggle prompts create-readme on\n\
            \x20 curio toggle collections testing          # flip\n\
            \x20 curio toggle instructions all off"
    )]
    Toggle(ToggleArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `curio init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document to create; overrides `--config`.
    #[arg(value_name = "CONFIG", help = "Configuration document to create")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing document.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `curio apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document to apply; overrides `--config`.
    #[arg(value_name = "CONFIG", help = "Configuration document to apply")]
    pub config: Option<PathBuf>,

    /// Print the plan without touching the destination.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,

    /// Rewrite enabled files even when they are already current.
    #[arg(long = "force", help = "Recopy every enabled file")]
    pub force: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `curio list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict output to one section.
    #[arg(
        value_name = "SECTION",
        help = "prompts, instructions, chatmodes or collections"
    )]
    pub section: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable checklist.
    Table,
    /// JSON document.
    Json,
}

// ── toggle ────────────────────────────────────────────────────────────────────

/// Arguments for `curio toggle`.
#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Section holding the entry.
    #[arg(
        value_name = "SECTION",
        help = "prompts, instructions, chatmodes or collections"
    )]
    pub section: String,

    /// Entry name, or `all`.
    #[arg(value_name = "NAME", help = "Entry name, or 'all'")]
    pub name: String,

    /// Desired state; omitted flips a single entry.
    #[arg(value_name = "STATE", help = "on or off (omit to flip)")]
    pub state: Option<String>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_toggle_command() {
        let cli = Cli::parse_from(["curio", "toggle", "prompts", "create-readme", "on"]);
        let Commands::Toggle(args) = cli.command else {
            panic!("expected Toggle command");
        };
        assert_eq!(args.section, "prompts");
        assert_eq!(args.name, "create-readme");
        assert_eq!(args.state.as_deref(), Some("on"));
    }

    #[test]
    fn toggle_state_is_optional() {
        let cli = Cli::parse_from(["curio", "toggle", "collections", "testing"]);
        assert!(matches!(cli.command, Commands::Toggle(ToggleArgs { state: None, .. })));
    }

    #[test]
    fn apply_takes_positional_document() {
        let cli = Cli::parse_from(["curio", "apply", "team.yml", "--dry-run"]);
        let Commands::Apply(args) = cli.command else {
            panic!("expected Apply command");
        };
        assert_eq!(args.config, Some(PathBuf::from("team.yml")));
        assert!(args.dry_run);
        assert!(!args.force);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["curio", "list", "prompts", "--config", "team.yml"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("team.yml")));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::parse_from(["curio", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Table);
        assert!(args.section.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["curio", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
