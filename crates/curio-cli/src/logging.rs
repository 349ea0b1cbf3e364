//! Diagnostics on stderr via `tracing`.
//!
//! `curio-core` and `curio-adapters` only emit events; this module installs
//! the one subscriber. Command output goes to stdout, so log lines never mix
//! with `--output-format json`.
//!
//! | Flags     | Curio crates | Event layout                 |
//! |-----------|--------------|------------------------------|
//! | (none)    | WARN         | level + message              |
//! | `-v`      | INFO         | level + message              |
//! | `-vv`     | DEBUG        | + module target              |
//! | `-vvv`    | TRACE        | + module target, uptime      |
//! | `--quiet` | ERROR        | level + message              |
//!
//! A set `RUST_LOG` replaces the crate filter; the layout still follows the
//! flags.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter,
    filter::{Directive, LevelFilter},
    fmt::time::Uptime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events pass the default filter.
const WORKSPACE_TARGETS: [&str; 3] = ["curio", "curio_core", "curio_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs, no_color: bool) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => workspace_filter(level)?,
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color && std::io::stderr().is_terminal())
        .with_target(level >= LevelFilter::DEBUG);

    // Uptime only helps when tracing the resolution and sync steps.
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if level == LevelFilter::TRACE {
        registry.with(layer.with_timer(Uptime::default())).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.context("installing the tracing subscriber")
}

/// `level` for every Curio crate, nothing from dependencies.
fn workspace_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    WORKSPACE_TARGETS
        .iter()
        .try_fold(EnvFilter::default(), |filter, target| {
            let directive: Directive = format!("{target}={level}")
                .parse()
                .with_context(|| format!("building log directive for {target}"))?;
            Ok(filter.add_directive(directive))
        })
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
