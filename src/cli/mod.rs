//! CLI definitions using clap derive API
//!
//! One submodule per command's argument types:
//! - require: Require command arguments
//! - remove: Remove command arguments
//! - optional: Optional command arguments
//! - ledger: Ledger command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod ledger;
pub mod optional;
pub mod remove;
pub mod require;

pub use ledger::LedgerArgs;
pub use optional::OptionalArgs;
pub use remove::RemoveArgs;
pub use require::RequireArgs;

/// Requisite - transactional dependency manifest orchestration
#[derive(Parser, Debug)]
#[command(
    name = "requisite",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Change a project's requirements and install exactly what changed",
    long_about = "Requisite edits the project manifest, runs the host package manager restricted \
                  to the packages that changed, and restores the manifest when the run fails.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  requisite require vendor/pkg             \x1b[90m# Require the latest stable version\x1b[0m\n   \
                  requisite require vendor/pkg:^2.0 --dev  \x1b[90m# Require a dev dependency\x1b[0m\n   \
                  requisite remove vendor/pkg              \x1b[90m# Remove a requirement\x1b[0m\n   \
                  requisite optional acme/framework        \x1b[90m# Choose optional dependencies\x1b[0m\n   \
                  requisite ledger classmap                \x1b[90m# Show one ledger entry\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "REQUISITE_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Never ask questions
    #[arg(long = "no-interaction", short = 'n', global = true)]
    pub no_interaction: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add requirements and install them
    Require(RequireArgs),

    /// Remove requirements and uninstall what nothing else needs
    Remove(RemoveArgs),

    /// Choose and install optional dependencies of an installed package
    Optional(OptionalArgs),

    /// Print the lock ledger
    Ledger(LedgerArgs),
}
