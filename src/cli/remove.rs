use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a requirement:\n    requisite remove vendor/pkg\n\n\
                  Remove a dev requirement:\n    requisite remove vendor/tool --dev")]
pub struct RemoveArgs {
    /// Package names to remove
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Remove from require-dev instead of require
    #[arg(long)]
    pub dev: bool,
}
