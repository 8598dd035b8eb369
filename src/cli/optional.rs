use clap::Parser;

/// Arguments for the optional command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Answer the optional dependency questions of a package:\n    requisite optional acme/framework\n\n\
                  Remove what was selected for it:\n    requisite optional acme/framework --remove")]
pub struct OptionalArgs {
    /// Installed package declaring the optional dependencies
    pub package: String,

    /// Remove the dependencies previously selected for the package
    #[arg(long)]
    pub remove: bool,
}
