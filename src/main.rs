//! Requisite command line entry point

use clap::Parser;

use requisite::cli::{Cli, Commands};
use requisite::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Require(args) => commands::require::run(cli.workspace, cli.no_interaction, args),
        Commands::Remove(args) => commands::remove::run(cli.workspace, cli.no_interaction, args),
        Commands::Optional(args) => commands::optional::run(cli.workspace, cli.no_interaction, args),
        Commands::Ledger(args) => commands::ledger::run(cli.workspace, args),
    };

    match result {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
