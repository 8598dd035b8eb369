//! Remove command

use std::path::PathBuf;

use crate::cli::RemoveArgs;
use crate::error::Result;
use crate::ledger::record_packages;
use crate::operations::{InstallSession, InstallationOrchestrator};
use crate::prompt::InquirePrompt;

use super::helpers::{Project, print_records};

/// Run remove command
pub fn run(workspace: Option<PathBuf>, no_interaction: bool, args: RemoveArgs) -> Result<i32> {
    let project = Project::open(workspace)?;

    let mut store = project.manifest_store();
    let mut installer = project.installer();
    let index = project.index();
    let lookup = project.catalog()?;
    let mut prompt = InquirePrompt::new(no_interaction);
    let mut ledger = project.ledger()?;

    let (status, records) = {
        let session = InstallSession::open(&mut store, &mut installer, &index)?;
        let mut orchestrator = InstallationOrchestrator::new(session, &lookup, &mut prompt, &ledger)
            .with_uninstall_scan(project.config.uninstall_scan);

        if args.dev {
            orchestrator.uninstall(&[], &args.packages)?;
        } else {
            orchestrator.uninstall(&args.packages, &[])?;
        }
        let status = orchestrator.run()?;
        (status, orchestrator.into_records())
    };

    if status == 0 && !records.is_empty() {
        record_packages(&mut ledger, &records);
        ledger.write()?;
        print_records(&records);
    }

    Ok(status)
}
