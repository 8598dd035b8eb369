//! Require command

use std::path::PathBuf;

use crate::cli::RequireArgs;
use crate::error::Result;
use crate::ledger::record_packages;
use crate::operations::{InstallSession, InstallationOrchestrator, PackageRequest};
use crate::prompt::InquirePrompt;

use super::helpers::{Project, print_records};

/// Run require command
pub fn run(workspace: Option<PathBuf>, no_interaction: bool, args: RequireArgs) -> Result<i32> {
    let project = Project::open(workspace)?;
    let requests = args
        .packages
        .iter()
        .map(|package| package.parse::<PackageRequest>())
        .collect::<Result<Vec<_>>>()?;

    let mut store = project.manifest_store();
    let mut installer = project.installer();
    let index = project.index();
    let lookup = project.catalog()?;
    let mut prompt = InquirePrompt::new(no_interaction);
    let mut ledger = project.ledger()?;

    let (status, records) = {
        let session = InstallSession::open(&mut store, &mut installer, &index)?;
        let mut orchestrator = InstallationOrchestrator::new(session, &lookup, &mut prompt, &ledger)
            .with_uninstall_scan(project.config.uninstall_scan)
            .with_prompt_attempts(project.config.prompt_attempts);

        if args.dev {
            orchestrator.install(&[], &requests)?;
        } else {
            orchestrator.install(&requests, &[])?;
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
