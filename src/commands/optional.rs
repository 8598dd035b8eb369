//! Optional command
//!
//! Requirement groups come from the installed package's
//! `extra.requisite.optional` directives.

use std::path::PathBuf;

use crate::cli::OptionalArgs;
use crate::error::{RequisiteError, Result};
use crate::ledger::{optional_selection, record_optional_selection, record_packages};
use crate::operations::{InstallSession, QuestionOrchestrator, RequirementGroup};
use crate::prompt::InquirePrompt;

use super::helpers::{Project, print_records};

/// Run optional command
pub fn run(workspace: Option<PathBuf>, no_interaction: bool, args: OptionalArgs) -> Result<i32> {
    let project = Project::open(workspace)?;

    let mut store = project.manifest_store();
    let mut installer = project.installer();
    let index = project.index();
    let lookup = project.catalog()?;
    let mut prompt = InquirePrompt::new(no_interaction);
    let mut ledger = project.ledger()?;

    let package = index
        .find(&args.package)?
        .ok_or_else(|| RequisiteError::PackageNotInstalled {
            name: args.package.clone(),
        })?;
    let package_name = package.name.clone();
    let previous = optional_selection(&ledger, &package_name);

    let (status, records, selected) = {
        let session = InstallSession::open(&mut store, &mut installer, &index)?;
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger)
            .with_uninstall_scan(project.config.uninstall_scan)
            .with_prompt_attempts(project.config.prompt_attempts);

        if args.remove {
            let records = orchestrator.uninstall(&package_name, &previous)?;
            (orchestrator.status(), records, Vec::new())
        } else {
            let groups = RequirementGroup::from_directives(&package.directives())?;
            let records = orchestrator.install(&package_name, &groups)?;
            let mut selected = previous.clone();
            for name in orchestrator.packages_to_install().keys() {
                if !selected.contains(name) {
                    selected.push(name.clone());
                }
            }
            (orchestrator.status(), records, selected)
        }
    };

    if status == 0 && (selected != previous || !records.is_empty()) {
        record_packages(&mut ledger, &records);
        record_optional_selection(&mut ledger, &package_name, &selected);
        ledger.write()?;
        print_records(&records);
    }

    Ok(status)
}
