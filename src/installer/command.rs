//! Installer backed by the host package manager's command line
//!
//! The configured program is run in the project directory with the
//! configured arguments followed by the whitelist. The root requirements are
//! exported as JSON in [`ROOT_REQUIRES_ENV`]. Operations are observed by
//! diffing the installed index before and after each run.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use super::{InstalledIndex, LockfileIndex, PackageSnapshot, RawOperation, ScopedInstaller};
use crate::error::{RequisiteError, Result};
use crate::manifest::RootRequirements;

/// Environment variable carrying the root requirements of a run
pub const ROOT_REQUIRES_ENV: &str = "REQUISITE_ROOT_REQUIRES";

#[derive(Debug)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
    index: LockfileIndex,
    /// Installed state at the start of the current capture window
    baseline: Option<Vec<PackageSnapshot>>,
    /// Why the baseline could not be read; the next run fails with it
    baseline_error: Option<RequisiteError>,
    captured: Vec<RawOperation>,
}

impl CommandInstaller {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
        index: LockfileIndex,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
            index,
            baseline: None,
            baseline_error: None,
            captured: Vec::new(),
        }
    }
}

impl ScopedInstaller for CommandInstaller {
    fn run(&mut self, root: &RootRequirements, whitelist: &[String]) -> Result<i32> {
        if let Some(e) = self.baseline_error.take() {
            return Err(e);
        }

        let root_json = serde_json::to_string(root)?;

        tracing::debug!(program = %self.program, ?whitelist, "starting installer");
        let status = Command::new(&self.program)
            .args(&self.args)
            .args(whitelist)
            .current_dir(&self.working_dir)
            .env(ROOT_REQUIRES_ENV, root_json)
            .status()
            .map_err(|e| RequisiteError::InstallerSpawnFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        // Terminated by a signal
        let code = status.code().unwrap_or(1);
        tracing::debug!(code, "installer finished");

        if let Some(before) = self.baseline.take() {
            let after = self.index.list()?;
            self.captured.extend(diff(&before, &after));
            self.baseline = Some(after);
        }

        Ok(code)
    }

    fn begin_capture(&mut self) {
        self.captured.clear();
        match self.index.list() {
            Ok(packages) => {
                self.baseline = Some(packages);
                self.baseline_error = None;
            }
            Err(e) => {
                tracing::warn!("could not read installed packages: {e}");
                self.baseline = None;
                self.baseline_error = Some(e);
            }
        }
    }

    fn end_capture(&mut self) -> Vec<RawOperation> {
        self.baseline = None;
        self.baseline_error = None;
        std::mem::take(&mut self.captured)
    }
}

/// Operations turning `before` into `after`
///
/// Installs and updates follow the order of `after`; uninstalls follow the
/// order of `before` and come last.
pub fn diff(before: &[PackageSnapshot], after: &[PackageSnapshot]) -> Vec<RawOperation> {
    let previous: HashMap<String, &PackageSnapshot> = before
        .iter()
        .map(|package| (package.name.to_lowercase(), package))
        .collect();
    let current: HashMap<String, &PackageSnapshot> = after
        .iter()
        .map(|package| (package.name.to_lowercase(), package))
        .collect();

    let mut operations = Vec::new();

    for package in after {
        match previous.get(&package.name.to_lowercase()) {
            None => operations.push(RawOperation::Install(package.clone())),
            Some(initial) if initial.version != package.version => {
                operations.push(RawOperation::Update {
                    initial: (*initial).clone(),
                    target: package.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for package in before {
        if !current.contains_key(&package.name.to_lowercase()) {
            operations.push(RawOperation::Uninstall(package.clone()));
        }
    }

    operations
}
