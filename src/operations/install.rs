//! Installation orchestrator
//!
//! Adds or removes explicit requirements, then runs the scoped installer
//! over exactly the names that changed.

use std::fmt;
use std::str::FromStr;

use super::session::{InstallSession, ManifestDelta};
use super::whitelist::{self, UninstallScan};
use crate::error::{RequisiteError, Result};
use crate::ledger::Lock;
use crate::manifest::Section;
use crate::prompt::{self, Prompt};
use crate::resolver::{OperationsResolver, PackageRecord};
use crate::version::{self, VersionLookup};

/// A requested package, `name` or `name:constraint`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    /// Empty when no constraint was given
    pub constraint: String,
}

impl PackageRequest {
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
        }
    }

    /// Whether the constraint must still be resolved
    pub fn is_unconstrained(&self) -> bool {
        let constraint = self.constraint.trim();
        constraint.is_empty() || constraint == "*"
    }
}

impl FromStr for PackageRequest {
    type Err = RequisiteError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, constraint) = s.split_once(':').unwrap_or((s, ""));
        let name = name.trim();
        if name.is_empty() {
            return Err(RequisiteError::InvalidOperation {
                reason: format!("'{s}' does not name a package"),
            });
        }
        Ok(Self::new(name, constraint.trim()))
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraint.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.constraint)
        }
    }
}

/// Orchestrates explicit requirement changes
pub struct InstallationOrchestrator<'a> {
    session: InstallSession<'a>,
    lookup: &'a dyn VersionLookup,
    prompt: &'a mut dyn Prompt,
    ledger: &'a Lock,
    scan: UninstallScan,
    prompt_attempts: Option<usize>,
    records: Vec<PackageRecord>,
}

impl<'a> InstallationOrchestrator<'a> {
    pub fn new(
        session: InstallSession<'a>,
        lookup: &'a dyn VersionLookup,
        prompt: &'a mut dyn Prompt,
        ledger: &'a Lock,
    ) -> Self {
        Self {
            session,
            lookup,
            prompt,
            ledger,
            scan: UninstallScan::default(),
            prompt_attempts: None,
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_uninstall_scan(mut self, scan: UninstallScan) -> Self {
        self.scan = scan;
        self
    }

    #[must_use]
    pub fn with_prompt_attempts(mut self, attempts: Option<usize>) -> Self {
        self.prompt_attempts = attempts;
        self
    }

    pub fn session(&self) -> &InstallSession<'a> {
        &self.session
    }

    /// Add requirements that the project does not declare yet
    ///
    /// Unconstrained requests are resolved first; a failed resolution leaves
    /// the manifest untouched. When nothing is new, nothing is written and
    /// the next [`InstallationOrchestrator::run`] does nothing.
    pub fn install(
        &mut self,
        requires: &[PackageRequest],
        dev_requires: &[PackageRequest],
    ) -> Result<()> {
        let mut delta = ManifestDelta::default();
        let interactive = self.prompt.is_interactive();

        for (section, requests) in [(Section::Require, requires), (Section::RequireDev, dev_requires)] {
            for request in requests {
                if self.session.root().contains(&request.name) || delta.adds(&request.name) {
                    tracing::debug!("{} is already required", request.name);
                    continue;
                }

                let constraint = if request.is_unconstrained() {
                    self.resolve_constraint(&request.name, interactive)?
                } else {
                    request.constraint.trim().to_string()
                };
                delta.add(section, &request.name, &constraint);
            }
        }

        if delta.is_empty() {
            tracing::info!("Nothing to install");
            return Ok(());
        }

        self.session.apply(&delta)?;
        self.session.set_whitelist(delta.added_names());
        Ok(())
    }

    /// Remove requirements and prepare a whitelist of what may be torn down
    pub fn uninstall(&mut self, requires: &[String], dev_requires: &[String]) -> Result<()> {
        let mut delta = ManifestDelta::default();
        for name in requires {
            delta.remove(Section::Require, name);
        }
        for name in dev_requires {
            delta.remove(Section::RequireDev, name);
        }

        if delta.is_empty() {
            return Ok(());
        }

        let installed = self.session.installed()?;
        let whitelist = whitelist::widen(&delta.removed_names(), &installed, self.scan);

        self.session.apply(&delta)?;
        self.session.set_whitelist(whitelist);
        Ok(())
    }

    /// Run the installer over the prepared whitelist and return its status
    ///
    /// A non-zero status restores the manifest as it was before the first
    /// change since the previous run.
    pub fn run(&mut self) -> Result<i32> {
        let (status, operations) = self.session.execute()?;

        self.records = if status == 0 {
            let resolver = OperationsResolver::new(self.ledger, self.session.settings().vendor_dir.clone());
            resolver.resolve(&operations)?
        } else {
            Vec::new()
        };

        Ok(status)
    }

    /// Package records of the last successful run
    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PackageRecord> {
        self.records
    }

    fn resolve_constraint(&mut self, name: &str, interactive: bool) -> Result<String> {
        if interactive {
            let question = format!(
                "Enter the version of {name} to require (or leave blank to use the latest version): "
            );
            let answer = prompt::ask_until(
                &mut *self.prompt,
                &question,
                |answer| Some(answer.trim().to_string()),
                self.prompt_attempts,
            )?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }

        version::resolve_constraint(
            self.lookup,
            name,
            self.session.settings().minimum_stability,
        )
    }
}
