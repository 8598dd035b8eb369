//! Question-driven orchestrator
//!
//! Installs optional dependencies of a package by asking one question per
//! [`RequirementGroup`]; every selection becomes a root requirement.

use std::collections::BTreeMap;

use serde_json::Value;

use super::session::{InstallSession, ManifestDelta};
use super::whitelist::{self, UninstallScan};
use crate::error::{self, Result};
use crate::installer::PackageSnapshot;
use crate::ledger::Lock;
use crate::manifest::Section;
use crate::prompt::{self, Prompt};
use crate::resolver::{OperationsResolver, PackageRecord, normalize_version};
use crate::version::{self, VersionLookup};

/// Key under a package's directives listing its requirement groups
pub const OPTIONAL_DIRECTIVE: &str = "optional";

/// A question offering mutually alternative packages
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementGroup {
    question: String,
    candidates: Vec<(String, String)>,
}

impl RequirementGroup {
    /// A group needs at least two candidates
    pub fn new(question: impl Into<String>, candidates: Vec<(String, String)>) -> Result<Self> {
        let question = question.into();
        if candidates.len() < 2 {
            return Err(error::invalid_group(question, candidates.len()));
        }
        Ok(Self {
            question,
            candidates,
        })
    }

    /// Groups declared in a package's directives
    ///
    /// `{"optional": {"Which logger?": ["a/log", "b/log"]}}`, where each
    /// candidate list may also be a `{name: constraint}` mapping.
    pub fn from_directives(directives: &Value) -> Result<Vec<Self>> {
        let Some(groups) = directives.get(OPTIONAL_DIRECTIVE).and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        groups
            .iter()
            .map(|(question, candidates)| {
                let candidates = match candidates {
                    Value::Array(names) => names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|name| (name.to_string(), String::new()))
                        .collect(),
                    Value::Object(links) => links
                        .iter()
                        .map(|(name, constraint)| {
                            (name.clone(), constraint.as_str().unwrap_or_default().to_string())
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                Self::new(question.as_str(), candidates)
            })
            .collect()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn candidates(&self) -> &[(String, String)] {
        &self.candidates
    }
}

/// A candidate whose constraint must come from the version lookup
fn is_unconstrained(name: &str, constraint: &str) -> bool {
    let constraint = constraint.trim();
    constraint.is_empty() || constraint == "*" || constraint.eq_ignore_ascii_case(name)
}

/// Constraint for a version already on disk
///
/// Plain numeric versions become caret ranges; anything else is kept.
fn installed_constraint(version: &str) -> String {
    let version = normalize_version(version);
    if !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.') {
        format!("^{version}")
    } else {
        version
    }
}

/// Orchestrates requirement-group selection for one invoking package
pub struct QuestionOrchestrator<'a> {
    session: InstallSession<'a>,
    lookup: &'a dyn VersionLookup,
    prompt: &'a mut dyn Prompt,
    ledger: &'a Lock,
    scan: UninstallScan,
    prompt_attempts: Option<usize>,
    selected: BTreeMap<String, String>,
    status: i32,
}

impl<'a> QuestionOrchestrator<'a> {
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
            selected: BTreeMap::new(),
            status: 0,
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

    /// Names and constraints selected in this run
    pub fn packages_to_install(&self) -> &BTreeMap<String, String> {
        &self.selected
    }

    /// Installer status of the last run, 0 when the installer did not run
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Answer the groups of `package_name` and install the selections
    ///
    /// Without an attended user nothing is installed. Records are empty when
    /// the installer fails; see [`QuestionOrchestrator::status`].
    pub fn install(
        &mut self,
        package_name: &str,
        groups: &[RequirementGroup],
    ) -> Result<Vec<PackageRecord>> {
        self.status = 0;

        if !self.prompt.is_interactive() {
            tracing::info!("Skipping optional dependencies of {package_name} without interaction");
            return Ok(Vec::new());
        }

        let installed = self.session.installed()?;
        let mut delta = ManifestDelta::default();

        for group in groups {
            let answered = group.candidates().iter().find(|(name, _)| {
                self.session.root().contains(name) || self.is_selected(name)
            });
            if let Some((name, _)) = answered {
                tracing::debug!("'{}' is answered by {name}", group.question());
                continue;
            }

            let (name, constraint) = match find_installed(group, &installed) {
                Some(package) => {
                    let constraint = installed_constraint(&package.version);
                    tracing::info!("Using installed {} {constraint}", package.name);
                    (package.name.clone(), constraint)
                }
                None => self.ask(group)?,
            };

            delta.add(Section::Require, &name, &constraint);
            self.selected.insert(name, constraint);
        }

        if delta.is_empty() {
            return Ok(Vec::new());
        }

        self.session.apply(&delta)?;
        self.session.set_whitelist(delta.added_names());
        self.execute(package_name)
    }

    /// Remove dependencies selected for `package_name`
    ///
    /// The invoking package's own requirements join the removal whitelist
    /// before widening.
    pub fn uninstall(&mut self, package_name: &str, dependencies: &[String]) -> Result<Vec<PackageRecord>> {
        self.status = 0;
        if dependencies.is_empty() {
            return Ok(Vec::new());
        }

        let mut delta = ManifestDelta::default();
        for name in dependencies {
            delta.remove(Section::Require, name);
        }

        let mut installed = self.session.installed()?;
        let mut requested = delta.removed_names();
        if let Some(invoking) = installed
            .iter()
            .find(|package| package.name.eq_ignore_ascii_case(package_name))
        {
            requested.extend(invoking.requires.keys().cloned());
        }
        installed.retain(|package| !package.name.eq_ignore_ascii_case(package_name));

        let whitelist = whitelist::widen(&requested, &installed, self.scan);

        self.session.apply(&delta)?;
        self.session.set_whitelist(whitelist);
        self.execute(package_name)
    }

    fn execute(&mut self, package_name: &str) -> Result<Vec<PackageRecord>> {
        let (status, operations) = self.session.execute()?;
        self.status = status;
        if status != 0 {
            return Ok(Vec::new());
        }

        let mut resolver = OperationsResolver::new(self.ledger, self.session.settings().vendor_dir.clone());
        resolver.set_parent_package_name(package_name);
        resolver.resolve(&operations)
    }

    fn is_selected(&self, name: &str) -> bool {
        self.selected.keys().any(|selected| selected.eq_ignore_ascii_case(name))
    }

    /// Numbered choice between the candidates of `group`
    fn ask(&mut self, group: &RequirementGroup) -> Result<(String, String)> {
        let minimum_stability = self.session.settings().minimum_stability;

        let mut choices = Vec::with_capacity(group.candidates().len());
        for (name, constraint) in group.candidates() {
            let constraint = if is_unconstrained(name, constraint) {
                version::resolve_constraint(self.lookup, name, minimum_stability)?
            } else {
                constraint.clone()
            };
            choices.push((name.clone(), constraint));
        }

        self.prompt.show(group.question());
        for (index, (name, constraint)) in choices.iter().enumerate() {
            self.prompt.show(&format!("  [{index}] {name} : {constraint}"));
        }

        let count = choices.len();
        let index = prompt::ask_until(
            &mut *self.prompt,
            "  Make your selection: ",
            |answer| answer.trim().parse::<usize>().ok().filter(|index| *index < count),
            self.prompt_attempts,
        )?;

        // ask_until only accepts indices below `count`
        Ok(choices.swap_remove(index))
    }
}

fn find_installed<'p>(group: &RequirementGroup, installed: &'p [PackageSnapshot]) -> Option<&'p PackageSnapshot> {
    group.candidates().iter().find_map(|(name, _)| {
        installed
            .iter()
            .find(|package| package.name.eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests;
