//! Test fixtures and fakes shared by the unit tests.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_project, RecordingInstaller, ScriptedPrompt, StaticIndex, StaticLookup};
//!
//! #[test]
//! fn my_test() {
//!     let (temp, mut store) = create_project(r#"{"require": {}}"#);
//!     let mut installer = RecordingInstaller::new(0);
//!     let index = StaticIndex::default();
//!     let mut prompt = ScriptedPrompt::non_interactive();
//!     let lookup = StaticLookup::default().with("vendor/pkg", "2.3.1");
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use crate::error::{RequisiteError, Result};
use crate::installer::{InstalledIndex, PackageSnapshot, RawOperation, ScopedInstaller};
use crate::manifest::{JsonManifestFile, RootRequirements};
use crate::prompt::Prompt;
use crate::resolver::{OperationKind, PackageRecord};
use crate::version::{Stability, VersionLookup};

/// Absolute base for temp directories, never under the working directory
fn temp_dir_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Temp project holding `manifest.json` with `content`
///
/// # Panics
///
/// Panics if the manifest cannot be written.
#[must_use]
pub fn create_project(content: &str) -> (TempDir, JsonManifestFile) {
    let temp = create_temp_dir();
    let path = temp.path().join("manifest.json");
    fs::write(&path, content).expect("Failed to write manifest");
    (temp, JsonManifestFile::new(path))
}

/// Package record as a resolution pass would produce it
#[must_use]
pub fn record(name: &str, version: &str, operation: OperationKind) -> PackageRecord {
    PackageRecord {
        name: name.to_lowercase(),
        pretty_name: name.to_string(),
        version: version.to_string(),
        pretty_version: version.to_string(),
        package_type: "library".to_string(),
        operation,
        requires: BTreeMap::new(),
        dev_requires: BTreeMap::new(),
        parent_package_name: None,
        install_path: PathBuf::from("vendor").join(name),
        config: Value::Null,
    }
}

/// Prompt answering from a script; `None` once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    interactive: bool,
    answers: VecDeque<String>,
    asked: Vec<String>,
    shown: Vec<String>,
    interactivity_checks: Cell<usize>,
}

impl ScriptedPrompt {
    pub fn new<'s>(answers: impl IntoIterator<Item = &'s str>) -> Self {
        Self {
            interactive: true,
            answers: answers.into_iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Interactive, but aborts on the first question
    pub fn unanswered() -> Self {
        Self {
            interactive: true,
            ..Self::default()
        }
    }

    pub fn non_interactive() -> Self {
        Self::default()
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Lines shown so far
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// How often the interactivity flag was read
    pub fn interactivity_checks(&self) -> usize {
        self.interactivity_checks.get()
    }
}

impl Prompt for ScriptedPrompt {
    fn is_interactive(&self) -> bool {
        self.interactivity_checks.set(self.interactivity_checks.get() + 1);
        self.interactive
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    fn show(&mut self, line: &str) {
        self.shown.push(line.to_string());
    }
}

/// Version lookup over a fixed table
#[derive(Debug, Default)]
pub struct StaticLookup {
    versions: BTreeMap<String, String>,
    lookups: RefCell<Vec<String>>,
}

impl StaticLookup {
    #[must_use]
    pub fn with(mut self, name: &str, version: &str) -> Self {
        self.versions.insert(name.to_lowercase(), version.to_string());
        self
    }

    /// Names looked up so far
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl VersionLookup for StaticLookup {
    fn best_candidate(&self, name: &str, _minimum_stability: Stability) -> Result<Option<String>> {
        self.lookups.borrow_mut().push(name.to_string());
        Ok(self.versions.get(&name.to_lowercase()).cloned())
    }
}

/// Installed index over a fixed package list
#[derive(Debug, Default)]
pub struct StaticIndex {
    packages: Vec<PackageSnapshot>,
}

impl StaticIndex {
    pub fn new(packages: Vec<PackageSnapshot>) -> Self {
        Self { packages }
    }
}

impl InstalledIndex for StaticIndex {
    fn list(&self) -> Result<Vec<PackageSnapshot>> {
        Ok(self.packages.clone())
    }
}

/// Installer returning a scripted status and emitting scripted operations
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    status: i32,
    fail_to_start: bool,
    emitted: Vec<RawOperation>,
    capturing: bool,
    captured: Vec<RawOperation>,
    runs: Vec<Vec<String>>,
    roots: Vec<RootRequirements>,
}

impl RecordingInstaller {
    pub fn new(status: i32) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn failing_to_start() -> Self {
        Self {
            fail_to_start: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn emitting(mut self, operations: Vec<RawOperation>) -> Self {
        self.emitted = operations;
        self
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Whitelists of every run so far
    pub fn runs(&self) -> &[Vec<String>] {
        &self.runs
    }

    /// Root requirements handed to every run so far
    pub fn roots(&self) -> &[RootRequirements] {
        &self.roots
    }
}

impl ScopedInstaller for RecordingInstaller {
    fn run(&mut self, root: &RootRequirements, whitelist: &[String]) -> Result<i32> {
        if self.fail_to_start {
            return Err(RequisiteError::InstallerSpawnFailed {
                program: "recording".to_string(),
                reason: "scripted failure".to_string(),
            });
        }

        self.runs.push(whitelist.to_vec());
        self.roots.push(root.clone());
        if self.capturing {
            self.captured.extend(self.emitted.iter().cloned());
        }
        Ok(self.status)
    }

    fn begin_capture(&mut self) {
        self.capturing = true;
        self.captured.clear();
    }

    fn end_capture(&mut self) -> Vec<RawOperation> {
        self.capturing = false;
        std::mem::take(&mut self.captured)
    }
}
