//! Boundary to the host package manager
//!
//! The host package manager owns dependency-graph solving and file
//! installation. This module describes what the orchestrators need from it:
//! - [`InstalledIndex`]: the packages currently on disk
//! - [`ScopedInstaller`]: an install/update run restricted to a whitelist
//!
//! and ships one implementation of each ([`LockfileIndex`], [`CommandInstaller`]).

pub mod capture;
pub mod command;
pub mod index;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::manifest::RootRequirements;

pub use capture::OperationCapture;
pub use command::CommandInstaller;
pub use index::LockfileIndex;

/// Key under a package's `extra` payload holding its requisite directives
pub const EXTRA_KEY: &str = "requisite";

fn default_package_type() -> String {
    "library".to_string()
}

/// A package as the host package manager describes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSnapshot {
    pub name: String,
    pub version: String,
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,
    #[serde(rename = "require", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, String>,
    #[serde(rename = "require-dev", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_requires: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub extra: Value,
}

impl PackageSnapshot {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package_type: default_package_type(),
            requires: BTreeMap::new(),
            dev_requires: BTreeMap::new(),
            extra: Value::Null,
        }
    }

    #[must_use]
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    #[must_use]
    pub fn with_require(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.requires.insert(name.into(), constraint.into());
        self
    }

    #[must_use]
    pub fn with_dev_require(
        mut self,
        name: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        self.dev_requires.insert(name.into(), constraint.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = extra;
        self
    }

    /// The package's own requisite directives (`extra.requisite`), or null
    pub fn directives(&self) -> Value {
        self.extra.get(EXTRA_KEY).cloned().unwrap_or(Value::Null)
    }

    /// Whether `name` appears in this package's requires or dev-requires
    pub fn depends_on(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.requires
            .keys()
            .chain(self.dev_requires.keys())
            .any(|dep| dep.to_lowercase() == name)
    }
}

/// One low-level operation emitted by an installer run
#[derive(Debug, Clone, PartialEq)]
pub enum RawOperation {
    Install(PackageSnapshot),
    Update {
        initial: PackageSnapshot,
        target: PackageSnapshot,
    },
    Uninstall(PackageSnapshot),
}

impl RawOperation {
    /// The package this operation leaves behind (the target for updates)
    pub fn package(&self) -> &PackageSnapshot {
        match self {
            RawOperation::Install(package) | RawOperation::Uninstall(package) => package,
            RawOperation::Update { target, .. } => target,
        }
    }
}

/// Packages currently installed by the host package manager
pub trait InstalledIndex {
    /// All installed packages, reflecting the host lock state on disk
    fn list(&self) -> Result<Vec<PackageSnapshot>>;
}

/// An installer run restricted to a whitelist of package names
///
/// Implementations touch only whitelisted packages plus their newly required
/// transitive dependencies. While capture mode is active every operation the
/// run performs is recorded and handed back by [`ScopedInstaller::end_capture`].
pub trait ScopedInstaller {
    /// Run the installer and return its exit status
    fn run(&mut self, root: &RootRequirements, whitelist: &[String]) -> Result<i32>;

    /// Start recording operations
    fn begin_capture(&mut self);

    /// Stop recording and return what was recorded since [`ScopedInstaller::begin_capture`]
    fn end_capture(&mut self) -> Vec<RawOperation>;
}
