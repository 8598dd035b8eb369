//! Package records produced by the operations resolver

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What an operation does to a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Install,
    Update,
    Uninstall,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::Install => "install",
            OperationKind::Update => "update",
            OperationKind::Uninstall => "uninstall",
        };
        f.write_str(label)
    }
}

/// Typed, deduplicated view of one package touched by an installer run
///
/// Records are immutable once resolved; the resolver is the only producer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageRecord {
    pub(crate) name: String,
    pub(crate) pretty_name: String,
    pub(crate) version: String,
    pub(crate) pretty_version: String,
    pub(crate) package_type: String,
    pub(crate) operation: OperationKind,
    pub(crate) requires: BTreeMap<String, String>,
    pub(crate) dev_requires: BTreeMap<String, String>,
    pub(crate) parent_package_name: Option<String>,
    pub(crate) install_path: PathBuf,
    pub(crate) config: Value,
}

impl PackageRecord {
    /// Lowercase unique name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as declared by the package
    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    /// Normalized version (no leading `v`)
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn pretty_version(&self) -> &str {
        &self.pretty_version
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn requires(&self) -> &BTreeMap<String, String> {
        &self.requires
    }

    pub fn dev_requires(&self) -> &BTreeMap<String, String> {
        &self.dev_requires
    }

    /// Package whose optional dependency groups pulled this one in
    pub fn parent_package_name(&self) -> Option<&str> {
        self.parent_package_name.as_deref()
    }

    /// Whether this package is an optional extra rather than a top-level dependency
    pub fn is_optional_extra(&self) -> bool {
        self.parent_package_name.is_some()
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Opaque configuration directives for downstream configurators
    pub fn config(&self) -> &Value {
        &self.config
    }
}
