//! Installed-package index backed by the host lockfile

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{InstalledIndex, PackageSnapshot};
use crate::error::{RequisiteError, Result};

/// Default host lockfile filename
pub const HOST_LOCKFILE: &str = "manifest.lock";

#[derive(Debug, Default, Deserialize)]
struct HostLockfile {
    #[serde(default)]
    packages: Vec<PackageSnapshot>,
    #[serde(rename = "packages-dev", default)]
    dev_packages: Vec<PackageSnapshot>,
}

/// Reads installed packages from the host package manager's lockfile
///
/// The file is re-read on every [`InstalledIndex::list`] call so the index
/// always reflects the lock state on disk. A missing file means nothing is
/// installed yet.
#[derive(Debug, Clone)]
pub struct LockfileIndex {
    path: PathBuf,
}

impl LockfileIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Installed package named `name` (case-insensitive)
    pub fn find(&self, name: &str) -> Result<Option<PackageSnapshot>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|package| package.name.eq_ignore_ascii_case(name)))
    }
}

impl InstalledIndex for LockfileIndex {
    fn list(&self) -> Result<Vec<PackageSnapshot>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| RequisiteError::IndexReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let lockfile: HostLockfile =
            serde_json::from_str(&content).map_err(|e| RequisiteError::IndexParseFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut packages = lockfile.packages;
        packages.extend(lockfile.dev_packages);
        Ok(packages)
    }
}
