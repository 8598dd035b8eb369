//! Tool configuration (requisite.yaml)
//!
//! ```yaml
//! manifest: manifest.json
//! lockfile: manifest.lock
//! ledger: requisite.lock
//! catalog: repository.json
//! installer:
//!   program: composer
//!   args: [update, --with-dependencies]
//! uninstall-scan: single-pass
//! prompt-attempts: 3
//! ```
//!
//! The file is optional and every field has a default. Relative paths are
//! relative to the project directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RequisiteError, Result};
use crate::installer::index::HOST_LOCKFILE;
use crate::ledger::LEDGER_FILE;
use crate::manifest::MANIFEST_FILE;
use crate::operations::UninstallScan;
use crate::version::catalog::CATALOG_FILE;

/// Tool config filename
pub const CONFIG_FILE: &str = "requisite.yaml";

/// Host installer command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    pub program: String,
    /// Arguments placed before the whitelisted names
    pub args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "composer".to_string(),
            args: vec!["update".to_string(), "--with-dependencies".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ToolConfig {
    pub manifest: PathBuf,
    pub lockfile: PathBuf,
    pub ledger: PathBuf,
    pub catalog: PathBuf,
    pub installer: InstallerConfig,
    pub uninstall_scan: UninstallScan,
    /// Bound on answers per question; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_attempts: Option<usize>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(MANIFEST_FILE),
            lockfile: PathBuf::from(HOST_LOCKFILE),
            ledger: PathBuf::from(LEDGER_FILE),
            catalog: PathBuf::from(CATALOG_FILE),
            installer: InstallerConfig::default(),
            uninstall_scan: UninstallScan::default(),
            prompt_attempts: None,
        }
    }
}

impl ToolConfig {
    /// Load `requisite.yaml` from `project_dir`, or the defaults when absent
    pub fn load(project_dir: &Path) -> Result<Self> {
        load_config_file(project_dir, CONFIG_FILE, Self::default(), |path, content| {
            Self::from_yaml(path, content)
        })
    }

    pub fn from_yaml(path: &Path, content: &str) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| RequisiteError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Generic helper to load a config file with default fallback
fn load_config_file<F, T>(dir: &Path, filename: &str, default: T, parser: F) -> Result<T>
where
    F: FnOnce(&Path, &str) -> Result<T>,
{
    let path = dir.join(filename);

    if !path.exists() {
        return Ok(default);
    }

    let content = fs::read_to_string(&path).map_err(|e| RequisiteError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "loaded config");
    parser(&path, &content)
}
