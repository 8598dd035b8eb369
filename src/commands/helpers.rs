//! Command helper utilities

use std::path::{Path, PathBuf};

use console::Style;

use crate::config::ToolConfig;
use crate::error::{RequisiteError, Result};
use crate::installer::{CommandInstaller, LockfileIndex};
use crate::ledger::Lock;
use crate::manifest::JsonManifestFile;
use crate::resolver::{OperationKind, PackageRecord};
use crate::version::Catalog;

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| RequisiteError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// A project directory and its tool configuration
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: ToolConfig,
}

impl Project {
    pub fn open(workspace: Option<PathBuf>) -> Result<Self> {
        let root = resolve_workspace_path(workspace)?;
        let config = ToolConfig::load(&root)?;
        tracing::debug!(root = %root.display(), "opened project");
        Ok(Self { root, config })
    }

    /// `relative` resolved against the project directory
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn manifest_store(&self) -> JsonManifestFile {
        JsonManifestFile::new(self.path(&self.config.manifest))
    }

    pub fn index(&self) -> LockfileIndex {
        LockfileIndex::new(self.path(&self.config.lockfile))
    }

    pub fn installer(&self) -> CommandInstaller {
        let installer = &self.config.installer;
        CommandInstaller::new(
            installer.program.clone(),
            installer.args.clone(),
            self.root.clone(),
            self.index(),
        )
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.path(&self.config.catalog))
    }

    pub fn ledger(&self) -> Result<Lock> {
        Lock::load(&self.path(&self.config.ledger))
    }
}

/// Print one line per resolved package
pub fn print_records(records: &[PackageRecord]) {
    for record in records {
        let label = match record.operation() {
            OperationKind::Install => Style::new().green().apply_to("Installed"),
            OperationKind::Update => Style::new().cyan().apply_to("Updated"),
            OperationKind::Uninstall => Style::new().yellow().apply_to("Removed"),
        };
        println!(
            "  {label} {} {}",
            Style::new().bold().apply_to(record.pretty_name()),
            Style::new().dim().apply_to(format!("({})", record.pretty_version()))
        );
    }
}
