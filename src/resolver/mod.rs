//! Operations resolver
//!
//! Classifies the raw operations captured from an installer run into
//! [`PackageRecord`]s, one per distinct lowercase package name:
//!
//! 1. Updates are described by their target package.
//! 2. A later operation for the same name replaces the earlier record in
//!    place, so output order is the order of first occurrence.
//! 3. An uninstall is never replaced by a later install or update of the
//!    same name within one batch.
//! 4. When a parent package name is set, every record is stamped with it.
//!
//! Resolution reads the ledger but never writes it and performs no I/O.

pub mod package;

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{self, Result};
use crate::installer::RawOperation;
use crate::ledger::{Lock, PACKAGES_KEY};

pub use package::{OperationKind, PackageRecord};

/// Turns raw installer operations into package records
#[derive(Debug)]
pub struct OperationsResolver<'a> {
    ledger: &'a Lock,
    vendor_path: PathBuf,
    parent_package_name: Option<String>,
}

impl<'a> OperationsResolver<'a> {
    pub fn new(ledger: &'a Lock, vendor_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger,
            vendor_path: vendor_path.into(),
            parent_package_name: None,
        }
    }

    /// Mark the records of the next resolution as extras of `name`
    pub fn set_parent_package_name(&mut self, name: impl Into<String>) {
        self.parent_package_name = Some(name.into());
    }

    /// Resolve operations into one record per package name
    pub fn resolve(&self, operations: &[RawOperation]) -> Result<Vec<PackageRecord>> {
        let mut records: Vec<PackageRecord> = Vec::with_capacity(operations.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for operation in operations {
            let record = self.to_record(operation)?;

            match positions.get(&record.name) {
                Some(&position) => {
                    let existing = &mut records[position];
                    if existing.operation == OperationKind::Uninstall
                        && record.operation != OperationKind::Uninstall
                    {
                        tracing::debug!(
                            package = %record.name,
                            "keeping uninstall over later {}",
                            record.operation
                        );
                        continue;
                    }
                    *existing = record;
                }
                None => {
                    positions.insert(record.name.clone(), records.len());
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    fn to_record(&self, operation: &RawOperation) -> Result<PackageRecord> {
        let (kind, package) = match operation {
            RawOperation::Install(package) => (OperationKind::Install, package),
            RawOperation::Update { target, .. } => (OperationKind::Update, target),
            RawOperation::Uninstall(package) => (OperationKind::Uninstall, package),
        };

        if package.name.trim().is_empty() {
            return Err(error::invalid_operation(format!(
                "{kind} operation without package name"
            )));
        }

        let name = package.name.to_lowercase();
        let config = match kind {
            OperationKind::Uninstall => self
                .recorded_config(&name)
                .unwrap_or_else(|| package.directives()),
            OperationKind::Install | OperationKind::Update => package.directives(),
        };

        Ok(PackageRecord {
            install_path: self.vendor_path.join(&package.name),
            name,
            pretty_name: package.name.clone(),
            version: normalize_version(&package.version),
            pretty_version: package.version.clone(),
            package_type: package.package_type.clone(),
            operation: kind,
            requires: package.requires.clone(),
            dev_requires: package.dev_requires.clone(),
            parent_package_name: self.parent_package_name.clone(),
            config,
        })
    }

    /// Configuration recorded when the package was installed; its files may be gone now
    fn recorded_config(&self, name: &str) -> Option<Value> {
        self.ledger
            .get_mapping(PACKAGES_KEY)
            .get(name)
            .and_then(|details| details.get("config"))
            .cloned()
    }
}

/// Strip a leading `v` from a version string
pub fn normalize_version(version: &str) -> String {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
        .to_string()
}
