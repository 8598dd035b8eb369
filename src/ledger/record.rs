//! Ledger bookkeeping for resolved packages
//!
//! These helpers only mutate the in-memory ledger. The caller decides when
//! the unit of work is complete and calls [`Lock::write`](super::Lock::write).

use serde_json::{Map, Value};

use super::{CLASSMAP_KEY, Lock, OPTIONAL_KEY, PACKAGES_KEY};
use crate::resolver::{OperationKind, PackageRecord};

/// Apply one resolution pass to the `packages` and `classmap` entries
pub fn record_packages(lock: &mut Lock, records: &[PackageRecord]) {
    for record in records {
        match record.operation() {
            OperationKind::Install | OperationKind::Update => {
                let mut packages = Map::new();
                packages.insert(record.name().to_string(), package_details(record));
                lock.add(PACKAGES_KEY, packages);

                let mut classmap = Map::new();
                classmap.insert(
                    record.name().to_string(),
                    Value::String(record.install_path().display().to_string()),
                );
                lock.add(CLASSMAP_KEY, classmap);
            }
            OperationKind::Uninstall => {
                lock.remove(PACKAGES_KEY, Some(record.name()));
                lock.remove(CLASSMAP_KEY, Some(record.name()));
            }
        }
    }
}

fn package_details(record: &PackageRecord) -> Value {
    let mut details = Map::new();
    details.insert(
        "version".to_string(),
        Value::String(record.pretty_version().to_string()),
    );
    details.insert(
        "type".to_string(),
        Value::String(record.package_type().to_string()),
    );
    if let Some(parent) = record.parent_package_name() {
        details.insert("parent".to_string(), Value::String(parent.to_string()));
    }
    if !record.config().is_null() {
        details.insert("config".to_string(), record.config().clone());
    }
    Value::Object(details)
}

/// Remember which optional packages were selected for `package`
pub fn record_optional_selection(lock: &mut Lock, package: &str, selected: &[String]) {
    if selected.is_empty() {
        lock.remove(OPTIONAL_KEY, Some(package));
        return;
    }

    let mut optional = Map::new();
    optional.insert(
        package.to_string(),
        Value::Array(selected.iter().cloned().map(Value::String).collect()),
    );
    lock.add(OPTIONAL_KEY, optional);
}

/// Optional packages previously selected for `package`
pub fn optional_selection(lock: &Lock, package: &str) -> Vec<String> {
    lock.get_mapping(OPTIONAL_KEY)
        .get(package)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
