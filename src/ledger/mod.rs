//! Lock ledger (requisite.lock)
//!
//! The ledger is this crate's own record of what has already been configured
//! in a project: installed package metadata, classmaps, optional selections and
//! free-form metadata. It is distinct from the host package manager's lockfile.
//!
//! ## Lifecycle
//!
//! ```ignore
//! let mut lock = Lock::load(&project.join(LEDGER_FILE))?;
//!
//! lock.add(CLASSMAP_KEY, classmap);
//! lock.remove(PACKAGES_KEY, Some("vendor/old"));
//!
//! // Nothing reaches the disk until the unit of work is complete:
//! lock.write()?;
//! ```
//!
//! Mutations only touch the in-memory ledger; [`Lock::write`] flushes it.

pub mod record;
pub mod value;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{self, RequisiteError, Result};

pub use record::{optional_selection, record_optional_selection, record_packages};
pub use value::LedgerValue;

/// Default ledger filename
pub const LEDGER_FILE: &str = "requisite.lock";

/// Key holding the generated-file notice
pub const README_KEY: &str = "@readme";

/// Key holding installed package metadata (name -> details)
pub const PACKAGES_KEY: &str = "packages";

/// Key holding installed package classmaps (name -> install path)
pub const CLASSMAP_KEY: &str = "classmap";

/// Key holding optional dependencies selected per invoking package
pub const OPTIONAL_KEY: &str = "optional";

const README: [&str; 2] = [
    "This file locks the requisite information of your project to a known state",
    "This file is @generated automatically",
];

/// The persistent key/value ledger
#[derive(Debug, Clone)]
pub struct Lock {
    /// Backing file
    path: PathBuf,
    /// Entries in insertion order
    entries: Map<String, Value>,
}

impl Lock {
    /// Create an empty ledger backed by `path`, carrying only the readme entry
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mut entries = Map::new();
        entries.insert(
            README_KEY.to_string(),
            Value::Array(README.iter().map(|l| Value::String((*l).to_string())).collect()),
        );
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Load the ledger from `path`, or start an empty one when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(path).map_err(|e| RequisiteError::LedgerReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(path, &content)
    }

    /// Parse ledger content that is backed by `path`
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| error::ledger_parse_failed(path.display().to_string(), e.to_string()))?;

        let Value::Object(entries) = value else {
            return Err(error::ledger_parse_failed(
                path.display().to_string(),
                "expected a JSON object at the top level",
            ));
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a key is present
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored value for `key`, if any
    pub fn get(&self, key: &str) -> Option<LedgerValue> {
        self.entries.get(key).cloned().map(LedgerValue::from)
    }

    /// Stored mapping for `key`, or an empty mapping when absent or not a mapping
    pub fn get_mapping(&self, key: &str) -> Map<String, Value> {
        match self.entries.get(key) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Stored sequence for `key`, or an empty sequence when absent or not a sequence
    pub fn get_sequence(&self, key: &str) -> Vec<Value> {
        match self.entries.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Upsert `key`; mappings merge shallowly into a stored mapping, anything else overwrites
    pub fn add(&mut self, key: &str, value: impl Into<LedgerValue>) {
        let incoming = value.into();
        let merged = match self.entries.get(key).cloned() {
            Some(stored) => LedgerValue::from(stored).merge(incoming),
            None => incoming,
        };
        self.entries.insert(key.to_string(), merged.into());
    }

    /// Remove a whole key, or only `sub_key` when the stored value is a mapping
    pub fn remove(&mut self, key: &str, sub_key: Option<&str>) {
        match sub_key {
            None => {
                self.entries.shift_remove(key);
            }
            Some(sub_key) => {
                if let Some(Value::Object(map)) = self.entries.get_mut(key) {
                    map.shift_remove(sub_key);
                }
            }
        }
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Render the ledger as pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| error::ledger_write_failed(self.path.display().to_string(), e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    /// Flush the in-memory ledger to its backing file
    ///
    /// Uses an atomic write (temp file + rename) so that readers never
    /// observe a partially written ledger. Writing twice without intervening
    /// mutation produces byte-identical files.
    pub fn write(&self) -> Result<()> {
        let content = self.to_json()?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| LEDGER_FILE.to_string());
        let tmp_path = self.path.with_file_name(format!("{file_name}.tmp"));

        fs::write(&tmp_path, &content)
            .map_err(|e| error::ledger_write_failed(tmp_path.display().to_string(), e.to_string()))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            error::ledger_write_failed(self.path.display().to_string(), e.to_string())
        })?;

        tracing::debug!(path = %self.path.display(), "ledger written");
        Ok(())
    }
}
