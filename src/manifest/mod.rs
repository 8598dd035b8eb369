//! Project manifest handling
//!
//! The manifest is a JSON document. Only its `require` / `require-dev`
//! sections and a few host settings are interpreted; every other key is
//! carried through untouched, in its original order.

pub mod root;
pub mod store;

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{self, Result};
use crate::version::Stability;

pub use root::{RootLink, RootRequirements};
pub use store::{JsonManifestFile, ManifestStore};

/// Default manifest filename
pub const MANIFEST_FILE: &str = "manifest.json";

/// Requirement section of the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Require,
    RequireDev,
}

impl Section {
    /// Key of the section in the manifest document
    pub fn key(self) -> &'static str {
        match self {
            Section::Require => "require",
            Section::RequireDev => "require-dev",
        }
    }
}

/// Settings the host project declares in its manifest
#[derive(Debug, Clone, PartialEq)]
pub struct HostSettings {
    pub minimum_stability: Stability,
    pub sort_packages: bool,
    pub vendor_dir: PathBuf,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            minimum_stability: Stability::Stable,
            sort_packages: false,
            vendor_dir: PathBuf::from("vendor"),
        }
    }
}

/// Parsed manifest document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    document: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest content; `origin` is only used in error messages
    pub fn from_json(origin: &str, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| error::manifest_parse_failed(origin, e.to_string()))?;

        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(error::manifest_parse_failed(
                origin,
                "expected a JSON object at the top level",
            )),
        }
    }

    /// Render with four-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        use serde::Serialize;

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.document.serialize(&mut serializer)?;
        buffer.push(b'\n');

        String::from_utf8(buffer).map_err(|e| crate::error::RequisiteError::IoError {
            message: e.to_string(),
        })
    }

    /// Name/constraint pairs of a section, in document order
    pub fn links(&self, section: Section) -> Vec<(String, String)> {
        self.document
            .get(section.key())
            .and_then(Value::as_object)
            .map(|links| {
                links
                    .iter()
                    .map(|(name, constraint)| {
                        let constraint = constraint.as_str().unwrap_or("*").to_string();
                        (name.clone(), constraint)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Add or replace a requirement
    ///
    /// An existing entry (case-insensitive) keeps its position; a new one is
    /// appended. With `sort_packages` the section is sorted afterwards.
    pub fn add_link(&mut self, section: Section, name: &str, constraint: &str, sort_packages: bool) {
        let mut links = self.section(section);

        let existing = links
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned();
        let key = existing.unwrap_or_else(|| name.to_string());
        links.insert(key, Value::String(constraint.to_string()));

        if sort_packages {
            let mut entries: Vec<(String, Value)> = links.into_iter().collect();
            entries.sort_by_key(|(key, _)| key.to_lowercase());
            links = entries.into_iter().collect();
        }

        self.document
            .insert(section.key().to_string(), Value::Object(links));
    }

    /// Remove a requirement (case-insensitive); returns whether one was removed
    pub fn remove_link(&mut self, section: Section, name: &str) -> bool {
        let Some(Value::Object(links)) = self.document.get_mut(section.key()) else {
            return false;
        };

        let existing = links
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned();
        match existing {
            Some(key) => links.shift_remove(&key).is_some(),
            None => false,
        }
    }

    /// Host settings (`minimum-stability`, `config.sort-packages`, `config.vendor-dir`)
    pub fn settings(&self) -> HostSettings {
        let defaults = HostSettings::default();
        let config = self.document.get("config");

        let minimum_stability = self
            .document
            .get("minimum-stability")
            .and_then(Value::as_str)
            .map(|raw| {
                raw.parse().unwrap_or_else(|_| {
                    tracing::warn!("unknown minimum-stability '{raw}', using stable");
                    Stability::Stable
                })
            })
            .unwrap_or(defaults.minimum_stability);

        let sort_packages = config
            .and_then(|c| c.get("sort-packages"))
            .and_then(Value::as_bool)
            .unwrap_or(defaults.sort_packages);

        let vendor_dir = config
            .and_then(|c| c.get("vendor-dir"))
            .and_then(Value::as_str)
            .map(|dir| PathBuf::from(dir.trim_end_matches('/')))
            .unwrap_or(defaults.vendor_dir);

        HostSettings {
            minimum_stability,
            sort_packages,
            vendor_dir,
        }
    }

    fn section(&self, section: Section) -> Map<String, Value> {
        self.document
            .get(section.key())
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}
