//! Repository catalog (repository.json)
//!
//! A local list of published versions per package:
//!
//! ```json
//! { "packages": { "vendor/pkg": ["1.0.0", "v2.3.1", "3.0.0-beta.1", "dev-main"] } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Stability, VersionLookup};
use crate::error::{RequisiteError, Result};

/// Default catalog filename
pub const CATALOG_FILE: &str = "repository.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    packages: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Load a catalog; a missing file is an empty catalog
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no catalog, lookups will find nothing");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| RequisiteError::CatalogReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(path, &content)
    }

    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RequisiteError::CatalogParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Published versions of `name` (case-insensitive)
    pub fn versions(&self, name: &str) -> &[String] {
        self.packages
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, versions)| versions.as_slice())
            .unwrap_or_default()
    }
}

/// Parse a published version, padding missing minor/patch parts
fn parse_version(raw: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    if let Ok(version) = semver::Version::parse(trimmed) {
        return Some(version);
    }

    let (core, rest) = match trimmed.find(['-', '+']) {
        Some(index) => trimmed.split_at(index),
        None => (trimmed, ""),
    };
    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }
    semver::Version::parse(&format!("{}{rest}", parts.join("."))).ok()
}

impl VersionLookup for Catalog {
    fn best_candidate(&self, name: &str, minimum_stability: Stability) -> Result<Option<String>> {
        let best = self
            .versions(name)
            .iter()
            .filter(|raw| Stability::of_version(raw) >= minimum_stability)
            .filter(|raw| Stability::of_version(raw) != Stability::Dev)
            .filter_map(|raw| parse_version(raw).map(|parsed| (parsed, raw)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, raw)| raw.clone());

        tracing::debug!(package = name, %minimum_stability, candidate = ?best, "catalog lookup");
        Ok(best)
    }
}
