//! Root requirement index
//!
//! Snapshot of the host project's own requirements, keyed by lowercase
//! package name. It changes only through the orchestrators' manifest
//! mutation path.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Manifest, Section};

/// One root requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootLink {
    /// Name as written in the manifest
    pub name: String,
    pub constraint: String,
}

/// The project's mandatory and dev requirements
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootRequirements {
    #[serde(rename = "require")]
    requires: BTreeMap<String, RootLink>,
    #[serde(rename = "require-dev")]
    dev_requires: BTreeMap<String, RootLink>,
}

impl RootRequirements {
    /// Build the index from a manifest
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut root = Self::default();
        for section in [Section::Require, Section::RequireDev] {
            for (name, constraint) in manifest.links(section) {
                root.add(section, &name, &constraint);
            }
        }
        root
    }

    /// Whether either section declares `name` (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.requires.contains_key(&key) || self.dev_requires.contains_key(&key)
    }

    /// Constraint declared for `name`, mandatory section first
    pub fn constraint(&self, name: &str) -> Option<&str> {
        let key = name.to_lowercase();
        self.requires
            .get(&key)
            .or_else(|| self.dev_requires.get(&key))
            .map(|link| link.constraint.as_str())
    }

    pub fn add(&mut self, section: Section, name: &str, constraint: &str) {
        self.section_mut(section).insert(
            name.to_lowercase(),
            RootLink {
                name: name.to_string(),
                constraint: constraint.to_string(),
            },
        );
    }

    pub fn remove(&mut self, section: Section, name: &str) {
        self.section_mut(section).remove(&name.to_lowercase());
    }

    pub fn links(&self, section: Section) -> impl Iterator<Item = &RootLink> {
        match section {
            Section::Require => self.requires.values(),
            Section::RequireDev => self.dev_requires.values(),
        }
    }

    pub fn len(&self) -> usize {
        self.requires.len() + self.dev_requires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn section_mut(&mut self, section: Section) -> &mut BTreeMap<String, RootLink> {
        match section {
            Section::Require => &mut self.requires,
            Section::RequireDev => &mut self.dev_requires,
        }
    }
}
