//! Version lookup
//!
//! [`VersionLookup`] answers "what is the best version of this package under
//! the project's minimum stability". [`Catalog`] implements it over a local
//! repository catalog file.

pub mod catalog;

use std::fmt;
use std::str::FromStr;

use crate::error::{self, RequisiteError, Result};

pub use catalog::Catalog;

/// Release channel, ordered from least to most mature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stability {
    Dev,
    Alpha,
    Beta,
    RC,
    Stable,
}

impl Stability {
    /// Stability implied by a version string
    pub fn of_version(version: &str) -> Self {
        let lower = version.trim().to_lowercase();
        if lower.starts_with("dev-") || lower.ends_with("-dev") {
            return Stability::Dev;
        }

        let Some((_, suffix)) = lower.split_once('-') else {
            return Stability::Stable;
        };

        if suffix.starts_with("rc") {
            Stability::RC
        } else if suffix.starts_with("beta") || suffix.starts_with('b') {
            Stability::Beta
        } else if suffix.starts_with("alpha") || suffix.starts_with('a') {
            Stability::Alpha
        } else if suffix.starts_with("dev") {
            Stability::Dev
        } else {
            Stability::Stable
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stability::Dev => "dev",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::RC => "RC",
            Stability::Stable => "stable",
        };
        f.write_str(name)
    }
}

impl FromStr for Stability {
    type Err = RequisiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dev" => Ok(Stability::Dev),
            "alpha" => Ok(Stability::Alpha),
            "beta" => Ok(Stability::Beta),
            "rc" => Ok(Stability::RC),
            "stable" => Ok(Stability::Stable),
            _ => Err(RequisiteError::InvalidStability {
                value: s.to_string(),
            }),
        }
    }
}

/// Best-candidate lookup for a package name
pub trait VersionLookup {
    /// Most recent version of `name` allowed by `minimum_stability`
    fn best_candidate(&self, name: &str, minimum_stability: Stability) -> Result<Option<String>>;

    /// Constraint to write for a looked-up version
    ///
    /// Plain releases get a caret range; pre-releases are pinned verbatim.
    fn recommended_constraint(&self, version: &str) -> String {
        let version = version.strip_prefix('v').unwrap_or(version);
        if Stability::of_version(version) == Stability::Stable {
            format!("^{version}")
        } else {
            version.to_string()
        }
    }
}

/// Look up and recommend a constraint for `name`, failing when nothing qualifies
pub fn resolve_constraint(
    lookup: &dyn VersionLookup,
    name: &str,
    minimum_stability: Stability,
) -> Result<String> {
    let Some(version) = lookup.best_candidate(name, minimum_stability)? else {
        return Err(error::no_candidate(name, minimum_stability.to_string()));
    };

    let constraint = lookup.recommended_constraint(&version);
    tracing::info!("Using version {constraint} for {name}");
    Ok(constraint)
}
