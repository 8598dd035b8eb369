//! Uninstall whitelist widening
//!
//! A name asked to be removed stays installed when another installed package
//! still requires it. Only packages outside the removal set protect names.

use serde::{Deserialize, Serialize};

use crate::installer::PackageSnapshot;

/// How protecting requirements are scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UninstallScan {
    /// One pass; only packages outside the requested set protect names
    #[default]
    SinglePass,
    /// Repeat, letting every name dropped from the whitelist protect its own
    /// requirements, until the whitelist stops changing
    Fixpoint,
}

/// Whitelist of names the installer may remove
///
/// Order follows `requested`, with duplicates dropped.
pub fn widen(requested: &[String], installed: &[PackageSnapshot], scan: UninstallScan) -> Vec<String> {
    let mut whitelist: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        if !contains(&whitelist, name) {
            whitelist.push(name.clone());
        }
    }

    loop {
        let retained: Vec<&PackageSnapshot> = installed
            .iter()
            .filter(|package| !contains(&whitelist, &package.name))
            .filter(|package| scan == UninstallScan::Fixpoint || !contains(requested, &package.name))
            .collect();

        let before = whitelist.len();
        whitelist.retain(|name| {
            let protector = retained.iter().find(|package| package.depends_on(name));
            if let Some(package) = protector {
                tracing::debug!("keeping {name}, still required by {}", package.name);
            }
            protector.is_none()
        });

        if scan == UninstallScan::SinglePass || whitelist.len() == before {
            return whitelist;
        }
    }
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn installed() -> Vec<PackageSnapshot> {
        vec![
            PackageSnapshot::new("vendor/a", "1.0.0").with_require("vendor/b", "^1.0"),
            PackageSnapshot::new("vendor/b", "1.0.0").with_dev_require("vendor/c", "^1.0"),
            PackageSnapshot::new("vendor/c", "1.0.0"),
        ]
    }

    #[test]
    fn test_other_installed_package_protects_name() {
        let whitelist = widen(&names(&["vendor/b"]), &installed(), UninstallScan::SinglePass);
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_requested_packages_do_not_protect() {
        let whitelist = widen(
            &names(&["vendor/a", "Vendor/B"]),
            &installed(),
            UninstallScan::SinglePass,
        );
        assert_eq!(whitelist, names(&["vendor/a", "Vendor/B"]));
    }

    #[test]
    fn test_unrequired_name_stays() {
        let installed = vec![PackageSnapshot::new("vendor/b", "1.0.0")];
        let whitelist = widen(&names(&["vendor/b"]), &installed, UninstallScan::SinglePass);
        assert_eq!(whitelist, names(&["vendor/b"]));
    }

    #[test]
    fn test_single_pass_is_not_transitive() {
        // a -> b -> c; b is protected by a, but c is only required by b
        let whitelist = widen(
            &names(&["vendor/b", "vendor/c"]),
            &installed(),
            UninstallScan::SinglePass,
        );
        assert_eq!(whitelist, names(&["vendor/c"]));
    }

    #[test]
    fn test_fixpoint_protects_transitively() {
        let whitelist = widen(
            &names(&["vendor/b", "vendor/c"]),
            &installed(),
            UninstallScan::Fixpoint,
        );
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_fixpoint_matches_single_pass_without_chains() {
        let requested = names(&["vendor/a", "vendor/b"]);
        assert_eq!(
            widen(&requested, &installed(), UninstallScan::Fixpoint),
            widen(&requested, &installed(), UninstallScan::SinglePass)
        );
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let whitelist = widen(
            &names(&["vendor/c", "VENDOR/C"]),
            &[],
            UninstallScan::SinglePass,
        );
        assert_eq!(whitelist, names(&["vendor/c"]));
    }

    #[test]
    fn test_scan_mode_deserializes_kebab_case() {
        let scan: UninstallScan = serde_yaml::from_str("fixpoint").unwrap();
        assert_eq!(scan, UninstallScan::Fixpoint);
        let scan: UninstallScan = serde_yaml::from_str("single-pass").unwrap();
        assert_eq!(scan, UninstallScan::SinglePass);
    }
}
