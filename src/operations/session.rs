//! Shared install protocol of both orchestrators
//!
//! A run goes through the same steps whichever orchestrator drives it:
//! 1. Collect a [`ManifestDelta`] of names to add and remove.
//! 2. [`InstallSession::apply`] backs the manifest up, writes the delta and
//!    updates the in-process root requirements.
//! 3. [`InstallSession::execute`] runs the scoped installer under capture and
//!    reverts the manifest when the run fails.

use crate::error::Result;
use crate::installer::{InstalledIndex, OperationCapture, PackageSnapshot, RawOperation, ScopedInstaller};
use crate::manifest::{HostSettings, Manifest, ManifestStore, RootRequirements, Section};
use crate::progress::InstallerSpinner;
use crate::transaction::ManifestTransaction;

/// Requirement changes of one batch
///
/// A name is never in both the add-set and the remove-set: the later call wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDelta {
    additions: Vec<(Section, String, String)>,
    removals: Vec<(Section, String)>,
}

impl ManifestDelta {
    pub fn add(&mut self, section: Section, name: &str, constraint: &str) {
        self.removals.retain(|(_, removed)| !removed.eq_ignore_ascii_case(name));
        self.additions.retain(|(_, added, _)| !added.eq_ignore_ascii_case(name));
        self.additions
            .push((section, name.to_string(), constraint.to_string()));
    }

    pub fn remove(&mut self, section: Section, name: &str) {
        self.additions.retain(|(_, added, _)| !added.eq_ignore_ascii_case(name));
        self.removals.retain(|(_, removed)| !removed.eq_ignore_ascii_case(name));
        self.removals.push((section, name.to_string()));
    }

    /// Whether `name` is already in the add-set
    pub fn adds(&self, name: &str) -> bool {
        self.additions
            .iter()
            .any(|(_, added, _)| added.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Added names with their constraints, in insertion order
    pub fn additions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.additions
            .iter()
            .map(|(_, name, constraint)| (name.as_str(), constraint.as_str()))
    }

    /// Added names in insertion order
    pub fn added_names(&self) -> Vec<String> {
        self.additions.iter().map(|(_, name, _)| name.clone()).collect()
    }

    /// Removed names in insertion order
    pub fn removed_names(&self) -> Vec<String> {
        self.removals.iter().map(|(_, name)| name.clone()).collect()
    }

    fn apply_to(&self, manifest: &mut Manifest, root: &mut RootRequirements, sort_packages: bool) {
        for (section, name, constraint) in &self.additions {
            manifest.add_link(*section, name, constraint, sort_packages);
            root.add(*section, name, constraint);
        }
        for (section, name) in &self.removals {
            if !manifest.remove_link(*section, name) {
                tracing::debug!("{name} is not in {}", section.key());
            }
            root.remove(*section, name);
        }
    }
}

/// Manifest, installer and rollback state of one orchestrator
pub struct InstallSession<'a> {
    store: &'a mut dyn ManifestStore,
    installer: &'a mut dyn ScopedInstaller,
    index: &'a dyn InstalledIndex,
    root: RootRequirements,
    settings: HostSettings,
    transaction: ManifestTransaction,
    whitelist: Vec<String>,
}

impl<'a> InstallSession<'a> {
    /// Read the manifest once and build the root requirements from it
    pub fn open(
        store: &'a mut dyn ManifestStore,
        installer: &'a mut dyn ScopedInstaller,
        index: &'a dyn InstalledIndex,
    ) -> Result<Self> {
        let manifest = store.read()?;
        Ok(Self {
            root: RootRequirements::from_manifest(&manifest),
            settings: manifest.settings(),
            store,
            installer,
            index,
            transaction: ManifestTransaction::default(),
            whitelist: Vec::new(),
        })
    }

    pub fn root(&self) -> &RootRequirements {
        &self.root
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn installed(&self) -> Result<Vec<PackageSnapshot>> {
        self.index.list()
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    pub fn set_whitelist(&mut self, whitelist: Vec<String>) {
        self.whitelist = whitelist;
    }

    /// Write `delta` to the manifest and the root requirements
    ///
    /// The manifest is backed up before its first write since the last run
    /// and restored when the write fails.
    pub fn apply(&mut self, delta: &ManifestDelta) -> Result<()> {
        if delta.is_empty() {
            return Ok(());
        }

        self.transaction.begin(&*self.store)?;

        tracing::info!("Updating manifest");
        let mut manifest = self.store.read()?;
        let mut root = self.root.clone();
        delta.apply_to(&mut manifest, &mut root, self.settings.sort_packages);
        if let Err(e) = self.store.write(&manifest) {
            self.revert()?;
            return Err(e);
        }

        tracing::info!("Updating root package");
        self.root = root;
        Ok(())
    }

    /// Run the installer over the whitelist, capturing its operations
    ///
    /// A failing run (non-zero status or installer error) restores the
    /// manifest backup. The whitelist is consumed either way.
    pub fn execute(&mut self) -> Result<(i32, Vec<RawOperation>)> {
        let whitelist = std::mem::take(&mut self.whitelist);

        if whitelist.is_empty() {
            tracing::debug!("nothing to install or remove");
            self.transaction.commit();
            return Ok((0, Vec::new()));
        }

        tracing::info!("Running an update to install dependent packages");
        let spinner = InstallerSpinner::start(&whitelist);

        let mut capture = OperationCapture::acquire(&mut *self.installer);
        let outcome = capture.run(&self.root, &whitelist);
        let operations = capture.release();

        let status = match outcome {
            Ok(status) => status,
            Err(e) => {
                spinner.abandon();
                self.revert()?;
                return Err(e);
            }
        };

        if status == 0 {
            spinner.finish();
            self.transaction.commit();
        } else {
            spinner.abandon();
            tracing::warn!(status, "installer failed");
            self.revert()?;
        }

        Ok((status, operations))
    }

    fn revert(&mut self) -> Result<()> {
        if self.transaction.rollback(&mut *self.store)? {
            self.root = RootRequirements::from_manifest(&self.store.read()?);
        }
        Ok(())
    }
}
