//! Manifest backup and restore around an installer run
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = ManifestTransaction::default();
//! transaction.begin(&store)?;
//!
//! // Mutate the manifest, run the installer...
//!
//! // On success:
//! transaction.commit();
//!
//! // On a failed run:
//! transaction.rollback(&mut store)?;
//! ```
//!
//! Only the manifest is restored. Files the installer already wrote stay.

use crate::error::Result;
use crate::manifest::ManifestStore;

/// Original manifest content captured before the first mutation
#[derive(Debug, Default)]
pub struct ManifestTransaction {
    backup: Option<Vec<u8>>,
}

impl ManifestTransaction {
    /// Back up the manifest unless a backup is already held
    ///
    /// Repeated calls before [`ManifestTransaction::commit`] keep the
    /// earliest content.
    pub fn begin(&mut self, store: &dyn ManifestStore) -> Result<()> {
        if self.backup.is_none() {
            self.backup = Some(store.read_raw()?);
            tracing::debug!(manifest = %store.location().display(), "manifest backed up");
        }
        Ok(())
    }

    /// Whether a backup is held
    pub fn is_active(&self) -> bool {
        self.backup.is_some()
    }

    /// Drop the backup, keeping the current manifest
    pub fn commit(&mut self) {
        self.backup = None;
    }

    /// Restore the backed-up manifest byte for byte
    ///
    /// Returns whether anything was restored.
    pub fn rollback(&mut self, store: &mut dyn ManifestStore) -> Result<bool> {
        let Some(original) = self.backup.take() else {
            return Ok(false);
        };

        tracing::error!(
            "Installation failed, reverting {} to its original content.",
            store.location().display()
        );
        store.write_raw(&original)?;
        Ok(true)
    }
}
