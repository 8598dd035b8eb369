//! Scoped operation capture
//!
//! ```ignore
//! let mut capture = OperationCapture::acquire(installer);
//! let status = capture.run(&root, &whitelist)?;
//! let operations = capture.release();
//! ```
//!
//! Capture mode is switched off again when the guard is dropped, so an
//! installer error propagated with `?` still restores normal mode.

use super::{RawOperation, ScopedInstaller};
use crate::error::Result;
use crate::manifest::RootRequirements;

/// Guard holding an installer in capture mode
pub struct OperationCapture<'a> {
    installer: &'a mut dyn ScopedInstaller,
    released: bool,
}

impl<'a> OperationCapture<'a> {
    /// Put `installer` into capture mode
    pub fn acquire(installer: &'a mut dyn ScopedInstaller) -> Self {
        installer.begin_capture();
        Self {
            installer,
            released: false,
        }
    }

    /// Run the installer while capturing
    pub fn run(&mut self, root: &RootRequirements, whitelist: &[String]) -> Result<i32> {
        self.installer.run(root, whitelist)
    }

    /// Leave capture mode and return the captured operations
    pub fn release(mut self) -> Vec<RawOperation> {
        self.released = true;
        self.installer.end_capture()
    }
}

impl Drop for OperationCapture<'_> {
    fn drop(&mut self) {
        if !self.released {
            let discarded = self.installer.end_capture();
            tracing::debug!(count = discarded.len(), "capture released without collecting");
        }
    }
}
