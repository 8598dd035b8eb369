//! Orchestration of manifest changes and installer runs
//!
//! - [`InstallationOrchestrator`]: explicit requirements (`require` / `remove`)
//! - [`QuestionOrchestrator`]: optional requirement groups of one package
//!
//! Both share one protocol ([`session`]): collect a [`ManifestDelta`], write
//! it to the manifest and root requirements, run the scoped installer over a
//! whitelist, and restore the manifest when the run fails.

pub mod install;
pub mod question;
pub mod session;
pub mod whitelist;

pub use install::{InstallationOrchestrator, PackageRequest};
pub use question::{QuestionOrchestrator, RequirementGroup};
pub use session::{InstallSession, ManifestDelta};
pub use whitelist::UninstallScan;
