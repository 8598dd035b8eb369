//! Command runners
//!
//! Each runner opens the project, wires the orchestrators to the real
//! collaborators and returns the process exit status.

pub mod helpers;
pub mod ledger;
pub mod optional;
pub mod remove;
pub mod require;
