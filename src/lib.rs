//! Requisite - transactional dependency manifest orchestration
//!
//! Changes a project's declared requirements and reconciles them with an
//! external package manager: the manifest is edited, the host installer runs
//! restricted to the packages that changed, and the manifest is restored when
//! the run fails. A lock ledger records what has been configured.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod ledger;
pub mod logging;
pub mod manifest;
pub mod operations;
pub mod progress;
pub mod prompt;
pub mod resolver;
pub mod transaction;
pub mod version;

#[cfg(test)]
mod test_fixtures;
