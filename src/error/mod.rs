//! Error types and handling for Requisite
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Manifest read/write errors
//! - [`ledger`]: Lock ledger errors
//! - [`resolution`]: Version resolution and requirement group errors
//!
//! A failing installer run is not an error: it is reported through the exit
//! status returned by the orchestrators.

pub mod ledger;
pub mod manifest;
pub mod resolution;

pub use ledger::{parse_failed as ledger_parse_failed, write_failed as ledger_write_failed};
pub use manifest::{
    parse_failed as manifest_parse_failed, read_failed as manifest_read_failed,
    write_failed as manifest_write_failed,
};
pub use resolution::{invalid_group, invalid_operation, no_candidate};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Requisite operations
#[derive(Error, Diagnostic, Debug)]
pub enum RequisiteError {
    // Resolution errors
    #[error(
        "Could not find package {name} at any version for your minimum-stability ({stability})"
    )]
    #[diagnostic(
        code(requisite::resolution::no_candidate),
        help("Check the package spelling or your minimum-stability")
    )]
    ResolutionFailed { name: String, stability: String },

    #[error("Requirement group '{question}' offers {count} candidate(s)")]
    #[diagnostic(
        code(requisite::resolution::invalid_group),
        help("You must provide at least two optional dependencies per question")
    )]
    InvalidRequirementGroup { question: String, count: usize },

    #[error("Unknown stability '{value}'")]
    #[diagnostic(
        code(requisite::resolution::invalid_stability),
        help("Use one of: dev, alpha, beta, RC, stable")
    )]
    InvalidStability { value: String },

    #[error("Invalid package operation: {reason}")]
    #[diagnostic(code(requisite::resolution::invalid_operation))]
    InvalidOperation { reason: String },

    // Manifest errors
    #[error("Failed to read manifest: {path}")]
    #[diagnostic(code(requisite::manifest::read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to parse manifest {path}: {reason}")]
    #[diagnostic(
        code(requisite::manifest::parse_failed),
        help("The manifest must be a JSON object")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Failed to write manifest {path}: {reason}")]
    #[diagnostic(code(requisite::manifest::write_failed))]
    ManifestWriteFailed { path: String, reason: String },

    // Ledger errors
    #[error("Failed to read ledger: {path}")]
    #[diagnostic(code(requisite::ledger::read_failed))]
    LedgerReadFailed { path: String, reason: String },

    #[error("Failed to parse ledger {path}: {reason}")]
    #[diagnostic(
        code(requisite::ledger::parse_failed),
        help("Delete the ledger file to start from an empty ledger")
    )]
    LedgerParseFailed { path: String, reason: String },

    #[error("Failed to write ledger {path}: {reason}")]
    #[diagnostic(code(requisite::ledger::write_failed))]
    LedgerWriteFailed { path: String, reason: String },

    // Installed index errors
    #[error("Failed to read installed packages from {path}: {reason}")]
    #[diagnostic(code(requisite::index::read_failed))]
    IndexReadFailed { path: String, reason: String },

    #[error("Failed to parse installed packages in {path}: {reason}")]
    #[diagnostic(code(requisite::index::parse_failed))]
    IndexParseFailed { path: String, reason: String },

    // Catalog errors
    #[error("Failed to read version catalog {path}: {reason}")]
    #[diagnostic(code(requisite::catalog::read_failed))]
    CatalogReadFailed { path: String, reason: String },

    #[error("Failed to parse version catalog {path}: {reason}")]
    #[diagnostic(code(requisite::catalog::parse_failed))]
    CatalogParseFailed { path: String, reason: String },

    // Installer errors
    #[error("Failed to start installer '{program}': {reason}")]
    #[diagnostic(
        code(requisite::installer::spawn_failed),
        help("Check the `installer.program` entry in requisite.yaml")
    )]
    InstallerSpawnFailed { program: String, reason: String },

    #[error("Package '{name}' is not installed")]
    #[diagnostic(code(requisite::installer::not_installed))]
    PackageNotInstalled { name: String },

    // Prompt errors
    #[error("Prompt aborted: {prompt}")]
    #[diagnostic(code(requisite::prompt::aborted))]
    PromptAborted { prompt: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(requisite::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(requisite::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(requisite::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for RequisiteError {
    fn from(err: std::io::Error) -> Self {
        RequisiteError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RequisiteError {
    fn from(err: serde_yaml::Error) -> Self {
        RequisiteError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RequisiteError {
    fn from(err: serde_json::Error) -> Self {
        RequisiteError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RequisiteError {
    fn from(err: inquire::InquireError) -> Self {
        RequisiteError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RequisiteError>;
