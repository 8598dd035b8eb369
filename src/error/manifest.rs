//! Manifest errors

use super::RequisiteError;

/// Creates a manifest read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> RequisiteError {
    RequisiteError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> RequisiteError {
    RequisiteError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> RequisiteError {
    RequisiteError::ManifestWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
