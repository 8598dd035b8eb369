//! Lock ledger errors

use super::RequisiteError;

/// Creates a ledger parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> RequisiteError {
    RequisiteError::LedgerParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a ledger write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> RequisiteError {
    RequisiteError::LedgerWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
