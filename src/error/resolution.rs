//! Resolution errors

use super::RequisiteError;

/// Creates a "no installable version" error for the active minimum stability
pub fn no_candidate(name: impl Into<String>, stability: impl Into<String>) -> RequisiteError {
    RequisiteError::ResolutionFailed {
        name: name.into(),
        stability: stability.into(),
    }
}

/// Creates an invalid requirement group error
pub fn invalid_group(question: impl Into<String>, count: usize) -> RequisiteError {
    RequisiteError::InvalidRequirementGroup {
        question: question.into(),
        count,
    }
}

/// Creates an invalid operation error
pub fn invalid_operation(reason: impl Into<String>) -> RequisiteError {
    RequisiteError::InvalidOperation {
        reason: reason.into(),
    }
}
