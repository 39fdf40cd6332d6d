//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::{StaffId, StaffKind};

/// Domain errors represent violations of the hierarchy rules.
///
/// Everything except [`DomainError::InvariantViolation`] is a validation error:
/// the chart is left unchanged and callers may report it and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown staff handle: {0}")]
    UnknownStaff(StaffId),

    #[error("can not hire {name}: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: StaffKind,
        found: StaffKind,
    },

    #[error("can not hire {0}: already reports to someone")]
    AlreadyHired(String),

    #[error("can not hire {0}: top of the organization")]
    CannotHireRoot(String),

    #[error("can not hire {candidate} under {boss}: {candidate} is above {boss}")]
    WouldCreateCycle { boss: String, candidate: String },

    #[error("can not fire colleague {0}: not a member of the organization")]
    NotMember(String),

    #[error("can not fire colleague {target}: not in the reporting line of {manager}")]
    NotSubordinate { manager: String, target: String },

    #[error("can not fire colleague {0}: top of the organization")]
    CannotFireRoot(String),

    #[error("can not replace {target} with {replacement}: {reason}")]
    InvalidReplacement {
        target: String,
        replacement: String,
        reason: &'static str,
    },

    /// Internal state is corrupted. Not meant to be handled by normal control flow.
    #[error("can not fire colleague: {0}")]
    InvariantViolation(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// True for errors signalling a broken structural invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::InvariantViolation(_))
    }
}
