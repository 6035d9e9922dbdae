// Copyright 2025 Cowboy AI, LLC.

//! Error types for status rollup and permission evaluation
//!
//! Only two failures belong to the evaluation core itself: aggregating an
//! empty group and loading a matrix with two rules for one key. A denied
//! access is never an error.

use thiserror::Error;

/// Errors that can occur while loading rules or evaluating groups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// Aggregation was asked to roll up a group with no work items
    #[error("Empty group: no work items supplied for {group}")]
    EmptyGroup {
        /// Group (or a description of the input) that was empty
        group: String,
    },

    /// Two permission rules share the same six-part key
    #[error("Ambiguous rule: more than one rule for key {key}")]
    AmbiguousRule {
        /// Display form of the duplicated key
        key: String,
    },

    /// A rule row could not be interpreted
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A group key, period or identifier could not be parsed
    #[error("Invalid group key: {0}")]
    InvalidGroupKey(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A collaborator (item store, membership lookup) failed
    #[error("Collaborator error: {collaborator} - {message}")]
    CollaboratorError {
        /// Name of the collaborator
        collaborator: String,
        /// Error message from the collaborator
        message: String,
    },
}

/// Result type for approval operations
pub type ApprovalResult<T> = Result<T, ApprovalError>;

impl From<serde_json::Error> for ApprovalError {
    fn from(err: serde_json::Error) -> Self {
        ApprovalError::SerializationError(err.to_string())
    }
}

impl ApprovalError {
    /// Create an empty-group error for the given group description
    pub fn empty_group(group: impl Into<String>) -> Self {
        ApprovalError::EmptyGroup {
            group: group.into(),
        }
    }

    /// Create a collaborator error
    pub fn collaborator(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        ApprovalError::CollaboratorError {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the caller broke a precondition
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, ApprovalError::EmptyGroup { .. })
    }

    /// Check if this error is fatal configuration detected at load time
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ApprovalError::AmbiguousRule { .. }
                | ApprovalError::InvalidRule(_)
                | ApprovalError::SerializationError(_)
        )
    }
}
