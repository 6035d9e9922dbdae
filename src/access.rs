// Copyright 2025 Cowboy AI, LLC.

//! Access resolution against the permission matrix
//!
//! A request is granted only when the matrix holds a rule for exactly
//! `(role, derived status, view, milestone)` and that rule's permission covers
//! the requested one. Anything else is denied. Privileged roles get their
//! reach from extra rows, not from a separate code path.

use crate::identifiers::Role;
use crate::milestone::Milestone;
use crate::permissions::{Permission, PermissionMatrix, RuleKey, View};
use crate::status::DerivedStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// No rule exists for the request's key
    NoMatchingRule,
    /// A rule exists but grants less than was asked for
    InsufficientPermission {
        /// Permission the matching rule grants
        held: Permission,
    },
    /// The caller has no role for the group
    NoRole,
    /// The item store holds no items for the group
    UnknownGroup,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::NoMatchingRule => f.write_str("no matching rule"),
            DenyReason::InsufficientPermission { held } => {
                write!(f, "rule only grants {held}")
            }
            DenyReason::NoRole => f.write_str("caller has no role for the group"),
            DenyReason::UnknownGroup => f.write_str("group has no work items"),
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// Access granted by a matching rule
    Granted {
        /// Permission the matching rule grants
        held: Permission,
    },
    /// Access denied
    Denied(DenyReason),
}

impl AccessDecision {
    /// Whether access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }
}

/// Resolves access requests against one matrix snapshot
#[derive(Debug, Clone, Copy)]
pub struct AccessResolver<'m> {
    matrix: &'m PermissionMatrix,
}

impl<'m> AccessResolver<'m> {
    /// Create a resolver over `matrix`
    pub fn new(matrix: &'m PermissionMatrix) -> Self {
        Self { matrix }
    }

    /// Decide a request and report why
    pub fn decide(
        &self,
        role: &Role,
        derived: &DerivedStatus,
        view: View,
        milestone: Milestone,
        requested: Permission,
    ) -> AccessDecision {
        let key = RuleKey::new(role.clone(), derived, view, milestone);
        match self.matrix.lookup(&key) {
            Some(held) if held.grants(requested) => AccessDecision::Granted { held },
            Some(held) => AccessDecision::Denied(DenyReason::InsufficientPermission { held }),
            None => AccessDecision::Denied(DenyReason::NoMatchingRule),
        }
    }

    /// Whether the request is granted
    pub fn is_allowed(
        &self,
        role: &Role,
        derived: &DerivedStatus,
        view: View,
        milestone: Milestone,
        requested: Permission,
    ) -> bool {
        self.decide(role, derived, view, milestone, requested)
            .is_granted()
    }
}

/// Whether `matrix` grants the request
///
/// Never fails; a request without a matching rule is denied.
pub fn resolve_access(
    matrix: &PermissionMatrix,
    role: &Role,
    derived: &DerivedStatus,
    view: View,
    milestone: Milestone,
    requested: Permission,
) -> bool {
    AccessResolver::new(matrix).is_allowed(role, derived, view, milestone, requested)
}
