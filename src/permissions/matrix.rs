// Copyright 2025 Cowboy AI, LLC.

//! In-memory permission matrix
//!
//! The matrix is built once from a [`PermissionSource`] and read without
//! locking afterwards. Every reachable combination of derived status, view
//! and milestone a role needs must be listed explicitly; there is no wildcard
//! or fallback row.

use super::rule::{Permission, PermissionRule, RuleKey};
use super::source::PermissionSource;
use crate::errors::{ApprovalError, ApprovalResult};
use crate::identifiers::Role;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Index of permission rules keyed by their six-part key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    rules: IndexMap<RuleKey, Permission>,
}

impl PermissionMatrix {
    /// Create an empty matrix that denies everything
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a matrix from rule rows
    ///
    /// Fails with [`ApprovalError::AmbiguousRule`] when two rows share a key,
    /// even if they grant the same permission. Rows keep their source order.
    pub fn from_rules(rules: impl IntoIterator<Item = PermissionRule>) -> ApprovalResult<Self> {
        let mut index = IndexMap::new();
        for rule in rules {
            rule.validate()?;
            let key = rule.key();
            if index.contains_key(&key) {
                warn!(key = %key, "Rejecting permission matrix with duplicate rule");
                return Err(ApprovalError::AmbiguousRule {
                    key: key.to_string(),
                });
            }
            index.insert(key, rule.permission);
        }
        Ok(Self { rules: index })
    }

    /// Load a matrix from a rule source
    pub fn load(source: &dyn PermissionSource) -> ApprovalResult<Self> {
        let matrix = Self::from_rules(source.rules()?)?;
        info!(
            source = %source.describe(),
            rules = matrix.len(),
            roles = matrix.roles().len(),
            "Permission matrix loaded"
        );
        Ok(matrix)
    }

    /// Permission stored for exactly this key
    pub fn lookup(&self, key: &RuleKey) -> Option<Permission> {
        self.rules.get(key).copied()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the matrix has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules in source order
    pub fn rules(&self) -> impl Iterator<Item = PermissionRule> + '_ {
        self.rules
            .iter()
            .map(|(key, permission)| PermissionRule::new(key.clone(), *permission))
    }

    /// Rules that mention `role`
    pub fn rules_for_role<'a>(
        &'a self,
        role: &'a Role,
    ) -> impl Iterator<Item = PermissionRule> + 'a {
        self.rules().filter(move |rule| &rule.role == role)
    }

    /// Distinct roles named by the matrix
    pub fn roles(&self) -> BTreeSet<&Role> {
        self.rules.keys().map(|key| &key.role).collect()
    }
}
