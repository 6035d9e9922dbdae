// Copyright 2025 Cowboy AI, LLC.

//! Caller membership: which role an identity holds for a group

use crate::errors::ApprovalResult;
use crate::identifiers::{GroupKey, GroupParent, Role};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maps an already authenticated caller to a role for a group
#[async_trait]
pub trait MembershipResolver: Send + Sync {
    /// Role `identity` holds for `group`, or `None` if it may not act on it
    async fn resolve_role(&self, identity: &str, group: &GroupKey) -> ApprovalResult<Option<Role>>;
}

#[derive(Debug, Default)]
struct Grants {
    per_parent: HashMap<(String, GroupParent), Role>,
    everywhere: HashMap<String, Role>,
}

/// Fixed membership table for testing and embedding
///
/// A grant on a specific proposal or project takes precedence over a grant
/// that applies to every group.
#[derive(Debug, Clone, Default)]
pub struct StaticMembership {
    grants: Arc<RwLock<Grants>>,
}

impl StaticMembership {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `identity` a role on one proposal or project
    pub async fn grant(&self, identity: impl Into<String>, parent: GroupParent, role: Role) {
        let mut grants = self.grants.write().await;
        grants.per_parent.insert((identity.into(), parent), role);
    }

    /// Give `identity` a role on every group
    pub async fn grant_everywhere(&self, identity: impl Into<String>, role: Role) {
        let mut grants = self.grants.write().await;
        grants.everywhere.insert(identity.into(), role);
    }

    /// Mark `identity` as a finance-operations caller
    pub async fn grant_finance_operations(&self, identity: impl Into<String>) {
        self.grant_everywhere(identity, Role::finance_operations())
            .await;
    }
}

#[async_trait]
impl MembershipResolver for StaticMembership {
    async fn resolve_role(&self, identity: &str, group: &GroupKey) -> ApprovalResult<Option<Role>> {
        let grants = self.grants.read().await;
        let specific = grants
            .per_parent
            .get(&(identity.to_string(), group.parent.clone()));
        Ok(specific
            .or_else(|| grants.everywhere.get(identity))
            .cloned())
    }
}
