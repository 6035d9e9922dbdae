// Copyright 2025 Cowboy AI, LLC.

//! Permission rule rows and their lookup keys

use crate::errors::{ApprovalError, ApprovalResult};
use crate::identifiers::Role;
use crate::milestone::Milestone;
use crate::status::{DerivedStatus, GroupApprovalStatus, GroupSendingStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Area of the application a rule gates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum View {
    /// Cost line data
    Cost,
    /// Project summary
    ProjectSummary,
    /// Invoice data
    Invoice,
    /// Summary amounts shown alongside reports
    SummaryAmounts,
}

impl View {
    /// Wire label for this view
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Cost => "Cost",
            View::ProjectSummary => "ProjectSummary",
            View::Invoice => "Invoice",
            View::SummaryAmounts => "SummaryAmounts",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule allows against its view
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Permission {
    /// Read access
    View,
    /// Read and write access
    Edit,
}

impl Permission {
    /// Whether holding `self` satisfies a request for `requested`
    ///
    /// `Edit` includes `View`.
    pub fn grants(self, requested: Permission) -> bool {
        match (self, requested) {
            (Permission::Edit, _) => true,
            (Permission::View, Permission::View) => true,
            (Permission::View, Permission::Edit) => false,
        }
    }

    /// Wire label for this permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::View => "View",
            Permission::Edit => "Edit",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six-part key a rule is indexed by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    /// Caller role
    pub role: Role,
    /// Rolled-up sending status of the group
    pub sending: GroupSendingStatus,
    /// Rolled-up approval status of the group
    pub approval: GroupApprovalStatus,
    /// Rolled-up submitted flag of the group
    pub submitted: bool,
    /// Target view
    pub view: View,
    /// Billing milestone
    pub milestone: Milestone,
}

impl RuleKey {
    /// Build the lookup key for a request
    pub fn new(role: Role, derived: &DerivedStatus, view: View, milestone: Milestone) -> Self {
        Self {
            role,
            sending: derived.sending,
            approval: derived.approval,
            submitted: derived.submitted,
            view,
            milestone,
        }
    }

    /// The derived status part of the key
    pub fn derived(&self) -> DerivedStatus {
        DerivedStatus::new(self.sending, self.approval, self.submitted)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            self.role, self.sending, self.approval, self.submitted, self.view, self.milestone
        )
    }
}

/// One authorization fact
///
/// `role` may exercise `permission` against `view` while a group is in the
/// given derived status at `milestone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PermissionRule {
    /// Caller role
    pub role: Role,
    /// Rolled-up sending status the rule applies to
    pub sending: GroupSendingStatus,
    /// Rolled-up approval status the rule applies to
    pub approval: GroupApprovalStatus,
    /// Rolled-up submitted flag the rule applies to
    pub submitted: bool,
    /// Target view
    pub view: View,
    /// Billing milestone
    pub milestone: Milestone,
    /// Permission granted
    pub permission: Permission,
}

impl PermissionRule {
    /// Create a rule from a key and the permission it grants
    pub fn new(key: RuleKey, permission: Permission) -> Self {
        Self {
            role: key.role,
            sending: key.sending,
            approval: key.approval,
            submitted: key.submitted,
            view: key.view,
            milestone: key.milestone,
            permission,
        }
    }

    /// Key this rule is indexed by
    pub fn key(&self) -> RuleKey {
        RuleKey {
            role: self.role.clone(),
            sending: self.sending,
            approval: self.approval,
            submitted: self.submitted,
            view: self.view,
            milestone: self.milestone,
        }
    }

    /// Reject rows that can never match a request
    pub fn validate(&self) -> ApprovalResult<()> {
        if self.role.as_str().trim().is_empty() {
            return Err(ApprovalError::InvalidRule(format!(
                "role must not be empty in rule for {}",
                self.key()
            )));
        }
        Ok(())
    }

    /// JSON Schema describing a rule row, for validating rule files
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(PermissionRule);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }
}
