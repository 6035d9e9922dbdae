// Copyright 2025 Cowboy AI, LLC.

//! Billing milestones and the status remap tied to them

use crate::status::ApprovalStatus;
use crate::work_item::WorkItem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing phase a request is evaluated in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Milestone {
    /// Billing still open
    Draft,
    /// Billing finalised
    Final,
}

impl Milestone {
    /// Select the milestone from the caller's billing-mode flag
    pub fn from_billing_mode(final_billing: bool) -> Self {
        if final_billing {
            Milestone::Final
        } else {
            Milestone::Draft
        }
    }

    /// Wire label for this milestone
    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::Draft => "Draft",
            Milestone::Final => "Final",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApprovalStatus {
    /// Approval status as presented at `milestone`
    ///
    /// Once billing is final a partially approved item counts as approved.
    /// The mapping is idempotent.
    pub fn for_milestone(self, milestone: Milestone) -> ApprovalStatus {
        match (milestone, self) {
            (Milestone::Final, ApprovalStatus::PartiallyApproved) => ApprovalStatus::Approved,
            (_, status) => status,
        }
    }
}

/// Items as presented at `milestone`
pub(crate) fn present_items(items: &[WorkItem], milestone: Milestone) -> Vec<WorkItem> {
    items
        .iter()
        .map(|item| match item.approval.for_milestone(milestone) {
            remapped if remapped != item.approval => item.with_approval(remapped),
            _ => item.clone(),
        })
        .collect()
}
