// Copyright 2025 Cowboy AI, LLC.

//! One-call evaluation of a group: milestone, remap, rollup, resolution
//!
//! The Final-milestone remap of partially approved items happens here and
//! nowhere else, at the item level and before aggregation. The evaluation
//! reports the derived status that was actually handed to the resolver.

use crate::access::{AccessDecision, AccessResolver};
use crate::aggregation::StatusAggregator;
use crate::errors::ApprovalResult;
use crate::identifiers::Role;
use crate::milestone::{present_items, Milestone};
use crate::permissions::{Permission, PermissionMatrix, View};
use crate::status::DerivedStatus;
use crate::work_item::WorkItem;
use serde::{Deserialize, Serialize};

/// What a caller wants to do with a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Target view
    pub view: View,
    /// Billing mode flag; true selects the Final milestone
    pub final_billing: bool,
    /// Requested permission
    pub permission: Permission,
}

impl AccessRequest {
    /// Create a request
    pub fn new(view: View, final_billing: bool, permission: Permission) -> Self {
        Self {
            view,
            final_billing,
            permission,
        }
    }

    /// Milestone selected by the billing mode flag
    pub fn milestone(&self) -> Milestone {
        Milestone::from_billing_mode(self.final_billing)
    }
}

/// Result of evaluating one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEvaluation {
    /// Derived status used for the lookup, after any milestone remap
    pub derived: DerivedStatus,
    /// Milestone the request was evaluated at
    pub milestone: Milestone,
    /// Access decision
    pub decision: AccessDecision,
}

impl GroupEvaluation {
    /// Whether access was granted
    pub fn is_granted(&self) -> bool {
        self.decision.is_granted()
    }
}

/// Evaluates groups against one matrix snapshot
#[derive(Debug, Clone, Copy)]
pub struct GroupEvaluator<'m> {
    aggregator: StatusAggregator,
    resolver: AccessResolver<'m>,
}

impl<'m> GroupEvaluator<'m> {
    /// Create an evaluator over `matrix`
    pub fn new(matrix: &'m PermissionMatrix) -> Self {
        Self {
            aggregator: StatusAggregator::new(),
            resolver: AccessResolver::new(matrix),
        }
    }

    /// Derived status of `items` as presented at `milestone`
    pub fn derive(
        &self,
        items: &[WorkItem],
        milestone: Milestone,
    ) -> ApprovalResult<DerivedStatus> {
        self.aggregator.aggregate(&present_items(items, milestone))
    }

    /// Evaluate `request` by `role` against the group made of `items`
    ///
    /// Fails only with [`ApprovalError::EmptyGroup`](crate::ApprovalError::EmptyGroup).
    pub fn evaluate(
        &self,
        items: &[WorkItem],
        role: &Role,
        request: &AccessRequest,
    ) -> ApprovalResult<GroupEvaluation> {
        let milestone = request.milestone();
        let derived = self.derive(items, milestone)?;
        let decision = self
            .resolver
            .decide(role, &derived, request.view, milestone, request.permission);
        Ok(GroupEvaluation {
            derived,
            milestone,
            decision,
        })
    }
}
