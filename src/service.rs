// Copyright 2025 Cowboy AI, LLC.

//! Application-boundary access service
//!
//! Wires the collaborators to the evaluation core: resolve the caller's role,
//! fetch a consistent snapshot of the group's items, evaluate against the
//! current matrix, audit the decision. All I/O happens here; the evaluation
//! itself stays pure.
//!
//! ```mermaid
//! graph LR
//!     C[Caller] --> M[MembershipResolver]
//!     C --> S[WorkItemStore]
//!     S --> E[GroupEvaluator]
//!     M --> E
//!     H[MatrixHandle] --> E
//!     E --> A[AuditSink]
//! ```

use crate::access::{AccessDecision, DenyReason};
use crate::aggregation::StatusAggregator;
use crate::errors::ApprovalResult;
use crate::evaluation::{AccessRequest, GroupEvaluator};
use crate::identifiers::{GroupKey, Role};
use crate::infrastructure::{
    AccessAudit, AuditSink, MembershipResolver, TracingAuditSink, WorkItemStore,
};
use crate::milestone::{present_items, Milestone};
use crate::permissions::MatrixHandle;
use crate::status::DerivedStatus;
use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessServiceConfig {
    /// Send granted decisions to the audit sink
    pub audit_grants: bool,
    /// Send denied decisions to the audit sink
    pub audit_denials: bool,
}

impl Default for AccessServiceConfig {
    fn default() -> Self {
        Self {
            audit_grants: false,
            audit_denials: true,
        }
    }
}

impl AccessServiceConfig {
    /// Parse a configuration document; missing fields take their defaults
    pub fn from_json(document: &str) -> ApprovalResult<Self> {
        Ok(serde_json::from_str(document)?)
    }

    fn should_audit(&self, decision: &AccessDecision) -> bool {
        if decision.is_granted() {
            self.audit_grants
        } else {
            self.audit_denials
        }
    }
}

/// Outcome of one access check at the application boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessOutcome {
    /// Group that was checked
    pub group: GroupKey,
    /// Role resolved for the caller, if any
    pub role: Option<Role>,
    /// Milestone the request was evaluated at
    pub milestone: Milestone,
    /// Derived status used for the lookup; `None` when the group was not
    /// evaluated
    pub derived: Option<DerivedStatus>,
    /// Decision
    pub decision: AccessDecision,
}

impl AccessOutcome {
    /// Whether access was granted
    pub fn is_granted(&self) -> bool {
        self.decision.is_granted()
    }
}

/// Access checks for callers of the reporting and query layers
pub struct AccessService {
    store: Arc<dyn WorkItemStore>,
    membership: Arc<dyn MembershipResolver>,
    matrix: MatrixHandle,
    audit: Arc<dyn AuditSink>,
    config: AccessServiceConfig,
}

impl AccessService {
    /// Create a service that audits through tracing
    pub fn new(
        store: Arc<dyn WorkItemStore>,
        membership: Arc<dyn MembershipResolver>,
        matrix: MatrixHandle,
    ) -> Self {
        Self {
            store,
            membership,
            matrix,
            audit: Arc::new(TracingAuditSink),
            config: AccessServiceConfig::default(),
        }
    }

    /// Use a different audit sink
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Use a different configuration
    pub fn with_config(mut self, config: AccessServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Handle to the matrix in use, for reloads
    pub fn matrix(&self) -> &MatrixHandle {
        &self.matrix
    }

    /// Derived status of `group` as presented under the given billing mode
    ///
    /// Returns `None` for a group with no items. Does not read the matrix.
    pub async fn derived_status(
        &self,
        group: &GroupKey,
        final_billing: bool,
    ) -> ApprovalResult<Option<DerivedStatus>> {
        let items = self.store.fetch_items(group).await?;
        if items.is_empty() {
            return Ok(None);
        }
        let milestone = Milestone::from_billing_mode(final_billing);
        StatusAggregator::new()
            .aggregate(&present_items(&items, milestone))
            .map(Some)
    }

    /// Check whether `identity` may perform `request` on `group`
    ///
    /// Collaborator failures are returned as errors. A missing role or an
    /// empty group is a denial, not an error.
    pub async fn check_access(
        &self,
        identity: &str,
        group: &GroupKey,
        request: &AccessRequest,
    ) -> ApprovalResult<AccessOutcome> {
        let milestone = request.milestone();

        let Some(role) = self.membership.resolve_role(identity, group).await? else {
            debug!(identity, group = %group, "No role for caller, denying");
            return Ok(self.finish(
                identity,
                group,
                request,
                None,
                milestone,
                None,
                AccessDecision::Denied(DenyReason::NoRole),
            ));
        };

        let items = self.store.fetch_items(group).await?;
        if items.is_empty() {
            debug!(identity, group = %group, "Group has no work items, denying");
            return Ok(self.finish(
                identity,
                group,
                request,
                Some(role),
                milestone,
                None,
                AccessDecision::Denied(DenyReason::UnknownGroup),
            ));
        }

        let matrix = self.matrix.snapshot().await;
        let evaluation = GroupEvaluator::new(&matrix).evaluate(&items, &role, request)?;

        match evaluation.decision {
            AccessDecision::Granted { held } => {
                trace!(identity, group = %group, role = %role, held = %held, "Access granted");
            }
            AccessDecision::Denied(reason) => {
                debug!(
                    identity,
                    group = %group,
                    role = %role,
                    derived = %evaluation.derived,
                    view = %request.view,
                    milestone = %milestone,
                    reason = %reason,
                    "Access denied"
                );
            }
        }

        Ok(self.finish(
            identity,
            group,
            request,
            Some(role),
            milestone,
            Some(evaluation.derived),
            evaluation.decision,
        ))
    }

    /// Check the same request against several groups concurrently
    ///
    /// Outcomes come back in the order of `groups`. The first collaborator
    /// failure aborts the whole batch.
    pub async fn check_many(
        &self,
        identity: &str,
        groups: &[GroupKey],
        request: &AccessRequest,
    ) -> ApprovalResult<Vec<AccessOutcome>> {
        try_join_all(
            groups
                .iter()
                .map(|group| self.check_access(identity, group, request)),
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        identity: &str,
        group: &GroupKey,
        request: &AccessRequest,
        role: Option<Role>,
        milestone: Milestone,
        derived: Option<DerivedStatus>,
        decision: AccessDecision,
    ) -> AccessOutcome {
        if self.config.should_audit(&decision) {
            self.audit.record(&AccessAudit {
                identity: identity.to_string(),
                group: group.clone(),
                role: role.clone(),
                request: request.clone(),
                milestone,
                derived,
                decision,
                evaluated_at: Utc::now(),
            });
        }

        AccessOutcome {
            group: group.clone(),
            role,
            milestone,
            derived,
            decision,
        }
    }
}
