// Copyright 2025 Cowboy AI, LLC.

//! Audit trail for access decisions
//!
//! Auditing happens at the application boundary. The evaluation core never
//! writes audit records itself.

use crate::access::AccessDecision;
use crate::evaluation::AccessRequest;
use crate::identifiers::{GroupKey, Role};
use crate::milestone::Milestone;
use crate::status::DerivedStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// One audited access decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAudit {
    /// Caller identity as supplied by the host application
    pub identity: String,
    /// Group the request targeted
    pub group: GroupKey,
    /// Role resolved for the caller, if any
    pub role: Option<Role>,
    /// The request
    pub request: AccessRequest,
    /// Milestone the request was evaluated at
    pub milestone: Milestone,
    /// Derived status used for the lookup, if the group was evaluated
    pub derived: Option<DerivedStatus>,
    /// Decision
    pub decision: AccessDecision,
    /// When the decision was made
    pub evaluated_at: DateTime<Utc>,
}

/// Receiver of audit records
pub trait AuditSink: Send + Sync {
    /// Record one decision
    fn record(&self, audit: &AccessAudit);
}

/// Writes audit records as structured tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, audit: &AccessAudit) {
        info!(
            target: "cim_domain_approval::audit",
            identity = %audit.identity,
            group = %audit.group,
            role = audit.role.as_ref().map(Role::as_str).unwrap_or("-"),
            view = %audit.request.view,
            permission = %audit.request.permission,
            milestone = %audit.milestone,
            granted = audit.decision.is_granted(),
            evaluated_at = %audit.evaluated_at,
            "Access decision"
        );
    }
}

/// Keeps audit records in memory
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AccessAudit>>,
}

impl RecordingAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far
    pub fn records(&self) -> Vec<AccessAudit> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, audit: &AccessAudit) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(audit.clone());
    }
}
