// Copyright 2025 Cowboy AI, LLC.

//! # CIM Domain Approval
//!
//! Status rollup and access resolution for a cost-approval workflow.
//!
//! The crate answers two questions about a group of cost line items:
//! - **Derived status**: what sending / approval / submitted state does the
//!   group as a whole sit in?
//! - **Access**: may a role exercise a permission against a view of that
//!   group at the current billing milestone?
//!
//! ## Building Blocks
//!
//! - **StatusAggregator**: reduces a group's [`WorkItem`]s to a
//!   [`DerivedStatus`]
//! - **PermissionMatrix**: fixed rules keyed by
//!   `(role, sending, approval, submitted, view, milestone)`
//! - **AccessResolver**: exact-key, fail-closed lookup against the matrix
//! - **GroupEvaluator**: milestone selection, Final-milestone remap, rollup
//!   and resolution in one pure call
//! - **AccessService**: the application boundary wiring the item store,
//!   membership resolution and audit sinks to the core
//!
//! ## Design Principles
//!
//! 1. **Pure core**: rollup and resolution read only their inputs and an
//!    immutable matrix snapshot
//! 2. **Order independence**: a derived status depends only on the multiset
//!    of item statuses
//! 3. **Fail-closed**: a request without an exact matching rule is denied
//! 4. **Privilege as data**: finance operations is one more role in the matrix
//! 5. **Atomic reload**: a new matrix replaces the old one as a whole

#![warn(missing_docs)]

mod access;
mod aggregation;
mod errors;
mod evaluation;
mod identifiers;
mod milestone;
mod service;
mod status;
mod work_item;
pub mod infrastructure;
pub mod permissions;

pub use access::{resolve_access, AccessDecision, AccessResolver, DenyReason};
pub use aggregation::{aggregate_status, roll_up, StatusAggregator};
pub use errors::{ApprovalError, ApprovalResult};
pub use evaluation::{AccessRequest, GroupEvaluation, GroupEvaluator};
pub use identifiers::{GroupKey, GroupParent, Quarter, Role, WorkItemId};
pub use infrastructure::{
    AccessAudit, AuditSink, InMemoryWorkItemStore, MembershipResolver, RecordingAuditSink,
    StaticMembership, TracingAuditSink, WorkItemStore,
};
pub use milestone::Milestone;
pub use permissions::{
    JsonRuleSource, MatrixHandle, Permission, PermissionMatrix, PermissionRule, PermissionSource,
    RuleKey, StaticRuleSource, View,
};
pub use service::{AccessOutcome, AccessService, AccessServiceConfig};
pub use status::{
    ApprovalStatus, DerivedStatus, GroupApprovalStatus, GroupSendingStatus, RollupStatus,
    SendingStatus,
};
pub use work_item::WorkItem;
