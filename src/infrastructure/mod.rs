// Copyright 2025 Cowboy AI, LLC.

//! Collaborators around the evaluation core
//!
//! - Work item store (read-only)
//! - Membership resolution
//! - Audit sinks

pub mod audit;
pub mod membership;
pub mod work_item_store;

pub use audit::{AccessAudit, AuditSink, RecordingAuditSink, TracingAuditSink};
pub use membership::{MembershipResolver, StaticMembership};
pub use work_item_store::{InMemoryWorkItemStore, WorkItemStore};
