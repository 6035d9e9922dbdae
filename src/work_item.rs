// Copyright 2025 Cowboy AI, LLC.

//! Work items as read from the item store

use crate::identifiers::{GroupKey, WorkItemId};
use crate::status::{ApprovalStatus, SendingStatus};
use serde::{Deserialize, Serialize};

/// One individually tracked cost line
///
/// A snapshot taken at evaluation time. The item store owns and updates
/// items; nothing in this crate mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Item identifier
    pub id: WorkItemId,
    /// Group the item rolls up into
    pub group: GroupKey,
    /// Sending status
    pub sending: SendingStatus,
    /// Approval status
    pub approval: ApprovalStatus,
    /// Whether the item has been submitted
    pub submitted: bool,
}

impl WorkItem {
    /// Create a work item with a fresh ID
    pub fn new(
        group: GroupKey,
        sending: SendingStatus,
        approval: ApprovalStatus,
        submitted: bool,
    ) -> Self {
        Self {
            id: WorkItemId::new(),
            group,
            sending,
            approval,
            submitted,
        }
    }

    /// Copy of this item with a different approval status
    pub fn with_approval(&self, approval: ApprovalStatus) -> Self {
        Self {
            approval,
            ..self.clone()
        }
    }
}
