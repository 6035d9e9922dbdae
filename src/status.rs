// Copyright 2025 Cowboy AI, LLC.

//! Item-level and group-level status values
//!
//! Each work item carries one [`SendingStatus`] and one [`ApprovalStatus`].
//! A group of items collapses to a [`DerivedStatus`] whose sending and
//! approval parts have extra values ([`GroupSendingStatus::InReview`],
//! `Mixed`) describing groups whose items disagree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape shared by the per-item statuses that roll up to a group status
///
/// Every rolled-up status has a pending value, a withheld value (excluded or
/// rejected) and a settled value (sent or approved). A group whose items all
/// share one of these takes that value; other groups fall through to the
/// straddling value when the status has one, and otherwise to mixed.
pub trait RollupStatus: Copy + Eq + fmt::Debug {
    /// Group-level counterpart of this status
    type Group: Copy + Eq + fmt::Debug;

    /// Value of an item that has not moved yet
    const PENDING: Self;
    /// Value of an item that was excluded or rejected
    const WITHHELD: Self;
    /// Value of an item that reached the end of its workflow
    const SETTLED: Self;

    /// Group value when every item holds `self`
    fn uniform(self) -> Self::Group;

    /// Group value for "some withheld, some still pending", if the workflow
    /// distinguishes it
    fn straddling() -> Option<Self::Group>;

    /// Group value for any other combination
    fn mixed() -> Self::Group;
}

/// Sending status of a single work item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum SendingStatus {
    /// Not sent yet
    Pending,
    /// Deliberately left out of the sending run
    Excluded,
    /// Sent for approval
    Sent,
}

impl SendingStatus {
    /// Wire label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            SendingStatus::Pending => "Pending",
            SendingStatus::Excluded => "Excluded",
            SendingStatus::Sent => "Sent",
        }
    }
}

impl RollupStatus for SendingStatus {
    type Group = GroupSendingStatus;

    const PENDING: Self = SendingStatus::Pending;
    const WITHHELD: Self = SendingStatus::Excluded;
    const SETTLED: Self = SendingStatus::Sent;

    fn uniform(self) -> GroupSendingStatus {
        match self {
            SendingStatus::Pending => GroupSendingStatus::Pending,
            SendingStatus::Excluded => GroupSendingStatus::Excluded,
            SendingStatus::Sent => GroupSendingStatus::Sent,
        }
    }

    fn straddling() -> Option<GroupSendingStatus> {
        Some(GroupSendingStatus::InReview)
    }

    fn mixed() -> GroupSendingStatus {
        GroupSendingStatus::Mixed
    }
}

/// Approval status of a single work item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ApprovalStatus {
    /// Awaiting a decision
    Pending,
    /// Rejected by an approver
    Rejected,
    /// Approved
    Approved,
    /// Approval in progress; some approvers signed off
    ///
    /// Presented as [`ApprovalStatus::Approved`] once billing is final, see
    /// [`ApprovalStatus::for_milestone`].
    PartiallyApproved,
}

impl ApprovalStatus {
    /// Wire label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Rejected => "Rejected",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::PartiallyApproved => "PartiallyApproved",
        }
    }
}

impl RollupStatus for ApprovalStatus {
    type Group = GroupApprovalStatus;

    const PENDING: Self = ApprovalStatus::Pending;
    const WITHHELD: Self = ApprovalStatus::Rejected;
    const SETTLED: Self = ApprovalStatus::Approved;

    fn uniform(self) -> GroupApprovalStatus {
        match self {
            ApprovalStatus::Pending => GroupApprovalStatus::Pending,
            ApprovalStatus::Rejected => GroupApprovalStatus::Rejected,
            ApprovalStatus::Approved => GroupApprovalStatus::Approved,
            ApprovalStatus::PartiallyApproved => GroupApprovalStatus::Mixed,
        }
    }

    fn straddling() -> Option<GroupApprovalStatus> {
        None
    }

    fn mixed() -> GroupApprovalStatus {
        GroupApprovalStatus::Mixed
    }
}

/// Rolled-up sending status of a group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum GroupSendingStatus {
    /// Every item pending
    Pending,
    /// Every item excluded
    Excluded,
    /// Every item sent
    Sent,
    /// Some items excluded while others are still pending
    InReview,
    /// Any other combination
    Mixed,
}

impl GroupSendingStatus {
    /// Wire label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupSendingStatus::Pending => "Pending",
            GroupSendingStatus::Excluded => "Excluded",
            GroupSendingStatus::Sent => "Sent",
            GroupSendingStatus::InReview => "InReview",
            GroupSendingStatus::Mixed => "Mixed",
        }
    }
}

/// Rolled-up approval status of a group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum GroupApprovalStatus {
    /// Every item pending
    Pending,
    /// Every item rejected
    Rejected,
    /// Every item approved
    Approved,
    /// Any other combination
    Mixed,
}

impl GroupApprovalStatus {
    /// Wire label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupApprovalStatus::Pending => "Pending",
            GroupApprovalStatus::Rejected => "Rejected",
            GroupApprovalStatus::Approved => "Approved",
            GroupApprovalStatus::Mixed => "Mixed",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_label!(SendingStatus, ApprovalStatus, GroupSendingStatus, GroupApprovalStatus);

/// Rolled-up status of one group of work items
///
/// Computed on every query and never stored. Two groups holding the same
/// multiset of item statuses always derive the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedStatus {
    /// Rolled-up sending status
    pub sending: GroupSendingStatus,
    /// Rolled-up approval status
    pub approval: GroupApprovalStatus,
    /// True only when every item was submitted
    pub submitted: bool,
}

impl DerivedStatus {
    /// Create a derived status triple
    pub fn new(
        sending: GroupSendingStatus,
        approval: GroupApprovalStatus,
        submitted: bool,
    ) -> Self {
        Self {
            sending,
            approval,
            submitted,
        }
    }
}

impl fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.sending, self.approval, self.submitted)
    }
}
