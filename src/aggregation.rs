// Copyright 2025 Cowboy AI, LLC.

//! Status rollup for groups of work items
//!
//! Sending and approval statuses collapse independently with the same rule,
//! evaluated top to bottom with the first match winning:
//!
//! 1. every item settled (sent / approved) → settled
//! 2. every item pending → pending
//! 3. every item withheld (excluded / rejected) → withheld
//! 4. at least one withheld and at least one pending → straddling
//!    (`InReview`, sending only)
//! 5. anything else → `Mixed`
//!
//! The submitted flag is the logical AND over all items.
//!
//! ```mermaid
//! graph TD
//!     I[WorkItems of one group] --> T[Tally per status]
//!     T -->|all settled| S[Sent / Approved]
//!     T -->|all pending| P[Pending]
//!     T -->|all withheld| W[Excluded / Rejected]
//!     T -->|withheld + pending| R[InReview]
//!     T -->|otherwise| M[Mixed]
//! ```

use crate::errors::{ApprovalError, ApprovalResult};
use crate::identifiers::GroupKey;
use crate::status::{DerivedStatus, RollupStatus};
use crate::work_item::WorkItem;
use std::collections::BTreeMap;

/// Counts of the three rollup-relevant values in a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total: usize,
    pending: usize,
    withheld: usize,
    settled: usize,
}

impl Tally {
    fn of<S: RollupStatus>(values: impl IntoIterator<Item = S>) -> Self {
        values.into_iter().fold(Self::default(), |mut tally, value| {
            tally.total += 1;
            if value == S::PENDING {
                tally.pending += 1;
            } else if value == S::WITHHELD {
                tally.withheld += 1;
            } else if value == S::SETTLED {
                tally.settled += 1;
            }
            tally
        })
    }
}

/// Collapse one status across a group
///
/// Returns `None` for an empty input. Only counts are inspected, so the
/// result never depends on item order.
pub fn roll_up<S: RollupStatus>(values: impl IntoIterator<Item = S>) -> Option<S::Group> {
    let tally = Tally::of(values);
    if tally.total == 0 {
        return None;
    }

    let group = if tally.settled == tally.total {
        S::SETTLED.uniform()
    } else if tally.pending == tally.total {
        S::PENDING.uniform()
    } else if tally.withheld == tally.total {
        S::WITHHELD.uniform()
    } else if tally.withheld > 0 && tally.pending > 0 {
        S::straddling().unwrap_or_else(S::mixed)
    } else {
        S::mixed()
    };
    Some(group)
}

/// Reduces the work items of a group to one [`DerivedStatus`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAggregator;

impl StatusAggregator {
    /// Create an aggregator
    pub fn new() -> Self {
        Self
    }

    /// Aggregate the items of a single group
    ///
    /// Fails with [`ApprovalError::EmptyGroup`] when `items` is empty; callers
    /// must check that the group exists before asking for its status.
    pub fn aggregate(&self, items: &[WorkItem]) -> ApprovalResult<DerivedStatus> {
        derive(items).ok_or_else(|| ApprovalError::empty_group("unspecified group"))
    }

    /// Aggregate items that must all belong to `key`
    pub fn aggregate_for(
        &self,
        key: &GroupKey,
        items: &[WorkItem],
    ) -> ApprovalResult<DerivedStatus> {
        if let Some(stray) = items.iter().find(|item| &item.group != key) {
            return Err(ApprovalError::InvalidGroupKey(format!(
                "item {} belongs to {}, expected {}",
                stray.id, stray.group, key
            )));
        }
        derive(items).ok_or_else(|| ApprovalError::empty_group(key.to_string()))
    }

    /// Partition a flat list of items by group and aggregate each group
    ///
    /// Every group in the result has at least one item, so this never
    /// reports an empty group.
    pub fn aggregate_by_group(&self, items: &[WorkItem]) -> BTreeMap<GroupKey, DerivedStatus> {
        let mut groups: BTreeMap<&GroupKey, Vec<&WorkItem>> = BTreeMap::new();
        for item in items {
            groups.entry(&item.group).or_default().push(item);
        }

        groups
            .into_iter()
            .filter_map(|(key, members)| {
                derive(members.iter().copied()).map(|derived| (key.clone(), derived))
            })
            .collect()
    }
}

/// Aggregate the items of one group
///
/// Convenience wrapper around [`StatusAggregator::aggregate`].
pub fn aggregate_status(items: &[WorkItem]) -> ApprovalResult<DerivedStatus> {
    StatusAggregator.aggregate(items)
}

fn derive<'a>(items: impl IntoIterator<Item = &'a WorkItem> + Clone) -> Option<DerivedStatus> {
    let sending = roll_up(items.clone().into_iter().map(|item| item.sending))?;
    let approval = roll_up(items.clone().into_iter().map(|item| item.approval))?;
    let submitted = items.into_iter().all(|item| item.submitted);
    Some(DerivedStatus::new(sending, approval, submitted))
}
