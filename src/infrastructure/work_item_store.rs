// Copyright 2025 Cowboy AI, LLC.

//! Read access to persisted work items

use crate::errors::ApprovalResult;
use crate::identifiers::GroupKey;
use crate::work_item::WorkItem;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of work items, owned by the loading pipeline
///
/// Implementations must return a consistent snapshot of the whole group,
/// e.g. by reading it in a single query or transaction.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// Fetch every item of `group`; an unknown group yields an empty list
    async fn fetch_items(&self, group: &GroupKey) -> ApprovalResult<Vec<WorkItem>>;
}

/// In-memory work item store for testing and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkItemStore {
    items: Arc<RwLock<HashMap<GroupKey, Vec<WorkItem>>>>,
}

impl InMemoryWorkItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to its group
    pub async fn insert(&self, item: WorkItem) {
        let mut items = self.items.write().await;
        items.entry(item.group.clone()).or_default().push(item);
    }

    /// Add several items
    pub async fn extend(&self, new_items: impl IntoIterator<Item = WorkItem>) {
        let mut items = self.items.write().await;
        for item in new_items {
            items.entry(item.group.clone()).or_default().push(item);
        }
    }

    /// Replace the items of a group in one step
    pub async fn replace_group(&self, group: GroupKey, group_items: Vec<WorkItem>) {
        let mut items = self.items.write().await;
        items.insert(group, group_items);
    }
}

#[async_trait]
impl WorkItemStore for InMemoryWorkItemStore {
    async fn fetch_items(&self, group: &GroupKey) -> ApprovalResult<Vec<WorkItem>> {
        let items = self.items.read().await;
        Ok(items.get(group).cloned().unwrap_or_default())
    }
}
