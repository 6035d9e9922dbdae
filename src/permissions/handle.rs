// Copyright 2025 Cowboy AI, LLC.

//! Shared, atomically replaceable permission matrix
//!
//! Evaluations take an `Arc` snapshot and keep using it even if a reload
//! swaps in a new matrix halfway through. A reload that fails leaves the
//! current matrix in place.

use super::matrix::PermissionMatrix;
use super::source::PermissionSource;
use crate::errors::ApprovalResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Handle to the process-wide permission matrix
#[derive(Debug, Clone)]
pub struct MatrixHandle {
    current: Arc<RwLock<Arc<PermissionMatrix>>>,
}

impl MatrixHandle {
    /// Wrap an already loaded matrix
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(matrix))),
        }
    }

    /// Load the initial matrix from `source`
    ///
    /// Evaluation must not start until this returns.
    pub fn load(source: &dyn PermissionSource) -> ApprovalResult<Self> {
        Ok(Self::new(PermissionMatrix::load(source)?))
    }

    /// The matrix currently in force
    pub async fn snapshot(&self) -> Arc<PermissionMatrix> {
        self.current.read().await.clone()
    }

    /// Swap in a new matrix, returning the one it replaced
    pub async fn replace(&self, matrix: PermissionMatrix) -> Arc<PermissionMatrix> {
        let mut current = self.current.write().await;
        let rules = matrix.len();
        let previous = std::mem::replace(&mut *current, Arc::new(matrix));
        info!(previous_rules = previous.len(), rules, "Permission matrix replaced");
        previous
    }

    /// Rebuild the matrix from `source` and swap it in
    ///
    /// On error the current matrix stays active.
    pub async fn reload(&self, source: &dyn PermissionSource) -> ApprovalResult<()> {
        match PermissionMatrix::load(source) {
            Ok(matrix) => {
                self.replace(matrix).await;
                Ok(())
            }
            Err(err) => {
                warn!(
                    source = %source.describe(),
                    error = %err,
                    "Permission matrix reload rejected"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
impl MatrixHandle {
    /// Hold the write side of the lock, blocking snapshots until dropped
    pub(crate) async fn lock_for_test(
        &self,
    ) -> tokio::sync::RwLockWriteGuard<'_, Arc<PermissionMatrix>> {
        self.current.write().await
    }
}
