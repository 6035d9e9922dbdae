// Copyright 2025 Cowboy AI, LLC.

//! Where permission rules come from
//!
//! The matrix does not care about the storage format, only that every row
//! carries the full six-part key and a permission.

use super::rule::PermissionRule;
use crate::errors::ApprovalResult;
use serde::Deserialize;

/// Supplier of permission rule rows, read once at startup or reload
pub trait PermissionSource: Send + Sync {
    /// Produce every rule row
    fn rules(&self) -> ApprovalResult<Vec<PermissionRule>>;

    /// Short description of the source for logs
    fn describe(&self) -> String;
}

/// Rules held in memory, e.g. built by the host application
#[derive(Debug, Clone, Default)]
pub struct StaticRuleSource {
    rules: Vec<PermissionRule>,
}

impl StaticRuleSource {
    /// Create a source from rule rows
    pub fn new(rules: Vec<PermissionRule>) -> Self {
        Self { rules }
    }
}

impl PermissionSource for StaticRuleSource {
    fn rules(&self) -> ApprovalResult<Vec<PermissionRule>> {
        Ok(self.rules.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} rows)", self.rules.len())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    Rows(Vec<PermissionRule>),
    Table { rules: Vec<PermissionRule> },
}

/// Rules from a JSON document
///
/// Accepts either a bare array of rule rows or an object with a `rules`
/// array.
#[derive(Debug, Clone)]
pub struct JsonRuleSource {
    name: String,
    document: String,
}

impl JsonRuleSource {
    /// Create a source from a JSON document
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
        }
    }
}

impl PermissionSource for JsonRuleSource {
    fn rules(&self) -> ApprovalResult<Vec<PermissionRule>> {
        let rows = match serde_json::from_str(&self.document)? {
            RuleDocument::Rows(rows) => rows,
            RuleDocument::Table { rules } => rules,
        };
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("json ({})", self.name)
    }
}
